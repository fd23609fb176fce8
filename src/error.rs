//! Error types for weekly note management
//!
//! Every file-system failure carries the path it happened on and the
//! underlying I/O error, so callers can report which note was involved.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, NoteError>;

/// Errors surfaced by the date, note, and configuration layers
#[derive(Error, Debug)]
pub enum NoteError {
    /// Parent directories of a note could not be created
    #[error("unable to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Stat failed for a reason other than "does not exist"
    #[error("unable to stat {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Another process created the note between the stat and the open
    #[error("note {} was created concurrently: {source}", .path.display())]
    CreateExclusive {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A note file could not be opened
    #[error("unable to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading a note file failed part way through
    #[error("unable to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the template (or copying a note to an output) failed
    #[error("unable to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The leading OFFSET argument was not a signed week offset
    #[error("unable to parse offset value {0:?}")]
    InvalidOffset(String),

    /// The week offset moves outside the supported calendar
    #[error("week offset {0} is out of range")]
    OffsetOutOfRange(i64),

    /// The configuration file exists but could not be used
    #[error("invalid configuration file {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// A resolved setting is unusable (e.g. blank editor)
    #[error("{0}")]
    InvalidConfig(String),
}

impl NoteError {
    /// The underlying I/O error, if this failure came from the file system
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            NoteError::CreateDir { source, .. }
            | NoteError::Stat { source, .. }
            | NoteError::CreateExclusive { source, .. }
            | NoteError::Open { source, .. }
            | NoteError::Read { source, .. }
            | NoteError::Write { source, .. } => Some(source),
            NoteError::InvalidOffset(_)
            | NoteError::OffsetOutOfRange(_)
            | NoteError::Config { .. }
            | NoteError::InvalidConfig(_) => None,
        }
    }
}
