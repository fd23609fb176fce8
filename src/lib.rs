//! Weekly note manager
//!
//! Notes are plain Markdown files, one per ISO week, stored as
//! `<base_dir>/<year>/<week>.md`. The first time a week's note is touched it
//! is filled with a Monday to Friday template, and the TODO section of the
//! previous week's note is carried forward into it.
//!
//! # Architecture
//!
//! - **Dates**: `date_range` computes the Mon-Fri span and ISO week of a date
//! - **Notes**: `note` derives paths, writes templates, and finds today's line
//! - **Glue**: `config`, `cli`, `editor`, `render`, `git_ops`, and `app`
//!   turn those into the `note` command
//!
//! # Example
//!
//! ```no_run
//! use weeknote::{Note, relative_work_week};
//!
//! # fn main() -> weeknote::Result<()> {
//! let note = Note::new("/home/me/note", relative_work_week(0)?, relative_work_week(-1)?);
//! note.ensure_create()?;
//! let line = note.cursor_line()?;
//! println!("{} +{}", note.path().display(), line);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod date_range;
pub mod editor;
pub mod error;
pub mod git_ops;
pub mod note;
pub mod render;

// Re-export commonly used types
pub use app::{App, Mode};
pub use cli::{Args, parse_week_offset};
pub use config::{Config, FileConfig};
pub use date_range::{DateRange, relative_work_week, relative_work_week_from, work_week};
pub use error::{NoteError, Result};
pub use git_ops::GitOps;
pub use note::{Created, Note, note_path};
