//! Weekly note files
//!
//! A [`Note`] is the Markdown file for one work week, stored as
//! `<base_dir>/<year>/<week>.md`. The file is created lazily with a
//! day-by-day template, carrying forward the previous week's TODO section.
//!
//! Submodules:
//! - `template`: headings and the template body
//! - `scan`: line scanners for TODO carry-over and cursor placement

mod scan;
mod template;

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::date_range::DateRange;
use crate::error::{NoteError, Result};

pub use scan::{cursor_line, todo_carry_over};
pub use template::{TODO_MARKER, heading, render as render_template, title};

/// Outcome of [`Note::ensure_create`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Created {
    /// The template was written (file was missing or empty)
    Template,
    /// A non-empty note already existed and was left untouched
    Existing,
}

/// Path of the note for `range` under `base_dir`: `<base_dir>/<year>/<week:02>.md`
pub fn note_path(base_dir: &Path, range: &DateRange) -> PathBuf {
    base_dir
        .join(range.start_year().to_string())
        .join(format!("{:02}.md", range.start_week()))
}

/// One weekly note on disk
#[derive(Debug, Clone)]
pub struct Note {
    current: DateRange,
    previous: DateRange,
    path: PathBuf,
    previous_path: PathBuf,
}

impl Note {
    /// Create a note handle for `current`, carrying TODOs over from `previous`.
    ///
    /// Nothing is touched on disk until [`Note::ensure_create`].
    pub fn new(base_dir: impl AsRef<Path>, current: DateRange, previous: DateRange) -> Self {
        let base_dir = base_dir.as_ref();
        let path = note_path(base_dir, &current);
        let previous_path = note_path(base_dir, &previous);
        Self {
            current,
            previous,
            path,
            previous_path,
        }
    }

    /// Location of this week's note
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Location of the previous week's note (source of carried-over TODOs)
    pub fn previous_path(&self) -> &Path {
        &self.previous_path
    }

    pub fn current_range(&self) -> &DateRange {
        &self.current
    }

    pub fn previous_range(&self) -> &DateRange {
        &self.previous
    }

    /// Write the template if the note is missing or empty.
    ///
    /// A non-empty note is never modified. A missing note is created with
    /// `create_new`, so a note that appears between the stat and the open
    /// yields [`NoteError::CreateExclusive`] instead of being overwritten.
    pub fn ensure_create(&self) -> Result<Created> {
        if let Some(dir) = self.path.parent() {
            create_dir_all(dir)?;
        }

        let exists = match fs::metadata(&self.path) {
            Ok(meta) if meta.len() > 0 => {
                debug!("note {} already has content", self.path.display());
                return Ok(Created::Existing);
            }
            Ok(_) => true,
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(source) => {
                return Err(NoteError::Stat {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let body = render_template(&self.current, &self.carry_over()?);
        let mut file = self.open_for_template(exists)?;
        file.write_all(body.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| NoteError::Write {
                path: self.path.clone(),
                source,
            })?;

        debug!("wrote template to {}", self.path.display());
        Ok(Created::Template)
    }

    /// TODO lines from the previous week's note, empty when it can't be opened.
    pub fn carry_over(&self) -> Result<Vec<String>> {
        let file = match File::open(&self.previous_path) {
            Ok(file) => file,
            Err(e) => {
                debug!(
                    "no carry-over from {}: {}",
                    self.previous_path.display(),
                    e
                );
                return Ok(Vec::new());
            }
        };

        todo_carry_over(BufReader::new(file)).map_err(|source| NoteError::Read {
            path: self.previous_path.clone(),
            source,
        })
    }

    /// 1-based line of the end of today's section, for positioning an editor.
    ///
    /// "Today" is the current range's reference date. When today's heading is
    /// absent the result is the note's line count.
    pub fn cursor_line(&self) -> Result<usize> {
        let file = File::open(&self.path).map_err(|source| NoteError::Open {
            path: self.path.clone(),
            source,
        })?;

        let today = heading(self.current.reference_date().date());
        cursor_line(BufReader::new(file), &today).map_err(|source| NoteError::Read {
            path: self.path.clone(),
            source,
        })
    }

    /// Copy the raw note to `out`
    pub fn print<W: Write>(&self, out: &mut W) -> Result<()> {
        let mut file = File::open(&self.path).map_err(|source| NoteError::Open {
            path: self.path.clone(),
            source,
        })?;

        io::copy(&mut file, out).map_err(|source| NoteError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Read the whole note into memory
    pub fn read_to_string(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|source| NoteError::Read {
            path: self.path.clone(),
            source,
        })
    }

    fn open_for_template(&self, exists: bool) -> Result<File> {
        let mut options = OpenOptions::new();
        options.read(true).write(true);
        if exists {
            // Empty file: fill it in place.
            return options.open(&self.path).map_err(|source| NoteError::Open {
                path: self.path.clone(),
                source,
            });
        }

        options.create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        options.open(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::AlreadyExists {
                NoteError::CreateExclusive {
                    path: self.path.clone(),
                    source,
                }
            } else {
                NoteError::Open {
                    path: self.path.clone(),
                    source,
                }
            }
        })
    }
}

fn create_dir_all(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder.create(dir).map_err(|source| NoteError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}
