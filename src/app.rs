//! Mode dispatch for the `note` command

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use std::io::Write;

use crate::config::Config;
use crate::date_range::relative_work_week_from;
use crate::editor::Editor;
use crate::error::NoteError;
use crate::git_ops::GitOps;
use crate::note::{Created, Note};
use crate::render::Renderer;

/// What to do with the week's note once it exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print the note path
    Names,
    /// Copy the raw note to the output
    Print,
    /// Render the note as terminal Markdown
    Render,
    /// Open the note in the configured editor
    Edit,
}

/// One invocation of the `note` command: configuration, target week, and mode
pub struct App {
    config: Config,
    week_offset: i64,
    mode: Mode,
    now: NaiveDateTime,
    color: bool,
}

impl App {
    pub fn new(config: Config, week_offset: i64, mode: Mode) -> Self {
        Self {
            config,
            week_offset,
            mode,
            now: Local::now().naive_local(),
            color: false,
        }
    }

    /// Override "now", mainly for tests
    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    /// Enable ANSI styling in render mode
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// The note for the configured week, with the week before as carry-over source
    pub fn note(&self) -> crate::Result<Note> {
        let current = relative_work_week_from(self.now, self.week_offset)?;
        let previous_offset = self
            .week_offset
            .checked_sub(1)
            .ok_or(NoteError::OffsetOutOfRange(self.week_offset))?;
        let previous = relative_work_week_from(self.now, previous_offset)?;
        Ok(Note::new(&self.config.base_dir, current, previous))
    }

    pub fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        self.config.validate()?;
        if self.mode == Mode::Edit {
            self.config.validate_editor()?;
        }

        let note = self.note()?;
        let created = note.ensure_create()?;
        if created == Created::Template && self.config.sync_git {
            self.commit(&note);
        }

        match self.mode {
            Mode::Names => {
                writeln!(out, "{}", note.path().display())?;
            }
            Mode::Print => note.print(out)?,
            Mode::Render => {
                let content = note.read_to_string()?;
                out.write_all(Renderer::new(self.color).render(&content).as_bytes())?;
            }
            Mode::Edit => self.edit(&note)?,
        }
        Ok(())
    }

    fn edit(&self, note: &Note) -> Result<()> {
        let editor = Editor::new(self.config.editor.clone());

        // Only the current week gets a cursor position.
        let line = if self.week_offset == 0 && editor.supports_line_jump() {
            Some(note.cursor_line()?)
        } else {
            None
        };

        editor
            .open(note.path(), line)
            .with_context(|| format!("unable to edit {}", note.path().display()))
    }

    fn commit(&self, note: &Note) {
        let range = note.current_range();
        let message = format!(
            "Add week {:02}, {} note",
            range.start_week(),
            range.start_year()
        );
        let git_ops = GitOps::new(&self.config.base_dir);
        if !git_ops.is_git_managed() {
            log::debug!("{} is not in a git repository", self.config.base_dir.display());
            return;
        }
        if let Err(e) = git_ops.commit(note.path(), &message) {
            log::warn!("git commit of {} failed: {:#}", note.path().display(), e);
        }
    }
}
