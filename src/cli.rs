//! Command-line arguments
//!
//! `note [OFFSET] [OPTIONS]`. OFFSET must carry an explicit sign: `-2` is two
//! weeks ago and `+1` is next week. Unsigned numbers are reserved for
//! absolute week numbers and are rejected for now.

use clap::{ArgAction, Parser};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::app::Mode;
use crate::config::Config;
use crate::error::{NoteError, Result};

static OFFSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([-+])?(\d+)$").expect("offset pattern is valid"));

const OFFSET_HELP: &str = "\
OFFSET:
  open note file OFFSET number of weeks relative to now.
  Example: -2 (two weeks ago); +1 (next week)";

/// Weekly note manager
#[derive(Parser, Debug, Default)]
#[command(
    name = "note",
    about = "Weekly Markdown notes keyed by ISO week",
    override_usage = "note [OFFSET] [OPTIONS]",
    after_help = OFFSET_HELP,
    allow_negative_numbers = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Args {
    /// Week offset relative to now, e.g. -2 or +1
    #[arg(value_name = "OFFSET", value_parser = parse_week_offset)]
    pub offset: Option<i64>,

    /// Root directory of note files
    #[arg(short = 'd', value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Editor executable ($EDITOR)
    #[arg(short = 'e', value_name = "EDITOR")]
    pub editor: Option<String>,

    /// Commit newly created notes to the git repository holding DIR
    #[arg(short = 'g', long)]
    pub sync_git: bool,

    /// Print the note's path
    #[arg(short = 'n', long, conflicts_with_all = ["print", "render"])]
    pub names: bool,

    /// Print the raw note
    #[arg(short = 'p', long, conflicts_with = "render")]
    pub print: bool,

    /// Print the note rendered as Markdown
    #[arg(short = 'm', long)]
    pub render: bool,

    /// Read settings from this file instead of the default config.toml
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print version information
    #[arg(short = 'v', action = ArgAction::SetTrue)]
    pub version: bool,

    /// Print usage
    #[arg(short = 'h', action = ArgAction::SetTrue)]
    pub short_help: bool,

    /// Print README in addition to standard help (-h) information
    #[arg(long = "help", action = ArgAction::SetTrue)]
    pub full_help: bool,
}

impl Args {
    /// Signed week offset, 0 when OFFSET is omitted
    pub fn week_offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    /// Output mode selected by `-n`, `-p`, or `-m`, editing otherwise
    pub fn mode(&self) -> Mode {
        if self.names {
            Mode::Names
        } else if self.print {
            Mode::Print
        } else if self.render {
            Mode::Render
        } else {
            Mode::Edit
        }
    }

    /// Apply flag overrides on top of a loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.base_dir {
            config.base_dir = dir.clone();
        }
        if let Some(editor) = &self.editor {
            config.editor = editor.clone();
        }
        if self.sync_git {
            config.sync_git = true;
        }
    }
}

/// Parse a signed week offset such as `-2` or `+1`.
///
/// Unsigned values (`23`) would mean an absolute week and are rejected.
pub fn parse_week_offset(arg: &str) -> Result<i64> {
    let invalid = || NoteError::InvalidOffset(arg.to_string());

    let caps = OFFSET_RE.captures(arg).ok_or_else(invalid)?;
    let sign = match caps.get(1).map(|m| m.as_str()) {
        Some("-") => -1,
        Some("+") => 1,
        // TODO: accept absolute week numbers, e.g. `23` for week 23.
        _ => return Err(invalid()),
    };
    let magnitude: i64 = caps[2].parse().map_err(|_| invalid())?;
    Ok(sign * magnitude)
}
