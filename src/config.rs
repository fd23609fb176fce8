//! Configuration resolution
//!
//! Settings come from, in increasing precedence: built-in defaults, the
//! optional `<config dir>/note/config.toml`, the `NOTE_DIR` environment
//! variable, and command-line flags.

use serde::Deserialize;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{NoteError, Result};

/// Environment variable overriding the notes directory
pub const NOTE_DIR_ENV: &str = "NOTE_DIR";

/// Environment variable naming the default editor
pub const EDITOR_ENV: &str = "EDITOR";

/// Resolved settings passed into the note manager and the editor launcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of `<year>/<week>.md` files
    pub base_dir: PathBuf,
    /// Editor executable
    pub editor: String,
    /// Commit newly created notes when `base_dir` is inside a git repository
    pub sync_git: bool,
}

/// Optional keys of `config.toml`
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub base_dir: Option<PathBuf>,
    pub editor: Option<String>,
    pub sync_git: Option<bool>,
}

impl FileConfig {
    /// Parse TOML text. `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| NoteError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load `path`, returning `None` when the file does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, path).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(NoteError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }
}

/// Default location of `config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("note").join("config.toml"))
}

impl Config {
    /// Built-in defaults: `<home>/<exe_name>` and `$EDITOR`
    pub fn defaults(exe_name: &str, home: Option<&Path>, editor: Option<OsString>) -> Self {
        Self {
            base_dir: home.map(|h| h.join(exe_name)).unwrap_or_default(),
            editor: editor
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
            sync_git: false,
        }
    }

    /// Overlay values present in a config file
    pub fn merge_file(&mut self, file: FileConfig) {
        if let Some(dir) = file.base_dir {
            self.base_dir = expand_home(&dir, dirs::home_dir().as_deref());
        }
        if let Some(editor) = file.editor {
            self.editor = editor;
        }
        if let Some(sync_git) = file.sync_git {
            self.sync_git = sync_git;
        }
    }

    /// Defaults, then `config_path` (if any), then `NOTE_DIR`
    pub fn load(exe_name: &str, config_path: Option<&Path>) -> Result<Self> {
        let home = dirs::home_dir();
        let mut config = Self::defaults(exe_name, home.as_deref(), std::env::var_os(EDITOR_ENV));

        if let Some(path) = config_path
            && let Some(file) = FileConfig::load(path)?
        {
            log::debug!("loaded configuration from {}", path.display());
            config.merge_file(file);
        }

        if let Some(dir) = std::env::var_os(NOTE_DIR_ENV) {
            config.base_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    /// The base directory must be set for every mode
    pub fn validate(&self) -> Result<()> {
        if self.base_dir.as_os_str().is_empty() {
            return Err(NoteError::InvalidConfig(
                "base directory cannot be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// Editing additionally requires an editor
    pub fn validate_editor(&self) -> Result<()> {
        if self.editor.trim().is_empty() {
            return Err(NoteError::InvalidConfig(
                "editor cannot be blank".to_string(),
            ));
        }
        Ok(())
    }
}

/// Expand a leading `~/` against `home`
pub fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
