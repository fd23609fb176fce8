//! External editor launching

use anyhow::{Context, Result, bail};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// An editor executable, e.g. `nvim` or `/usr/bin/code`
#[derive(Debug, Clone)]
pub struct Editor {
    program: String,
}

impl Editor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Whether the editor understands `+<line>` and `+startinsert`
    pub fn supports_line_jump(&self) -> bool {
        let name = Path::new(&self.program)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        matches!(name, "vim" | "nvim" | "vi")
    }

    /// Arguments for opening `path`, jumping to `line` when given and supported
    pub fn args(&self, path: &Path, line: Option<usize>) -> Vec<OsString> {
        let mut args = vec![path.as_os_str().to_os_string()];
        if let Some(line) = line.filter(|&l| l > 0)
            && self.supports_line_jump()
        {
            args.push(format!("+{line}").into());
            args.push("+startinsert".into());
        }
        args
    }

    /// Run the editor attached to the current terminal and wait for it
    pub fn open(&self, path: &Path, line: Option<usize>) -> Result<()> {
        let args = self.args(path, line);
        log::debug!("launching {} {:?}", self.program, args);

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .with_context(|| format!("failed to launch editor '{}'", self.program))?;

        if !status.success() {
            bail!("editor exited with {}", status);
        }
        Ok(())
    }
}
