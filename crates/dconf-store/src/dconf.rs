//! Subprocess-backed store that shells out to the `dconf` CLI
//!
//! Every operation is a single blocking `dconf` invocation. Output is
//! captured and non-zero exits are turned into [`StoreError::CommandFailed`].

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Result, StoreError};
use crate::traits::Store;

/// Default program name looked up on `PATH`
pub const DEFAULT_PROGRAM: &str = "dconf";

/// [`Store`] implementation driving the `dconf` command-line tool.
#[derive(Debug, Clone)]
pub struct DconfStore {
    program: PathBuf,
}

impl Default for DconfStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DconfStore {
    /// Use `dconf` from `PATH`.
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Use a specific program instead of `dconf`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The program this store invokes.
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn render(&self, args: &[&str]) -> String {
        let mut command = self.program.display().to_string();
        for arg in args {
            command.push(' ');
            command.push_str(arg);
        }
        command
    }

    /// Run the program with `args` and return its stdout.
    fn run(&self, args: &[&str]) -> Result<Vec<u8>> {
        tracing::debug!(command = %self.render(args), "invoking store");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| StoreError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(output.stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            Err(StoreError::CommandFailed {
                command: self.render(args),
                code,
                stderr,
            })
        }
    }
}

impl Store for DconfStore {
    fn dump(&self, root: &str) -> Result<String> {
        let stdout = self.run(&["dump", root])?;
        String::from_utf8(stdout).map_err(|e| StoreError::InvalidOutput {
            command: self.render(&["dump", root]),
            message: e.to_string(),
        })
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.run(&["write", key, value]).map(|_| ())
    }

    fn reset(&self, key: &str) -> Result<()> {
        self.run(&["reset", key]).map(|_| ())
    }
}
