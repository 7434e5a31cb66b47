//! [`FakeDconf`]: a shell script standing in for the `dconf` binary.
//!
//! The script serves a canned dump, appends every invocation to a log file
//! and can be told to fail writes/resets of one key. Only available on Unix.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding a fake `dconf` executable.
///
/// # Example
///
/// ```rust,no_run
/// use dconf_test_utils::FakeDconf;
///
/// let fake = FakeDconf::new("[a]\nk=1\n");
/// // point the code under test at fake.program() ...
/// assert!(fake.calls().is_empty());
/// ```
pub struct FakeDconf {
    temp_dir: TempDir,
    failing: Option<String>,
}

impl FakeDconf {
    /// Create a fake whose `dump` prints `dump` regardless of the root.
    pub fn new(dump: &str) -> Self {
        let fake = Self {
            temp_dir: TempDir::new().unwrap(),
            failing: None,
        };
        fs::write(fake.dump_path(), dump).unwrap();
        fs::write(fake.log_path(), "").unwrap();
        fake.install();
        fake
    }

    /// Make `write`/`reset` of `key` exit non-zero with a message on stderr.
    pub fn failing_on(mut self, key: &str) -> Self {
        self.failing = Some(key.to_string());
        self.install();
        self
    }

    /// Path of the fake executable.
    pub fn program(&self) -> PathBuf {
        self.temp_dir.path().join("dconf")
    }

    /// Every invocation so far, as its space-joined argument list.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Directory holding the script, usable as scratch space.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    fn dump_path(&self) -> PathBuf {
        self.temp_dir.path().join("dump.ini")
    }

    fn log_path(&self) -> PathBuf {
        self.temp_dir.path().join("calls.log")
    }

    fn install(&self) {
        let failing = self.failing.as_deref().unwrap_or("");
        let script = format!(
            r#"#!/bin/sh
printf '%s\n' "$*" >> '{log}'
case "$1" in
    dump)
        cat '{dump}'
        ;;
    write|reset)
        if [ -n '{failing}' ] && [ "$2" = '{failing}' ]; then
            echo "error: permission denied for $2" >&2
            exit 1
        fi
        ;;
    *)
        echo "error: unknown command $1" >&2
        exit 2
        ;;
esac
"#,
            log = self.log_path().display(),
            dump = self.dump_path().display(),
            failing = failing,
        );

        let program = self.program();
        fs::write(&program, script).unwrap();
        let mut perms = fs::metadata(&program).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&program, perms).unwrap();
    }
}
