//! Error types for dconf-store

use std::path::PathBuf;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while talking to the configuration store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store program could not be started at all
    #[error("Failed to run {program}: {source}")]
    Spawn {
        /// Program that was invoked
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store program ran but exited with a non-zero status
    #[error("`{command}` failed (exit code {code}): {stderr}")]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Exit code, or -1 when terminated by a signal
        code: i32,
        /// Captured stderr output, trimmed
        stderr: String,
    },

    /// The store produced output that is not valid UTF-8
    #[error("Invalid output from `{command}`: {message}")]
    InvalidOutput { command: String, message: String },

    /// A failure requested by a test double
    #[error("Injected failure for {key}")]
    Injected { key: String },
}
