//! Error types for dconf-core

use std::path::PathBuf;

use dconf_store::StoreError;

/// Result type for dconf-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, snapshotting or applying
///
/// Building namespaces and computing a reconciliation never fail; every
/// variant here comes from input documents or from the store boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A desired-state document or a store dump is malformed
    #[error("Failed to parse {document} at line {line}: {message}")]
    Parse {
        document: String,
        line: usize,
        message: String,
    },

    /// A desired-state document could not be read
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The live snapshot could not be taken
    #[error("Failed to read store snapshot under {root}: {source}")]
    Snapshot {
        root: String,
        #[source]
        source: StoreError,
    },

    /// An action could not be rendered to the output
    #[error("Failed to write output: {0}")]
    Render(#[source] std::io::Error),

    /// A write or reset was rejected by the store; the run stops here
    #[error("Failed to {operation} {key} ({applied} of {total} changes applied): {source}")]
    ApplyFailed {
        /// `write` or `reset`
        operation: &'static str,
        /// Fully qualified store key
        key: String,
        /// Changes successfully dispatched before this one
        applied: usize,
        /// Changes the plan would have dispatched in total
        total: usize,
        #[source]
        source: StoreError,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(document: &str, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            document: document.to_string(),
            line,
            message: message.into(),
        }
    }
}
