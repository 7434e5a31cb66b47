//! Shared test utilities for the dconf-manager workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: the reference live dump, desired document and expected output
//! - [`fake`]: [`FakeDconf`], a scripted stand-in for the `dconf` binary (Unix only)

#[cfg(unix)]
pub mod fake;
pub mod fixtures;

#[cfg(unix)]
pub use fake::FakeDconf;
pub use fixtures::{
    DESIRED_CONFIG, EXPECTED_DIFF, EXPECTED_DIFF_WITH_IGNORED, EXPECTED_RESETS, EXPECTED_WRITES,
    LIVE_DUMP, ROOT, write_file,
};
