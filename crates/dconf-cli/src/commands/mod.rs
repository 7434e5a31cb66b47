//! Command implementations for dconf-cli

pub mod reconcile;

pub use reconcile::{RunOptions, run_reconcile, run_with_store};
