//! The reconcile command
//!
//! Loads the desired-state files, snapshots the store under the root,
//! prints the diff and, with `--apply`, pushes it to the store.

use std::io::Write;
use std::path::PathBuf;

use dconf_core::{ApplyReport, ReconcileEngine, ReconcileOptions, load_files};
use dconf_store::{DconfStore, Store};
use serde_json::json;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::output::render_line;

/// Everything a reconcile run needs besides the store
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub configs: Vec<PathBuf>,
    pub root: String,
    pub apply: bool,
    pub show_ignored: bool,
    pub json: bool,
    pub color: bool,
}

impl RunOptions {
    pub fn from_cli(cli: &Cli, color: bool) -> Self {
        Self {
            configs: cli.config.clone(),
            root: cli.root.clone(),
            apply: cli.apply,
            show_ignored: cli.show_ignored,
            json: cli.json,
            color,
        }
    }

    fn reconcile_options(&self) -> ReconcileOptions {
        ReconcileOptions {
            apply: self.apply,
            show_ignored: self.show_ignored,
        }
    }
}

/// Run against the dconf program named on the command line, printing to
/// stdout.
pub fn run_reconcile(cli: &Cli, color: bool) -> Result<ApplyReport> {
    let store = DconfStore::with_program(&cli.dconf);
    let options = RunOptions::from_cli(cli, color);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_store(&store, &options, &mut out)
}

/// Run against `store`, writing the diff (or JSON lines) to `out`.
///
/// The desired files are loaded before the store is asked for anything, so
/// a bad input file never leads to a store call.
pub fn run_with_store<S, W>(store: S, options: &RunOptions, out: &mut W) -> Result<ApplyReport>
where
    S: Store,
    W: Write,
{
    if !options.root.starts_with('/') {
        return Err(CliError::user(format!(
            "root must be an absolute path starting with '/', got '{}'",
            options.root
        )));
    }

    let desired = load_files(&options.configs)?;
    tracing::debug!(
        files = options.configs.len(),
        sections = desired.len(),
        "loaded desired state"
    );

    let engine = ReconcileEngine::new(store, options.root.as_str());
    let reconcile_options = options.reconcile_options();
    let plan = engine.plan(&desired, reconcile_options)?;

    if options.json {
        // one object per action, then one summary object
        let report = engine.execute(&plan, reconcile_options, |action| {
            serde_json::to_writer(&mut *out, action)?;
            writeln!(out)
        })?;
        let summary = json!({
            "root": engine.root(),
            "applied": options.apply,
            "summary": plan.summary(),
            "report": report,
        });
        writeln!(out, "{}", serde_json::to_string(&summary)?)?;
        out.flush()?;
        return Ok(report);
    }

    let report = engine.execute(&plan, reconcile_options, |action| {
        writeln!(out, "{}", render_line(action, options.color))
    })?;
    out.flush()?;
    Ok(report)
}
