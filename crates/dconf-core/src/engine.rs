//! ReconcileEngine: snapshot, plan and apply against a [`Store`]
//!
//! A run is a strict sequence: take one snapshot of the live store,
//! compute the full plan in memory, then walk it in order, rendering every
//! action before dispatching it. The first store failure aborts the walk.
//!
//! Running two engines against the same root at once is not supported;
//! nothing here guards against lost updates in the store.

use dconf_store::{Store, StoreError};
use serde::Serialize;

use crate::action::Action;
use crate::config::{SectionMap, parse_document};
use crate::namespace::NamespaceClassifier;
use crate::reconcile::{Plan, reconcile};
use crate::{Error, Result};

/// Default store root
pub const DEFAULT_ROOT: &str = "/";

/// Options for planning and executing a reconciliation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Dispatch writes and resets to the store; otherwise only render them
    pub apply: bool,
    /// Report live options outside the managed namespace
    pub show_ignored: bool,
}

/// Outcome of walking a plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// Actions passed to the renderer
    pub rendered: usize,
    /// Writes the store accepted
    pub writes: usize,
    /// Resets the store accepted
    pub resets: usize,
}

/// Drives reconciliation of desired state against one store root.
#[derive(Debug)]
pub struct ReconcileEngine<S> {
    store: S,
    root: String,
}

impl<S: Store> ReconcileEngine<S> {
    pub fn new(store: S, root: impl Into<String>) -> Self {
        Self {
            store,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read and parse the live state under the root.
    pub fn snapshot(&self) -> Result<SectionMap> {
        let dump = self.store.dump(&self.root).map_err(|source| Error::Snapshot {
            root: self.root.clone(),
            source,
        })?;
        let live = parse_document(&format!("dump of {}", self.root), &dump)?;
        tracing::debug!(root = %self.root, sections = live.len(), "took store snapshot");
        Ok(live)
    }

    /// Snapshot the store and compute the plan for `desired`.
    pub fn plan(&self, desired: &SectionMap, options: ReconcileOptions) -> Result<Plan> {
        let live = self.snapshot()?;
        let classifier = NamespaceClassifier::from_sections(desired.keys().map(String::as_str));
        tracing::debug!("managed namespace:\n{}", classifier.managed());
        tracing::debug!("excluded namespace:\n{}", classifier.excluded());

        let plan = Plan::new(reconcile(
            desired,
            &live,
            &classifier,
            options.show_ignored,
        ));
        let summary = plan.summary();
        tracing::info!(
            writes = summary.writes,
            resets = summary.resets,
            superseded = summary.superseded,
            ignored = summary.ignored,
            "computed plan"
        );
        Ok(plan)
    }

    /// Walk `plan` in order.
    ///
    /// `render` sees every action before any attempt to apply it. With
    /// `options.apply` set, writes and non-superseded resets are sent to
    /// the store; the first failure stops the walk and is returned along
    /// with how far it got. A failing `render` stops the walk as well.
    pub fn execute<F>(&self, plan: &Plan, options: ReconcileOptions, mut render: F) -> Result<ApplyReport>
    where
        F: FnMut(&Action) -> std::io::Result<()>,
    {
        let total = plan.summary().dispatched();
        let mut report = ApplyReport::default();

        for action in plan.actions() {
            render(action).map_err(Error::Render)?;
            report.rendered += 1;

            if !options.apply || !action.is_dispatched() {
                continue;
            }

            let key = action.store_key(&self.root);
            let applied = report.writes + report.resets;
            let failed = |operation: &'static str, source: StoreError| Error::ApplyFailed {
                operation,
                key: key.clone(),
                applied,
                total,
                source,
            };

            match action {
                Action::Write { value, .. } => {
                    tracing::debug!(%key, %value, "writing");
                    self.store.write(&key, value).map_err(|e| failed("write", e))?;
                    report.writes += 1;
                }
                Action::Reset { .. } => {
                    tracing::debug!(%key, "resetting");
                    self.store.reset(&key).map_err(|e| failed("reset", e))?;
                    report.resets += 1;
                }
                Action::Ignored { .. } => {}
            }
        }

        if options.apply {
            tracing::info!(writes = report.writes, resets = report.resets, "applied plan");
        }
        Ok(report)
    }

    /// Plan and execute in one go.
    pub fn run<F>(&self, desired: &SectionMap, options: ReconcileOptions, render: F) -> Result<ApplyReport>
    where
        F: FnMut(&Action) -> std::io::Result<()>,
    {
        let plan = self.plan(desired, options)?;
        self.execute(&plan, options, render)
    }
}
