//! Three-way diff of desired state, live state and the managed namespace
//!
//! The output order is part of the contract: sections in lexicographic
//! order, options in lexicographic order within a section, and for a
//! changed option the superseded reset directly before its write. Keys are
//! sorted explicitly here rather than relying on map iteration order.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::action::{Action, ActionKind};
use crate::config::{Section, SectionMap};
use crate::namespace::NamespaceClassifier;
use crate::path::excluded_section;

/// Compute the ordered actions that bring `live` to `desired`.
///
/// - Sections outside the managed namespace are left alone; with
///   `show_ignored` each of their live options is reported as ignored.
/// - A managed section missing from the live store gets one write per
///   desired option.
/// - A managed section present in the live store is diffed option by
///   option. A section managed only through an ancestor rule has no
///   desired options, so all of its live options are reset.
///
/// Pure over its inputs; never fails.
pub fn reconcile(
    desired: &SectionMap,
    live: &SectionMap,
    classifier: &NamespaceClassifier,
    show_ignored: bool,
) -> Vec<Action> {
    let empty = Section::new();
    let sections: BTreeSet<&str> = live
        .keys()
        .chain(desired.keys().filter(|name| excluded_section(name).is_none()))
        .map(String::as_str)
        .collect();

    let mut actions = Vec::new();
    for section in sections {
        let live_options = live.get(section);

        if !classifier.is_managed(section) {
            if let Some(options) = live_options.filter(|_| show_ignored) {
                for option in sorted_keys(options, &empty) {
                    actions.push(Action::ignored(section, option, &options[option]));
                }
            }
            continue;
        }

        let desired_options = desired.get(section).unwrap_or(&empty);
        let Some(live_options) = live_options else {
            for option in sorted_keys(desired_options, &empty) {
                actions.push(Action::write(section, option, &desired_options[option]));
            }
            continue;
        };

        for option in sorted_keys(live_options, desired_options) {
            match (live_options.get(option), desired_options.get(option)) {
                (Some(old), None) => actions.push(Action::reset(section, option, old)),
                (None, Some(new)) => actions.push(Action::write(section, option, new)),
                (Some(old), Some(new)) if old != new => {
                    actions.push(Action::superseded_reset(section, option, old));
                    actions.push(Action::write(section, option, new));
                }
                _ => {}
            }
        }
    }
    actions
}

/// Sorted union of the option names of two sections
fn sorted_keys<'a>(a: &'a Section, b: &'a Section) -> BTreeSet<&'a str> {
    a.keys().chain(b.keys()).map(String::as_str).collect()
}

/// Per-kind tallies of a plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub writes: usize,
    /// Resets that will be dispatched
    pub resets: usize,
    /// Resets only shown ahead of the write that replaces them
    pub superseded: usize,
    pub ignored: usize,
}

impl Summary {
    /// Number of store calls applying the plan makes.
    pub fn dispatched(&self) -> usize {
        self.writes + self.resets
    }
}

/// The ordered result of a reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    actions: Vec<Action>,
}

impl Plan {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for action in &self.actions {
            match action {
                Action::Write { .. } => summary.writes += 1,
                Action::Reset { superseded: true, .. } => summary.superseded += 1,
                Action::Reset { .. } => summary.resets += 1,
                Action::Ignored { .. } => summary.ignored += 1,
            }
        }
        summary
    }

    /// True when applying the plan would change the store.
    pub fn has_changes(&self) -> bool {
        self.actions.iter().any(Action::is_dispatched)
    }

    /// Actions of one kind, in plan order.
    pub fn of_kind(&self, kind: ActionKind) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(move |a| a.kind() == kind)
    }
}

impl From<Vec<Action>> for Plan {
    fn from(actions: Vec<Action>) -> Self {
        Self::new(actions)
    }
}
