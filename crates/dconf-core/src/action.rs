//! Actions produced by reconciliation

use std::fmt;

use serde::Serialize;

use crate::path::{display_key, store_key};

/// Kind of an [`Action`], used for rendering and counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Write,
    Reset,
    Ignored,
}

/// One line of a reconciliation diff.
///
/// Each action carries everything needed to render it and, for writes and
/// resets, to dispatch it to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Set `option` in `section` to `value`
    Write {
        section: String,
        option: String,
        value: String,
    },
    /// Remove `option` from `section`; `value` is what the store held.
    ///
    /// A `superseded` reset announces the old value of an option that the
    /// next action overwrites. It is shown but never dispatched, so the
    /// store never passes through an unset state.
    Reset {
        section: String,
        option: String,
        value: String,
        superseded: bool,
    },
    /// A live option outside the managed namespace
    Ignored {
        section: String,
        option: String,
        value: String,
    },
}

impl Action {
    pub fn write(section: &str, option: &str, value: &str) -> Self {
        Self::Write {
            section: section.to_string(),
            option: option.to_string(),
            value: value.to_string(),
        }
    }

    pub fn reset(section: &str, option: &str, value: &str) -> Self {
        Self::Reset {
            section: section.to_string(),
            option: option.to_string(),
            value: value.to_string(),
            superseded: false,
        }
    }

    /// A reset immediately replaced by a write of the same option.
    pub fn superseded_reset(section: &str, option: &str, value: &str) -> Self {
        Self::Reset {
            section: section.to_string(),
            option: option.to_string(),
            value: value.to_string(),
            superseded: true,
        }
    }

    pub fn ignored(section: &str, option: &str, value: &str) -> Self {
        Self::Ignored {
            section: section.to_string(),
            option: option.to_string(),
            value: value.to_string(),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Write { .. } => ActionKind::Write,
            Self::Reset { .. } => ActionKind::Reset,
            Self::Ignored { .. } => ActionKind::Ignored,
        }
    }

    pub fn section(&self) -> &str {
        match self {
            Self::Write { section, .. }
            | Self::Reset { section, .. }
            | Self::Ignored { section, .. } => section,
        }
    }

    pub fn option(&self) -> &str {
        match self {
            Self::Write { option, .. }
            | Self::Reset { option, .. }
            | Self::Ignored { option, .. } => option,
        }
    }

    /// New value for writes, previous value for resets and ignored options.
    pub fn value(&self) -> &str {
        match self {
            Self::Write { value, .. } | Self::Reset { value, .. } | Self::Ignored { value, .. } => {
                value
            }
        }
    }

    /// Whether applying the plan sends this action to the store.
    pub fn is_dispatched(&self) -> bool {
        matches!(
            self,
            Self::Write { .. } | Self::Reset { superseded: false, .. }
        )
    }

    /// `section/option`, as shown in diffs.
    pub fn display_key(&self) -> String {
        display_key(self.section(), self.option())
    }

    /// Fully qualified store key under `root`.
    pub fn store_key(&self, root: &str) -> String {
        store_key(root, self.section(), self.option())
    }
}

/// Renders `section/option=value`, without the kind marker.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.display_key(), self.value())
    }
}
