//! Managed/excluded namespace classification
//!
//! Desired-state documents declare ownership through their section names.
//! `[org/gnome/desktop]` puts that section and everything beneath it under
//! management; `[-org/gnome/desktop/background]` carves a subtree back out.
//! Exclusion always wins, whatever the relative depth of the two rules.

use crate::path::{excluded_section, segments};
use crate::pathset::PathSet;

/// Decides per section whether it is under management.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceClassifier {
    managed: PathSet,
    excluded: PathSet,
}

impl NamespaceClassifier {
    /// Combine an explicit managed set and excluded set.
    pub fn new(managed: PathSet, excluded: PathSet) -> Self {
        Self { managed, excluded }
    }

    /// Build the classifier from desired-state section names.
    ///
    /// Names starting with the exclusion marker go, marker stripped, into
    /// the excluded set. All other names go into the managed set.
    pub fn from_sections<'a, I>(sections: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut classifier = Self::default();
        for section in sections {
            match excluded_section(section) {
                Some(excluded) => classifier.excluded.add(segments(excluded)),
                None => classifier.managed.add(segments(section)),
            }
        }
        classifier
    }

    /// A section is managed when a managed rule covers it and no exclusion
    /// rule does.
    pub fn is_managed(&self, section: &str) -> bool {
        self.managed.contains(segments(section)) && !self.excluded.contains(segments(section))
    }

    pub fn managed(&self) -> &PathSet {
        &self.managed
    }

    pub fn excluded(&self) -> &PathSet {
        &self.excluded
    }
}
