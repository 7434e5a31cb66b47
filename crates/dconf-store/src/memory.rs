//! In-memory store for testing and dry experiments.
//!
//! [`MemoryStore`] serves a fixed dump text and records every write and
//! reset it receives, in order. It never changes what `dump` returns.

use std::cell::RefCell;
use std::collections::BTreeSet;

use crate::error::{Result, StoreError};
use crate::traits::Store;

/// A single call recorded by [`MemoryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Dump { root: String },
    Write { key: String, value: String },
    Reset { key: String },
}

/// An in-memory, recording implementation of [`Store`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    dump: String,
    failing: BTreeSet<String>,
    calls: RefCell<Vec<StoreCall>>,
}

impl MemoryStore {
    /// Create a store whose snapshot is `dump`.
    pub fn new(dump: impl Into<String>) -> Self {
        Self {
            dump: dump.into(),
            ..Self::default()
        }
    }

    /// Make writes and resets of `key` fail.
    pub fn failing_on(mut self, key: impl Into<String>) -> Self {
        self.failing.insert(key.into());
        self
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.borrow().clone()
    }

    /// `(key, value)` of every write received so far.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                StoreCall::Write { key, value } => Some((key.clone(), value.clone())),
                _ => None,
            })
            .collect()
    }

    /// Keys of every reset received so far.
    pub fn resets(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                StoreCall::Reset { key } => Some(key.clone()),
                _ => None,
            })
            .collect()
    }

    fn check(&self, key: &str) -> Result<()> {
        if self.failing.contains(key) {
            return Err(StoreError::Injected {
                key: key.to_string(),
            });
        }
        Ok(())
    }
}

impl Store for MemoryStore {
    fn dump(&self, root: &str) -> Result<String> {
        self.calls.borrow_mut().push(StoreCall::Dump {
            root: root.to_string(),
        });
        Ok(self.dump.clone())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.check(key)?;
        self.calls.borrow_mut().push(StoreCall::Write {
            key: key.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn reset(&self, key: &str) -> Result<()> {
        self.check(key)?;
        self.calls.borrow_mut().push(StoreCall::Reset {
            key: key.to_string(),
        });
        Ok(())
    }
}
