//! The [`Store`] trait defining the store adapter interface.
//!
//! The reconciliation engine never talks to dconf directly. It reads a
//! textual snapshot and dispatches single-key writes and resets through
//! this trait, so the backend can be swapped for an in-memory double.

use crate::error::Result;

/// Narrow interface to a hierarchical key/value store.
///
/// Keys are fully qualified slash-separated paths such as
/// `/org/gnome/desktop/interface/clock-format`. All calls are blocking and
/// must complete before the next one is issued.
pub trait Store {
    /// Return the full textual dump of every key under `root`.
    ///
    /// The text uses the INI-like grammar of `dconf dump`: bracketed
    /// section headers relative to `root` followed by `key=value` lines.
    fn dump(&self, root: &str) -> Result<String>;

    /// Set `key` to `value`. The value is passed through verbatim.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`, returning it to its default.
    fn reset(&self, key: &str) -> Result<()>;
}

impl<S: Store + ?Sized> Store for &S {
    fn dump(&self, root: &str) -> Result<String> {
        (**self).dump(root)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn reset(&self, key: &str) -> Result<()> {
        (**self).reset(key)
    }
}
