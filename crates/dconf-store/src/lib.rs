//! Store adapter for dconf-manager
//!
//! Provides the narrow [`Store`] interface the reconciliation engine talks
//! through, along with two implementations:
//!
//! - [`DconfStore`]: shells out to the `dconf` CLI (`dump`, `write`, `reset`)
//! - [`MemoryStore`]: serves a fixed snapshot and records every call
//!
//! # Example
//!
//! ```
//! use dconf_store::{MemoryStore, Store};
//!
//! let store = MemoryStore::new("[org/example]\nenabled=true\n");
//! assert!(store.dump("/").unwrap().contains("enabled=true"));
//!
//! store.write("/org/example/enabled", "false").unwrap();
//! assert_eq!(store.writes().len(), 1);
//! ```

pub mod dconf;
pub mod error;
pub mod memory;
pub mod traits;

pub use dconf::{DEFAULT_PROGRAM, DconfStore};
pub use error::{Result, StoreError};
pub use memory::{MemoryStore, StoreCall};
pub use traits::Store;
