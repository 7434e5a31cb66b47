//! Reconciliation engine for dconf-manager
//!
//! This crate compares a declarative description of dconf settings with the
//! live store and works out the minimal, ordered set of writes and resets
//! that brings the store in line:
//!
//! - **PathSet**: hierarchical set of slash-delimited paths with prefix closure
//! - **NamespaceClassifier**: managed vs. excluded sections, exclusion wins
//! - **Config loading**: INI-like documents, overlaid in order
//! - **reconcile**: the three-way diff producing [`Action`]s
//! - **ReconcileEngine**: snapshot, plan and apply through a [`dconf_store::Store`]
//!
//! # Architecture
//!
//! ```text
//!                  dconf-cli
//!                      |
//!                 dconf-core
//!                      |
//!                 dconf-store
//! ```
//!
//! # Example
//!
//! ```
//! use dconf_core::{ReconcileEngine, ReconcileOptions, load_documents};
//! use dconf_store::MemoryStore;
//!
//! let desired = load_documents([("desired.ini", "[org/app]\ntheme='dark'\n")]).unwrap();
//! let store = MemoryStore::new("[org/app]\ntheme='light'\nsize=3\n");
//! let engine = ReconcileEngine::new(&store, "/");
//!
//! let plan = engine.plan(&desired, ReconcileOptions::default()).unwrap();
//! let lines: Vec<String> = plan.actions().iter().map(|a| a.to_string()).collect();
//! assert_eq!(lines, ["org/app/size=3", "org/app/theme='light'", "org/app/theme='dark'"]);
//! ```

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod namespace;
pub mod path;
pub mod pathset;
pub mod reconcile;

pub use action::{Action, ActionKind};
pub use config::{Section, SectionMap, load_documents, load_files, overlay, parse_document};
pub use engine::{ApplyReport, DEFAULT_ROOT, ReconcileEngine, ReconcileOptions};
pub use error::{Error, Result};
pub use namespace::NamespaceClassifier;
pub use pathset::PathSet;
pub use reconcile::{Plan, Summary, reconcile};
