//! Reconciliation and diff engine.
//!
//! This module turns two snapshots of a code model into removed, added,
//! common and changed elements plus the refactorings they imply:
//!
//! - [`ListDiff`]: generic reconciler over any [`ModelNode`](crate::core::node::ModelNode) list
//! - [`ClassDiff`], [`ModuleDiff`], [`PackageDiff`]: per-entity orchestration
//! - [`Candidate`]: ranking of competing refactoring targets
//! - [`CallTree`]: on-demand multi-hop call evidence
//! - [`DiffEngine`]: model-level entry point producing a [`ModelDiff`]
//!
//! ## Matching
//!
//! Elements are matched by identity (name, signature, etc. depending on the
//! node kind). For duplicate identities the earliest occurrence wins; no
//! global optimum is attempted. Matched pairs are then compared structurally:
//! equal pairs are *common*, the rest *changed*.
//!
//! ## Example
//!
//! ```rust,no_run
//! use refactor_reconcile::{DiffEngine, Model};
//! use std::path::Path;
//!
//! let before = Model::load_from_file(Path::new("before.json")).unwrap();
//! let after = Model::load_from_file(Path::new("after.json")).unwrap();
//! let diff = DiffEngine::new().diff(&before, &after).unwrap();
//! for refactoring in diff.refactorings() {
//!     println!("{refactoring}");
//! }
//! ```

pub mod call_tree;
pub mod class_diff;
pub mod engine;
pub mod member_diff;
pub mod module_diff;
pub mod ranking;
pub mod reconcile;

pub use call_tree::{CallTree, CallTreeCache, CallTreeNode, InvocationResolver, NodeId};
pub use class_diff::ClassDiff;
pub use engine::{DiffConfig, DiffEngine, DiffError, ModelDiff, Watchdog};
pub use member_diff::{AttributeDiff, OperationDiff};
pub use module_diff::{ModuleDiff, PackageDiff};
pub use ranking::Candidate;
pub use reconcile::ListDiff;
