//! # refactor-reconcile
//!
//! A library for reconciling two snapshots of a code model and reporting the
//! refactorings that explain their differences.
//!
//! A snapshot lists the classes, module declarations and package-info files
//! of a project, as produced by an external model builder. Given a snapshot
//! before and after an edit, the engine works out which elements were
//! removed, added, kept unchanged or changed, and what each change means.
//!
//! ## Features
//!
//! - **Generic reconciliation**: identity-based partition of any node list
//! - **Class diffs**: members, modifiers, annotations, imports, encapsulation
//! - **Module and package diffs**: directives, javadoc, comments, imports
//! - **Candidate ranking**: Extract Class / Extract Subclass target selection
//! - **Call trees**: bounded multi-hop call evidence
//! - **Similarity oracle**: guarded edit distance and trivial-change checks
//!
//! ## Example
//!
//! ```rust,no_run
//! use refactor_reconcile::{DiffEngine, Model};
//! use std::path::Path;
//!
//! let before = Model::load_from_file(Path::new("before.json")).unwrap();
//! let after = Model::load_from_file(Path::new("after.json")).unwrap();
//!
//! let diff = DiffEngine::new().diff(&before, &after).unwrap();
//! for refactoring in diff.refactorings() {
//!     println!("{refactoring}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Model node types and snapshots
//! - [`matching`]: Reconciler, entity diffs, ranking and call trees
//! - [`refactoring`]: Refactoring descriptors
//! - [`utils`]: Similarity oracle
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod refactoring;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::model::{Attribute, ClassModel, Operation, TypeRef};
pub use core::node::ModelNode;
pub use core::snapshot::{Model, ModelError};
pub use matching::engine::{DiffConfig, DiffEngine, DiffError, ModelDiff, Watchdog};
pub use matching::reconcile::ListDiff;
pub use refactoring::{Refactoring, RefactoringKind};
