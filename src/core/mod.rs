//! Code model types compared by the diff engine.
//!
//! A [`Model`] is one snapshot of a project: its classes, module
//! declarations and package declarations. Each node kind implements
//! [`ModelNode`](node::ModelNode), which decides when two nodes from different
//! snapshots denote the same element and when they are unchanged.
//!
//! | Node | Identity | Structural equality adds |
//! |------|----------|--------------------------|
//! | Attribute | name + type | visibility, modifiers, initializer, annotations |
//! | Operation | name + parameter types | parameter names, return type, modifiers, throws |
//! | Annotation | type name | arguments |
//! | Import | name + static + wildcard | nothing |
//! | Comment | trimmed text | exact text, kind |
//! | Module directive | kind + name | modifiers, targets |
//!
//! Snapshots are immutable once loaded; diffs only borrow from them.

pub mod location;
pub mod mapping;
pub mod model;
pub mod module;
pub mod node;
pub mod snapshot;
pub mod types;

pub use snapshot::Model;
