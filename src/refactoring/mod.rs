//! Refactoring descriptors: the terminal output of a diff run.
//!
//! Every detected change is a [`Refactoring`] variant. All variants share one
//! contract, implemented by matching on the variant:
//!
//! | Function | Meaning |
//! |----------|---------|
//! | [`Refactoring::kind`] / [`Refactoring::display_name`] | fixed tag and report name |
//! | [`Refactoring::left_side`] / [`Refactoring::right_side`] | source ranges before / after, primary first, never empty |
//! | [`Refactoring::involved_classes_before`] / [`Refactoring::involved_classes_after`] | `(file path, class name)` pairs touched |
//! | `PartialEq` / `Hash` | defining nodes only |
//! | `Display` | one tab-separated report line |
//!
//! ## Report lines
//!
//! ```text
//! Rename Attribute    private count : int    to    private total : int    in class org.acme.Shop
//! Extract Class       org.acme.Cart          from class    org.acme.Shop
//! ```
//!
//! (Columns are separated by single tabs.)

pub mod descriptor;
pub mod kind;

pub use descriptor::{ExtractedClass, InvolvedClass, Refactoring};
pub use kind::RefactoringKind;
