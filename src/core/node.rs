//! Identity and equality contracts shared by all model node kinds.
//!
//! Every node kind answers two questions:
//!
//! | Question | Used for |
//! |----------|----------|
//! | [`ModelNode::same_identity`] | pairing a node in the old snapshot with one in the new |
//! | [`ModelNode::structurally_equal`] | deciding whether a paired node changed |
//!
//! Structural equality never looks at source locations, so a node that only
//! moved within its file is not reported as changed.

/// Identity and structural equality for a model node kind
pub trait ModelNode {
    /// True if `other` denotes the same element, possibly changed
    fn same_identity(&self, other: &Self) -> bool;

    /// True if `other` is identical to `self` apart from source location
    fn structurally_equal(&self, other: &Self) -> bool;
}

/// Nodes that carry a (possibly qualified) type or element name
pub trait QualifiedName {
    fn qualified_name(&self) -> &str;

    /// Simple name with generic arguments and array dimensions removed
    fn class_type(&self) -> &str {
        simple_name(self.qualified_name())
    }
}

/// Strip generic arguments, array dimensions and the package qualifier.
///
/// `java.util.List<String>` becomes `List`, `int[]` becomes `int`.
#[must_use]
pub fn simple_name(name: &str) -> &str {
    let erased = name
        .find(['<', '['])
        .map_or(name, |idx| &name[..idx])
        .trim();
    erased.rsplit('.').next().unwrap_or(erased)
}
