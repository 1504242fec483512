//! Generic reconciliation of two ordered node lists.
//!
//! [`ListDiff::compute`] partitions an old and a new list into removed, added
//! and common elements using [`ModelNode::same_identity`]. Every element ends
//! up in exactly one bucket:
//!
//! - **removed**: old elements with no identity match in the new list
//! - **added**: new elements with no identity match in the old list
//! - **common**: one pair per distinct identity present on both sides,
//!   pairing the earliest old occurrence with the earliest new occurrence
//! - **changed**: empty after `compute`; filled by
//!   [`ListDiff::split_structural_changes`] and by rename repair
//!
//! Duplicate identities beyond the first occurrence on the old side are
//! absorbed into the common pair of their identity and do not appear as
//! removed.

use crate::core::node::{simple_name, ModelNode, QualifiedName};

/// Removed / added / common / changed partition of two node lists
#[derive(Debug, Clone)]
pub struct ListDiff<'a, T> {
    removed: Vec<&'a T>,
    added: Vec<&'a T>,
    common: Vec<(&'a T, &'a T)>,
    changed: Vec<(&'a T, &'a T)>,
}

impl<'a, T: ModelNode> ListDiff<'a, T> {
    /// Reconcile `old` against `new` by identity
    #[must_use]
    pub fn compute(old: &'a [T], new: &'a [T]) -> Self {
        let mut removed = Vec::new();
        let mut common = Vec::new();

        for (idx, item) in old.iter().enumerate() {
            match new.iter().find(|n| n.same_identity(item)) {
                None => removed.push(item),
                Some(partner) => {
                    let first_occurrence =
                        old.iter().position(|o| o.same_identity(item)) == Some(idx);
                    if first_occurrence {
                        common.push((item, partner));
                    }
                }
            }
        }

        let added = new
            .iter()
            .filter(|n| !old.iter().any(|o| o.same_identity(n)))
            .collect();

        Self {
            removed,
            added,
            common,
            changed: Vec::new(),
        }
    }

    /// Move common pairs that are not structurally equal into `changed`
    #[must_use]
    pub fn split_structural_changes(mut self) -> Self {
        let (same, changed): (Vec<_>, Vec<_>) = self
            .common
            .into_iter()
            .partition(|(old, new)| old.structurally_equal(new));
        self.common = same;
        self.changed.extend(changed);
        self
    }
}

impl<'a, T> ListDiff<'a, T> {
    /// Convert one removed element and one added element into a changed
    /// pair. The first removed element satisfying `before` and the first
    /// added element satisfying `after` are taken; nothing moves unless both
    /// exist. Returns whether a pair was formed.
    pub fn reconcile_rename<B, A>(&mut self, before: B, after: A) -> bool
    where
        B: Fn(&T) -> bool,
        A: Fn(&T) -> bool,
    {
        let old_idx = self.removed.iter().position(|r| before(*r));
        let new_idx = self.added.iter().position(|a| after(*a));
        match (old_idx, new_idx) {
            (Some(o), Some(n)) => {
                let old = self.removed.remove(o);
                let new = self.added.remove(n);
                self.changed.push((old, new));
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn removed(&self) -> &[&'a T] {
        &self.removed
    }

    #[must_use]
    pub fn added(&self) -> &[&'a T] {
        &self.added
    }

    #[must_use]
    pub fn common(&self) -> &[(&'a T, &'a T)] {
        &self.common
    }

    #[must_use]
    pub fn changed(&self) -> &[(&'a T, &'a T)] {
        &self.changed
    }

    /// No removed, added or changed elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty() && self.changed.is_empty()
    }
}

impl<'a, T: QualifiedName> ListDiff<'a, T> {
    /// Rename repair keyed on qualified-name suffixes, e.g. after a confirmed
    /// class rename `Foo` -> `Bar` turn `import a.Foo` / `import a.Bar` into
    /// one changed pair.
    pub fn reconcile_renamed_suffix(&mut self, before: &str, after: &str) -> bool {
        self.reconcile_rename(
            |r| r.qualified_name().ends_with(before),
            |a| a.qualified_name().ends_with(after),
        )
    }

    /// Rename repair keyed on the erased simple class name
    pub fn reconcile_renamed_type(&mut self, before: &str, after: &str) -> bool {
        let before = simple_name(before);
        let after = simple_name(after);
        self.reconcile_rename(|r| r.class_type() == before, |a| a.class_type() == after)
    }
}
