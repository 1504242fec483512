//! Diff of one class matched between two snapshots.
//!
//! [`ClassDiff::compute`] runs in a fixed order:
//!
//! 1. **Operations**, old->new then new->old. A match needs the same
//!    signature *and* the same parameter names; a same-signature pair whose
//!    parameter names differ is reported as one removed plus one added
//!    operation.
//! 2. **Attributes**, old->new then new->old, matched by name so that a type
//!    change is still a match. Attribute diffs look for getters and setters
//!    among the operations added in step 1, so operations must run first.
//! 3. **Declaration**: visibility, modifiers, declaration kind, superclass,
//!    interfaces, type parameters, annotations and (for top-level classes)
//!    imports.
//!
//! A matched pair whose diff is empty is recorded as a common pair; an
//! attribute pair can still emit Encapsulate Attribute in that case.
//! The value is immutable once built; rename repair consumes it and returns
//! a new one.

use std::cmp::Ordering;

use crate::core::model::{
    Annotation, Attribute, ClassModel, Import, Operation, TypeParameter, TypeRef,
};
use crate::core::node::ModelNode;
use crate::core::types::Modifier;
use crate::matching::member_diff::{AttributeDiff, OperationDiff};
use crate::matching::reconcile::ListDiff;
use crate::refactoring::Refactoring;

/// Everything that changed between two versions of one class
#[derive(Debug, Clone)]
pub struct ClassDiff<'a> {
    original: &'a ClassModel,
    next: &'a ClassModel,

    visibility_changed: bool,
    kind_changed: bool,
    modifier_changes: Vec<(Modifier, bool)>,
    superclass_changed: bool,
    interface_diff: ListDiff<'a, TypeRef>,
    type_parameter_diff: ListDiff<'a, TypeParameter>,
    annotation_diff: ListDiff<'a, Annotation>,
    import_diff: Option<ListDiff<'a, Import>>,

    removed_operations: Vec<&'a Operation>,
    added_operations: Vec<&'a Operation>,
    common_operations: Vec<(&'a Operation, &'a Operation)>,
    operation_diffs: Vec<OperationDiff<'a>>,

    removed_attributes: Vec<&'a Attribute>,
    added_attributes: Vec<&'a Attribute>,
    common_attributes: Vec<(&'a Attribute, &'a Attribute)>,
    attribute_diffs: Vec<AttributeDiff<'a>>,

    refactorings: Vec<Refactoring<'a>>,
}

impl<'a> ClassDiff<'a> {
    /// Diff `original` (before the edit) against `next` (after)
    #[must_use]
    pub fn compute(original: &'a ClassModel, next: &'a ClassModel) -> Self {
        ClassDiffBuilder::new(original, next).build()
    }

    #[must_use]
    pub fn original(&self) -> &'a ClassModel {
        self.original
    }

    #[must_use]
    pub fn next(&self) -> &'a ClassModel {
        self.next
    }

    #[must_use]
    pub fn removed_operations(&self) -> &[&'a Operation] {
        &self.removed_operations
    }

    #[must_use]
    pub fn added_operations(&self) -> &[&'a Operation] {
        &self.added_operations
    }

    #[must_use]
    pub fn common_operations(&self) -> &[(&'a Operation, &'a Operation)] {
        &self.common_operations
    }

    #[must_use]
    pub fn operation_diffs(&self) -> &[OperationDiff<'a>] {
        &self.operation_diffs
    }

    #[must_use]
    pub fn removed_attributes(&self) -> &[&'a Attribute] {
        &self.removed_attributes
    }

    #[must_use]
    pub fn added_attributes(&self) -> &[&'a Attribute] {
        &self.added_attributes
    }

    #[must_use]
    pub fn common_attributes(&self) -> &[(&'a Attribute, &'a Attribute)] {
        &self.common_attributes
    }

    #[must_use]
    pub fn attribute_diffs(&self) -> &[AttributeDiff<'a>] {
        &self.attribute_diffs
    }

    #[must_use]
    pub fn interface_diff(&self) -> &ListDiff<'a, TypeRef> {
        &self.interface_diff
    }

    #[must_use]
    pub fn type_parameter_diff(&self) -> &ListDiff<'a, TypeParameter> {
        &self.type_parameter_diff
    }

    #[must_use]
    pub fn annotation_diff(&self) -> &ListDiff<'a, Annotation> {
        &self.annotation_diff
    }

    /// `None` unless both versions are top-level classes
    #[must_use]
    pub fn import_diff(&self) -> Option<&ListDiff<'a, Import>> {
        self.import_diff.as_ref()
    }

    #[must_use]
    pub fn is_superclass_changed(&self) -> bool {
        self.superclass_changed
    }

    #[must_use]
    pub fn refactorings(&self) -> &[Refactoring<'a>] {
        &self.refactorings
    }

    /// Nothing at all changed between the two versions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.visibility_changed
            && !self.kind_changed
            && self.modifier_changes.is_empty()
            && !self.superclass_changed
            && self.interface_diff.is_empty()
            && self.type_parameter_diff.is_empty()
            && self.annotation_diff.is_empty()
            && self.import_diff.as_ref().map_or(true, ListDiff::is_empty)
            && self.removed_operations.is_empty()
            && self.added_operations.is_empty()
            && self.operation_diffs.is_empty()
            && self.removed_attributes.is_empty()
            && self.added_attributes.is_empty()
            && self.attribute_diffs.is_empty()
            && self.refactorings.is_empty()
    }

    /// Order by the original class name
    #[must_use]
    pub fn compare(&self, other: &ClassDiff<'_>) -> Ordering {
        self.original.name.cmp(&other.original.name)
    }

    /// Removed operations paired with a same-signature counterpart in `class`.
    /// Constructors and `Object` overrides never count.
    #[must_use]
    pub fn removed_operations_found_in(
        &self,
        class: &'a ClassModel,
    ) -> Vec<(&'a Operation, &'a Operation)> {
        self.removed_operations
            .iter()
            .filter(|removed| !removed.is_constructor && !removed.overrides_object())
            .filter_map(|&removed| {
                class
                    .operations
                    .iter()
                    .find(|op| op.equal_signature(removed))
                    .map(|op| (removed, op))
            })
            .collect()
    }

    /// Removed attributes paired with a same-name counterpart in `class`
    #[must_use]
    pub fn removed_attributes_found_in(
        &self,
        class: &'a ClassModel,
    ) -> Vec<(&'a Attribute, &'a Attribute)> {
        self.removed_attributes
            .iter()
            .filter_map(|&removed| class.attribute_with_same_name(removed).map(|a| (removed, a)))
            .collect()
    }

    /// Rename repair for imports after an outer detector confirmed that type
    /// `before` was renamed to `after`
    #[must_use]
    pub fn with_import_rename(mut self, before: &str, after: &str) -> Self {
        if let Some(imports) = self.import_diff.as_mut() {
            imports.reconcile_renamed_suffix(before, after);
        }
        self
    }

    /// Rename repair for attributes: pair a removed attribute named `before`
    /// with an added attribute named `after` and emit their refactorings
    #[must_use]
    pub fn with_attribute_rename(mut self, before: &str, after: &str) -> Self {
        let old_idx = self.removed_attributes.iter().position(|a| a.name == before);
        let new_idx = self.added_attributes.iter().position(|a| a.name == after);
        if let (Some(o), Some(n)) = (old_idx, new_idx) {
            let removed = self.removed_attributes.remove(o);
            let added = self.added_attributes.remove(n);
            let diff = AttributeDiff::new(removed, added, &self.added_operations);
            self.refactorings.extend(diff.refactorings());
            self.attribute_diffs.push(diff);
        }
        self
    }
}

/// Accumulates a [`ClassDiff`] during its construction
struct ClassDiffBuilder<'a> {
    diff: ClassDiff<'a>,
}

impl<'a> ClassDiffBuilder<'a> {
    fn new(original: &'a ClassModel, next: &'a ClassModel) -> Self {
        let modifier_changes = [
            (Modifier::Abstract, original.is_abstract, next.is_abstract),
            (Modifier::Static, original.is_static, next.is_static),
            (Modifier::Final, original.is_final, next.is_final),
        ]
        .into_iter()
        .filter(|(_, before, after)| before != after)
        .map(|(modifier, _, after)| (modifier, after))
        .collect();

        let superclass_changed = match (&original.superclass, &next.superclass) {
            (Some(a), Some(b)) => !a.same_class_type(b),
            (None, None) => false,
            _ => true,
        };

        let import_diff = (original.is_top_level() && next.is_top_level())
            .then(|| ListDiff::compute(&original.imports, &next.imports));

        Self {
            diff: ClassDiff {
                original,
                next,
                visibility_changed: original.visibility != next.visibility,
                kind_changed: original.kind != next.kind,
                modifier_changes,
                superclass_changed,
                interface_diff: ListDiff::compute(
                    &original.implemented_interfaces,
                    &next.implemented_interfaces,
                ),
                type_parameter_diff: ListDiff::compute(
                    &original.type_parameters,
                    &next.type_parameters,
                )
                .split_structural_changes(),
                annotation_diff: ListDiff::compute(&original.annotations, &next.annotations)
                    .split_structural_changes(),
                import_diff,
                removed_operations: Vec::new(),
                added_operations: Vec::new(),
                common_operations: Vec::new(),
                operation_diffs: Vec::new(),
                removed_attributes: Vec::new(),
                added_attributes: Vec::new(),
                common_attributes: Vec::new(),
                attribute_diffs: Vec::new(),
                refactorings: Vec::new(),
            },
        }
    }

    fn build(mut self) -> ClassDiff<'a> {
        self.process_operations();
        self.process_attributes();
        self.process_declaration();

        let diff = &self.diff;
        tracing::debug!(
            class = %diff.next.name,
            removed_operations = diff.removed_operations.len(),
            added_operations = diff.added_operations.len(),
            changed_operations = diff.operation_diffs.len(),
            removed_attributes = diff.removed_attributes.len(),
            added_attributes = diff.added_attributes.len(),
            changed_attributes = diff.attribute_diffs.len(),
            refactorings = diff.refactorings.len(),
            "Class diff"
        );
        self.diff
    }

    fn process_operations(&mut self) {
        let (original, next) = (self.diff.original, self.diff.next);

        for operation in &original.operations {
            match matching_operation(&next.operations, operation) {
                Some(partner) => self.register_operation_pair(operation, partner),
                None => self.diff.removed_operations.push(operation),
            }
        }
        for operation in &next.operations {
            match matching_operation(&original.operations, operation) {
                Some(partner) => self.register_operation_pair(partner, operation),
                None => self.diff.added_operations.push(operation),
            }
        }
    }

    fn register_operation_pair(&mut self, before: &'a Operation, after: &'a Operation) {
        let diff = OperationDiff::new(before, after);
        if self.diff.operation_diffs.contains(&diff)
            || self.diff.common_operations.contains(&(before, after))
        {
            return;
        }

        if diff.is_empty() {
            self.diff.common_operations.push((before, after));
        } else {
            self.diff.refactorings.extend(diff.refactorings());
            self.diff.operation_diffs.push(diff);
        }
    }

    fn process_attributes(&mut self) {
        let (original, next) = (self.diff.original, self.diff.next);

        for attribute in &original.attributes {
            match next.attribute_with_same_name(attribute) {
                Some(partner) => self.register_attribute_pair(attribute, partner),
                None => self.diff.removed_attributes.push(attribute),
            }
        }
        for attribute in &next.attributes {
            match original.attribute_with_same_name(attribute) {
                Some(partner) => self.register_attribute_pair(partner, attribute),
                None => self.diff.added_attributes.push(attribute),
            }
        }
    }

    fn register_attribute_pair(&mut self, before: &'a Attribute, after: &'a Attribute) {
        let diff = AttributeDiff::new(before, after, &self.diff.added_operations);
        if self.diff.attribute_diffs.contains(&diff)
            || self.diff.common_attributes.contains(&(before, after))
        {
            return;
        }

        if diff.is_empty() {
            self.diff.common_attributes.push((before, after));
            if diff.encapsulated() {
                self.diff.refactorings.extend(diff.refactorings());
            }
        } else {
            self.diff.refactorings.extend(diff.refactorings());
            self.diff.attribute_diffs.push(diff);
        }
    }

    fn process_declaration(&mut self) {
        let (before, after) = (self.diff.original, self.diff.next);
        let mut found = Vec::new();

        if self.diff.visibility_changed {
            found.push(Refactoring::ChangeClassAccessModifier { before, after });
        }
        for &(modifier, now_set) in &self.diff.modifier_changes {
            found.push(if now_set {
                Refactoring::AddClassModifier {
                    modifier,
                    before,
                    after,
                }
            } else {
                Refactoring::RemoveClassModifier {
                    modifier,
                    before,
                    after,
                }
            });
        }
        if self.diff.kind_changed {
            found.push(Refactoring::ChangeTypeDeclarationKind { before, after });
        }
        for &annotation in self.diff.annotation_diff.added() {
            found.push(Refactoring::AddClassAnnotation {
                annotation,
                before,
                after,
            });
        }
        for &annotation in self.diff.annotation_diff.removed() {
            found.push(Refactoring::RemoveClassAnnotation {
                annotation,
                before,
                after,
            });
        }
        for &(annotation_before, annotation_after) in self.diff.annotation_diff.changed() {
            found.push(Refactoring::ModifyClassAnnotation {
                annotation_before,
                annotation_after,
                before,
                after,
            });
        }

        self.diff.refactorings.extend(found);
    }
}

/// First operation with the same signature and parameter names
fn matching_operation<'a>(candidates: &'a [Operation], operation: &Operation) -> Option<&'a Operation> {
    candidates
        .iter()
        .find(|c| c.same_identity(operation) && c.equal_parameter_names(operation))
}
