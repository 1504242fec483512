//! Structural diffs of a single attribute or operation pair.

use crate::core::model::{structurally_equal_lists, Annotation, Attribute, Operation, TypeRef};
use crate::core::types::Modifier;
use crate::matching::reconcile::ListDiff;
use crate::refactoring::Refactoring;

/// Differences between one attribute before and after the edit
#[derive(Debug, Clone)]
pub struct AttributeDiff<'a> {
    removed: &'a Attribute,
    added: &'a Attribute,
    renamed: bool,
    type_changed: bool,
    visibility_changed: bool,
    modifier_changes: Vec<(Modifier, bool)>,
    initializer_changed: bool,
    annotation_diff: ListDiff<'a, Annotation>,
    getter: Option<&'a Operation>,
    setter: Option<&'a Operation>,
}

impl<'a> AttributeDiff<'a> {
    /// Compare two attributes. `added_operations` are the operations added to
    /// the enclosing class, searched for a new getter or setter.
    #[must_use]
    pub fn new(removed: &'a Attribute, added: &'a Attribute, added_operations: &[&'a Operation]) -> Self {
        let modifier_changes = [
            (Modifier::Static, removed.is_static, added.is_static),
            (Modifier::Final, removed.is_final, added.is_final),
            (Modifier::Volatile, removed.is_volatile, added.is_volatile),
            (Modifier::Transient, removed.is_transient, added.is_transient),
        ]
        .into_iter()
        .filter(|(_, before, after)| before != after)
        .map(|(modifier, _, after)| (modifier, after))
        .collect();

        Self {
            removed,
            added,
            renamed: removed.name != added.name,
            type_changed: removed.type_ref != added.type_ref,
            visibility_changed: removed.visibility != added.visibility,
            modifier_changes,
            initializer_changed: removed.initializer != added.initializer,
            annotation_diff: ListDiff::compute(&removed.annotations, &added.annotations)
                .split_structural_changes(),
            getter: added_operations
                .iter()
                .copied()
                .find(|op| is_getter_for(op, added)),
            setter: added_operations
                .iter()
                .copied()
                .find(|op| is_setter_for(op, added)),
        }
    }

    #[must_use]
    pub fn removed(&self) -> &'a Attribute {
        self.removed
    }

    #[must_use]
    pub fn added(&self) -> &'a Attribute {
        self.added
    }

    #[must_use]
    pub fn is_renamed(&self) -> bool {
        self.renamed
    }

    #[must_use]
    pub fn is_type_changed(&self) -> bool {
        self.type_changed
    }

    #[must_use]
    pub fn annotation_diff(&self) -> &ListDiff<'a, Annotation> {
        &self.annotation_diff
    }

    /// A getter or setter for the attribute was added
    #[must_use]
    pub fn encapsulated(&self) -> bool {
        self.getter.is_some() || self.setter.is_some()
    }

    /// Nothing about the declaration changed. Encapsulation is not
    /// considered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.renamed
            && !self.type_changed
            && !self.visibility_changed
            && self.modifier_changes.is_empty()
            && !self.initializer_changed
            && self.annotation_diff.is_empty()
    }

    #[must_use]
    pub fn refactorings(&self) -> Vec<Refactoring<'a>> {
        let (before, after) = (self.removed, self.added);
        let mut out = Vec::new();

        if self.renamed {
            out.push(Refactoring::RenameAttribute { before, after });
        }
        if self.type_changed {
            out.push(Refactoring::ChangeAttributeType { before, after });
        }
        if self.visibility_changed {
            out.push(Refactoring::ChangeAttributeAccessModifier { before, after });
        }
        for &(modifier, now_set) in &self.modifier_changes {
            out.push(if now_set {
                Refactoring::AddAttributeModifier {
                    modifier,
                    before,
                    after,
                }
            } else {
                Refactoring::RemoveAttributeModifier {
                    modifier,
                    before,
                    after,
                }
            });
        }
        if self.encapsulated() {
            out.push(Refactoring::EncapsulateAttribute {
                before,
                after,
                getter: self.getter,
                setter: self.setter,
            });
        }
        for &annotation in self.annotation_diff.added() {
            out.push(Refactoring::AddAttributeAnnotation {
                annotation,
                before,
                after,
            });
        }
        for &annotation in self.annotation_diff.removed() {
            out.push(Refactoring::RemoveAttributeAnnotation {
                annotation,
                before,
                after,
            });
        }
        for &(annotation_before, annotation_after) in self.annotation_diff.changed() {
            out.push(Refactoring::ModifyAttributeAnnotation {
                annotation_before,
                annotation_after,
                before,
                after,
            });
        }
        out
    }
}

impl PartialEq for AttributeDiff<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.removed == other.removed && self.added == other.added
    }
}

fn is_getter_for(operation: &Operation, attribute: &Attribute) -> bool {
    operation.is_getter()
        && operation
            .return_type
            .as_ref()
            .is_some_and(|t| t.same_class_type(&attribute.type_ref))
        && operation.references_variable(&attribute.name)
}

fn is_setter_for(operation: &Operation, attribute: &Attribute) -> bool {
    operation.is_setter()
        && operation
            .parameters
            .first()
            .is_some_and(|p| p.type_ref.same_class_type(&attribute.type_ref))
        && operation.references_variable(&attribute.name)
}

/// Differences between one operation before and after the edit
#[derive(Debug, Clone)]
pub struct OperationDiff<'a> {
    removed: &'a Operation,
    added: &'a Operation,
    renamed: bool,
    visibility_changed: bool,
    return_type_changed: bool,
    modifier_changes: Vec<(Modifier, bool)>,
    type_parameters_changed: bool,
    annotation_diff: ListDiff<'a, Annotation>,
    exception_diff: ListDiff<'a, TypeRef>,
}

impl<'a> OperationDiff<'a> {
    #[must_use]
    pub fn new(removed: &'a Operation, added: &'a Operation) -> Self {
        let modifier_changes = [
            (Modifier::Abstract, removed.is_abstract, added.is_abstract),
            (Modifier::Static, removed.is_static, added.is_static),
            (Modifier::Final, removed.is_final, added.is_final),
            (
                Modifier::Synchronized,
                removed.is_synchronized,
                added.is_synchronized,
            ),
        ]
        .into_iter()
        .filter(|(_, before, after)| before != after)
        .map(|(modifier, _, after)| (modifier, after))
        .collect();

        Self {
            removed,
            added,
            renamed: removed.name != added.name,
            visibility_changed: removed.visibility != added.visibility,
            return_type_changed: removed.return_type != added.return_type,
            modifier_changes,
            type_parameters_changed: !structurally_equal_lists(
                &removed.type_parameters,
                &added.type_parameters,
            ),
            annotation_diff: ListDiff::compute(&removed.annotations, &added.annotations)
                .split_structural_changes(),
            exception_diff: ListDiff::compute(&removed.thrown_exceptions, &added.thrown_exceptions),
        }
    }

    #[must_use]
    pub fn removed(&self) -> &'a Operation {
        self.removed
    }

    #[must_use]
    pub fn added(&self) -> &'a Operation {
        self.added
    }

    #[must_use]
    pub fn annotation_diff(&self) -> &ListDiff<'a, Annotation> {
        &self.annotation_diff
    }

    #[must_use]
    pub fn exception_diff(&self) -> &ListDiff<'a, TypeRef> {
        &self.exception_diff
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.renamed
            && !self.visibility_changed
            && !self.return_type_changed
            && self.modifier_changes.is_empty()
            && !self.type_parameters_changed
            && self.annotation_diff.is_empty()
            && self.exception_diff.is_empty()
    }

    #[must_use]
    pub fn refactorings(&self) -> Vec<Refactoring<'a>> {
        let (before, after) = (self.removed, self.added);
        let mut out = Vec::new();

        if self.renamed {
            out.push(Refactoring::RenameMethod { before, after });
        }
        if self.return_type_changed {
            out.push(Refactoring::ChangeReturnType { before, after });
        }
        if self.visibility_changed {
            out.push(Refactoring::ChangeOperationAccessModifier { before, after });
        }
        for &(modifier, now_set) in &self.modifier_changes {
            out.push(if now_set {
                Refactoring::AddMethodModifier {
                    modifier,
                    before,
                    after,
                }
            } else {
                Refactoring::RemoveMethodModifier {
                    modifier,
                    before,
                    after,
                }
            });
        }
        for &annotation in self.annotation_diff.added() {
            out.push(Refactoring::AddMethodAnnotation {
                annotation,
                before,
                after,
            });
        }
        for &annotation in self.annotation_diff.removed() {
            out.push(Refactoring::RemoveMethodAnnotation {
                annotation,
                before,
                after,
            });
        }
        for &(annotation_before, annotation_after) in self.annotation_diff.changed() {
            out.push(Refactoring::ModifyMethodAnnotation {
                annotation_before,
                annotation_after,
                before,
                after,
            });
        }

        let thrown_removed = self.exception_diff.removed();
        let thrown_added = self.exception_diff.added();
        if !thrown_removed.is_empty() && !thrown_added.is_empty() {
            out.push(Refactoring::ChangeThrownExceptionType {
                exceptions_before: thrown_removed.to_vec(),
                exceptions_after: thrown_added.to_vec(),
                before,
                after,
            });
        } else {
            for &exception in thrown_added {
                out.push(Refactoring::AddThrownExceptionType {
                    exception,
                    before,
                    after,
                });
            }
            for &exception in thrown_removed {
                out.push(Refactoring::RemoveThrownExceptionType {
                    exception,
                    before,
                    after,
                });
            }
        }
        out
    }
}

impl PartialEq for OperationDiff<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.removed == other.removed && self.added == other.added
    }
}
