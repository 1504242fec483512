//! Diffs of module declarations and package-info files.
//!
//! Both carry the same declaration header (javadoc, annotations, imports,
//! comments), diffed by [`DeclarationDiff`]. Modules additionally diff their
//! directive lists. Every list goes through its own reconciler pass with
//! structural changes split out, and the name-changed flag is plain string
//! inequality.

use crate::core::model::{Annotation, Comment, Import, Javadoc};
use crate::core::module::{ModuleDirective, ModuleModel, PackageInfo};
use crate::matching::reconcile::ListDiff;

/// Javadoc present on both sides of a declaration
#[derive(Debug, Clone, Copy)]
pub struct JavadocDiff<'a> {
    pub before: &'a Javadoc,
    pub after: &'a Javadoc,
}

impl JavadocDiff<'_> {
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.before.text != self.after.text
    }
}

/// Header shared by module and package declarations
#[derive(Debug, Clone)]
pub struct DeclarationDiff<'a> {
    javadoc_diff: Option<JavadocDiff<'a>>,
    annotation_diff: ListDiff<'a, Annotation>,
    import_diff: ListDiff<'a, Import>,
    comment_diff: ListDiff<'a, Comment>,
}

impl<'a> DeclarationDiff<'a> {
    fn compute(
        javadoc: (Option<&'a Javadoc>, Option<&'a Javadoc>),
        annotations: (&'a [Annotation], &'a [Annotation]),
        imports: (&'a [Import], &'a [Import]),
        comments: (&'a [Comment], &'a [Comment]),
    ) -> Self {
        let javadoc_diff = match javadoc {
            (Some(before), Some(after)) => Some(JavadocDiff { before, after }),
            _ => None,
        };
        Self {
            javadoc_diff,
            annotation_diff: ListDiff::compute(annotations.0, annotations.1)
                .split_structural_changes(),
            import_diff: ListDiff::compute(imports.0, imports.1).split_structural_changes(),
            comment_diff: ListDiff::compute(comments.0, comments.1).split_structural_changes(),
        }
    }

    /// `None` unless both sides carry a javadoc
    #[must_use]
    pub fn javadoc_diff(&self) -> Option<&JavadocDiff<'a>> {
        self.javadoc_diff.as_ref()
    }

    #[must_use]
    pub fn annotation_diff(&self) -> &ListDiff<'a, Annotation> {
        &self.annotation_diff
    }

    #[must_use]
    pub fn import_diff(&self) -> &ListDiff<'a, Import> {
        &self.import_diff
    }

    #[must_use]
    pub fn comment_diff(&self) -> &ListDiff<'a, Comment> {
        &self.comment_diff
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.javadoc_diff.is_some_and(|d| d.is_changed())
            && self.annotation_diff.is_empty()
            && self.import_diff.is_empty()
            && self.comment_diff.is_empty()
    }
}

/// Differences between two versions of a module declaration
#[derive(Debug, Clone)]
pub struct ModuleDiff<'a> {
    original: &'a ModuleModel,
    next: &'a ModuleModel,
    name_changed: bool,
    declaration: DeclarationDiff<'a>,
    directive_diff: ListDiff<'a, ModuleDirective>,
}

impl<'a> ModuleDiff<'a> {
    #[must_use]
    pub fn compute(original: &'a ModuleModel, next: &'a ModuleModel) -> Self {
        let diff = Self {
            original,
            next,
            name_changed: original.name != next.name,
            declaration: DeclarationDiff::compute(
                (original.javadoc.as_ref(), next.javadoc.as_ref()),
                (&original.annotations, &next.annotations),
                (&original.imports, &next.imports),
                (&original.comments, &next.comments),
            ),
            directive_diff: ListDiff::compute(&original.directives, &next.directives)
                .split_structural_changes(),
        };
        tracing::debug!(
            module = %next.name,
            removed_directives = diff.directive_diff.removed().len(),
            added_directives = diff.directive_diff.added().len(),
            changed_directives = diff.directive_diff.changed().len(),
            "Module diff"
        );
        diff
    }

    #[must_use]
    pub fn original(&self) -> &'a ModuleModel {
        self.original
    }

    #[must_use]
    pub fn next(&self) -> &'a ModuleModel {
        self.next
    }

    #[must_use]
    pub fn is_name_changed(&self) -> bool {
        self.name_changed
    }

    #[must_use]
    pub fn declaration(&self) -> &DeclarationDiff<'a> {
        &self.declaration
    }

    #[must_use]
    pub fn directive_diff(&self) -> &ListDiff<'a, ModuleDirective> {
        &self.directive_diff
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.name_changed
            && self.original.open == self.next.open
            && self.declaration.is_empty()
            && self.directive_diff.is_empty()
    }
}

/// Differences between two versions of a package-info file
#[derive(Debug, Clone)]
pub struct PackageDiff<'a> {
    original: &'a PackageInfo,
    next: &'a PackageInfo,
    name_changed: bool,
    declaration: DeclarationDiff<'a>,
}

impl<'a> PackageDiff<'a> {
    #[must_use]
    pub fn compute(original: &'a PackageInfo, next: &'a PackageInfo) -> Self {
        Self {
            original,
            next,
            name_changed: original.name != next.name,
            declaration: DeclarationDiff::compute(
                (original.javadoc.as_ref(), next.javadoc.as_ref()),
                (&original.annotations, &next.annotations),
                (&original.imports, &next.imports),
                (&original.comments, &next.comments),
            ),
        }
    }

    #[must_use]
    pub fn original(&self) -> &'a PackageInfo {
        self.original
    }

    #[must_use]
    pub fn next(&self) -> &'a PackageInfo {
        self.next
    }

    #[must_use]
    pub fn is_name_changed(&self) -> bool {
        self.name_changed
    }

    #[must_use]
    pub fn declaration(&self) -> &DeclarationDiff<'a> {
        &self.declaration
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.name_changed && self.declaration.is_empty()
    }
}
