use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use crate::core::location::CodeRange;
use crate::core::mapping::OperationMapping;
use crate::core::model::{Annotation, Attribute, ClassModel, Operation, TypeRef};
use crate::core::types::Modifier;
use crate::refactoring::kind::RefactoringKind;

/// `(file path, class name)` touched by a refactoring
pub type InvolvedClass<'a> = (&'a str, &'a str);

/// Payload shared by Extract Class and Extract Subclass
#[derive(Debug, Clone)]
pub struct ExtractedClass<'a> {
    pub extracted: &'a ClassModel,
    pub source_before: &'a ClassModel,
    pub source_after: &'a ClassModel,
    /// Removed source operations paired with their copies in `extracted`
    pub moved_operations: Vec<(&'a Operation, &'a Operation)>,
    /// Removed source attributes paired with their copies in `extracted`
    pub moved_attributes: Vec<(&'a Attribute, &'a Attribute)>,
    /// Field of the extracted type added to the source, if any
    pub attribute_of_extracted_type: Option<&'a Attribute>,
}

/// A detected change between two snapshots.
///
/// Every variant borrows the model nodes it relates. Equality and hashing
/// only consider the defining nodes, so two descriptors built independently
/// for the same change are equal.
#[derive(Debug, Clone)]
pub enum Refactoring<'a> {
    RenameAttribute {
        before: &'a Attribute,
        after: &'a Attribute,
    },
    ChangeAttributeType {
        before: &'a Attribute,
        after: &'a Attribute,
    },
    ChangeAttributeAccessModifier {
        before: &'a Attribute,
        after: &'a Attribute,
    },
    AddAttributeModifier {
        modifier: Modifier,
        before: &'a Attribute,
        after: &'a Attribute,
    },
    RemoveAttributeModifier {
        modifier: Modifier,
        before: &'a Attribute,
        after: &'a Attribute,
    },
    EncapsulateAttribute {
        before: &'a Attribute,
        after: &'a Attribute,
        getter: Option<&'a Operation>,
        setter: Option<&'a Operation>,
    },
    AddAttributeAnnotation {
        annotation: &'a Annotation,
        before: &'a Attribute,
        after: &'a Attribute,
    },
    RemoveAttributeAnnotation {
        annotation: &'a Annotation,
        before: &'a Attribute,
        after: &'a Attribute,
    },
    ModifyAttributeAnnotation {
        annotation_before: &'a Annotation,
        annotation_after: &'a Annotation,
        before: &'a Attribute,
        after: &'a Attribute,
    },
    RenameMethod {
        before: &'a Operation,
        after: &'a Operation,
    },
    ChangeReturnType {
        before: &'a Operation,
        after: &'a Operation,
    },
    ChangeOperationAccessModifier {
        before: &'a Operation,
        after: &'a Operation,
    },
    AddMethodModifier {
        modifier: Modifier,
        before: &'a Operation,
        after: &'a Operation,
    },
    RemoveMethodModifier {
        modifier: Modifier,
        before: &'a Operation,
        after: &'a Operation,
    },
    AddMethodAnnotation {
        annotation: &'a Annotation,
        before: &'a Operation,
        after: &'a Operation,
    },
    RemoveMethodAnnotation {
        annotation: &'a Annotation,
        before: &'a Operation,
        after: &'a Operation,
    },
    ModifyMethodAnnotation {
        annotation_before: &'a Annotation,
        annotation_after: &'a Annotation,
        before: &'a Operation,
        after: &'a Operation,
    },
    AddThrownExceptionType {
        exception: &'a TypeRef,
        before: &'a Operation,
        after: &'a Operation,
    },
    RemoveThrownExceptionType {
        exception: &'a TypeRef,
        before: &'a Operation,
        after: &'a Operation,
    },
    ChangeThrownExceptionType {
        exceptions_before: Vec<&'a TypeRef>,
        exceptions_after: Vec<&'a TypeRef>,
        before: &'a Operation,
        after: &'a Operation,
    },
    /// `inlined` was removed and its body merged into the mapped target
    InlineOperation {
        inlined: &'a Operation,
        mapping: &'a OperationMapping<'a>,
    },
    /// `mapping.operation1` was replaced by the parameterized
    /// `mapping.operation2`
    ParameterizeTest {
        mapping: &'a OperationMapping<'a>,
    },
    ChangeClassAccessModifier {
        before: &'a ClassModel,
        after: &'a ClassModel,
    },
    AddClassModifier {
        modifier: Modifier,
        before: &'a ClassModel,
        after: &'a ClassModel,
    },
    RemoveClassModifier {
        modifier: Modifier,
        before: &'a ClassModel,
        after: &'a ClassModel,
    },
    ChangeTypeDeclarationKind {
        before: &'a ClassModel,
        after: &'a ClassModel,
    },
    AddClassAnnotation {
        annotation: &'a Annotation,
        before: &'a ClassModel,
        after: &'a ClassModel,
    },
    RemoveClassAnnotation {
        annotation: &'a Annotation,
        before: &'a ClassModel,
        after: &'a ClassModel,
    },
    ModifyClassAnnotation {
        annotation_before: &'a Annotation,
        annotation_after: &'a Annotation,
        before: &'a ClassModel,
        after: &'a ClassModel,
    },
    ExtractClass(ExtractedClass<'a>),
    ExtractSubclass(ExtractedClass<'a>),
}

/// The before/after element pair every refactoring is anchored on
#[derive(Debug, Clone, Copy)]
enum Subject<'a> {
    Attribute(&'a Attribute, &'a Attribute),
    Operation(&'a Operation, &'a Operation),
    Class(&'a ClassModel, &'a ClassModel),
}

impl<'a> Subject<'a> {
    fn before_range(self) -> CodeRange<'a> {
        match self {
            Self::Attribute(a, _) => attribute_range(a, "original attribute declaration"),
            Self::Operation(o, _) => operation_range(o, "original method declaration"),
            Self::Class(c, _) => class_range(c, "original type declaration"),
        }
    }

    fn after_range(self) -> CodeRange<'a> {
        match self {
            Self::Attribute(_, a) => attribute_range(a, "attribute declaration after change"),
            Self::Operation(_, o) => operation_range(o, "method declaration after change"),
            Self::Class(_, c) => class_range(c, "type declaration after change"),
        }
    }

    fn involved_before(self) -> InvolvedClass<'a> {
        match self {
            Self::Attribute(a, _) => (a.location.file_path.as_str(), a.class_name.as_str()),
            Self::Operation(o, _) => (o.location.file_path.as_str(), o.class_name.as_str()),
            Self::Class(c, _) => (c.location.file_path.as_str(), c.name.as_str()),
        }
    }

    fn involved_after(self) -> InvolvedClass<'a> {
        match self {
            Self::Attribute(_, a) => (a.location.file_path.as_str(), a.class_name.as_str()),
            Self::Operation(_, o) => (o.location.file_path.as_str(), o.class_name.as_str()),
            Self::Class(_, c) => (c.location.file_path.as_str(), c.name.as_str()),
        }
    }

    fn describe_before(self) -> String {
        match self {
            Self::Attribute(a, _) => a.to_string(),
            Self::Operation(o, _) => o.to_string(),
            Self::Class(c, _) => c.name.clone(),
        }
    }

    fn describe_after(self) -> String {
        match self {
            Self::Attribute(_, a) => a.to_string(),
            Self::Operation(_, o) => o.to_string(),
            Self::Class(_, c) => c.name.clone(),
        }
    }

    fn class_after(self) -> &'a str {
        self.involved_after().1
    }

    fn entities(self) -> [Entity<'a>; 2] {
        match self {
            Self::Attribute(b, a) => [Entity::Attribute(b), Entity::Attribute(a)],
            Self::Operation(b, a) => [Entity::Operation(b), Entity::Operation(a)],
            Self::Class(b, a) => [Entity::Class(b), Entity::Class(a)],
        }
    }
}

/// Nodes that define a refactoring's identity
#[derive(Debug, PartialEq, Eq, Hash)]
enum Entity<'a> {
    Attribute(&'a Attribute),
    Operation(&'a Operation),
    Class(&'a ClassModel),
    Annotation(&'a Annotation),
    Type(&'a TypeRef),
    Modifier(Modifier),
}

/// Fields of one tab-separated report line
struct ReportLine<'a> {
    before: String,
    separator: &'static str,
    after: String,
    in_class: Option<&'a str>,
    from_class: Option<&'a str>,
}

impl<'a> Refactoring<'a> {
    #[must_use]
    pub fn kind(&self) -> RefactoringKind {
        match self {
            Self::RenameAttribute { .. } => RefactoringKind::RenameAttribute,
            Self::ChangeAttributeType { .. } => RefactoringKind::ChangeAttributeType,
            Self::ChangeAttributeAccessModifier { .. } => {
                RefactoringKind::ChangeAttributeAccessModifier
            }
            Self::AddAttributeModifier { .. } => RefactoringKind::AddAttributeModifier,
            Self::RemoveAttributeModifier { .. } => RefactoringKind::RemoveAttributeModifier,
            Self::EncapsulateAttribute { .. } => RefactoringKind::EncapsulateAttribute,
            Self::AddAttributeAnnotation { .. } => RefactoringKind::AddAttributeAnnotation,
            Self::RemoveAttributeAnnotation { .. } => RefactoringKind::RemoveAttributeAnnotation,
            Self::ModifyAttributeAnnotation { .. } => RefactoringKind::ModifyAttributeAnnotation,
            Self::RenameMethod { .. } => RefactoringKind::RenameMethod,
            Self::ChangeReturnType { .. } => RefactoringKind::ChangeReturnType,
            Self::ChangeOperationAccessModifier { .. } => {
                RefactoringKind::ChangeOperationAccessModifier
            }
            Self::AddMethodModifier { .. } => RefactoringKind::AddMethodModifier,
            Self::RemoveMethodModifier { .. } => RefactoringKind::RemoveMethodModifier,
            Self::AddMethodAnnotation { .. } => RefactoringKind::AddMethodAnnotation,
            Self::RemoveMethodAnnotation { .. } => RefactoringKind::RemoveMethodAnnotation,
            Self::ModifyMethodAnnotation { .. } => RefactoringKind::ModifyMethodAnnotation,
            Self::AddThrownExceptionType { .. } => RefactoringKind::AddThrownExceptionType,
            Self::RemoveThrownExceptionType { .. } => RefactoringKind::RemoveThrownExceptionType,
            Self::ChangeThrownExceptionType { .. } => RefactoringKind::ChangeThrownExceptionType,
            Self::InlineOperation { .. } => RefactoringKind::InlineMethod,
            Self::ParameterizeTest { .. } => RefactoringKind::ParameterizeTest,
            Self::ChangeClassAccessModifier { .. } => RefactoringKind::ChangeClassAccessModifier,
            Self::AddClassModifier { .. } => RefactoringKind::AddClassModifier,
            Self::RemoveClassModifier { .. } => RefactoringKind::RemoveClassModifier,
            Self::ChangeTypeDeclarationKind { .. } => RefactoringKind::ChangeTypeDeclarationKind,
            Self::AddClassAnnotation { .. } => RefactoringKind::AddClassAnnotation,
            Self::RemoveClassAnnotation { .. } => RefactoringKind::RemoveClassAnnotation,
            Self::ModifyClassAnnotation { .. } => RefactoringKind::ModifyClassAnnotation,
            Self::ExtractClass(_) => RefactoringKind::ExtractClass,
            Self::ExtractSubclass(_) => RefactoringKind::ExtractSubclass,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        self.kind().display_name()
    }

    fn subject(&self) -> Subject<'a> {
        match self {
            Self::RenameAttribute { before, after }
            | Self::ChangeAttributeType { before, after }
            | Self::ChangeAttributeAccessModifier { before, after }
            | Self::AddAttributeModifier { before, after, .. }
            | Self::RemoveAttributeModifier { before, after, .. }
            | Self::EncapsulateAttribute { before, after, .. }
            | Self::AddAttributeAnnotation { before, after, .. }
            | Self::RemoveAttributeAnnotation { before, after, .. }
            | Self::ModifyAttributeAnnotation { before, after, .. } => {
                Subject::Attribute(*before, *after)
            }
            Self::RenameMethod { before, after }
            | Self::ChangeReturnType { before, after }
            | Self::ChangeOperationAccessModifier { before, after }
            | Self::AddMethodModifier { before, after, .. }
            | Self::RemoveMethodModifier { before, after, .. }
            | Self::AddMethodAnnotation { before, after, .. }
            | Self::RemoveMethodAnnotation { before, after, .. }
            | Self::ModifyMethodAnnotation { before, after, .. }
            | Self::AddThrownExceptionType { before, after, .. }
            | Self::RemoveThrownExceptionType { before, after, .. }
            | Self::ChangeThrownExceptionType { before, after, .. } => {
                Subject::Operation(*before, *after)
            }
            Self::InlineOperation { mapping, .. } | Self::ParameterizeTest { mapping } => {
                Subject::Operation(mapping.operation1, mapping.operation2)
            }
            Self::ChangeClassAccessModifier { before, after }
            | Self::AddClassModifier { before, after, .. }
            | Self::RemoveClassModifier { before, after, .. }
            | Self::ChangeTypeDeclarationKind { before, after }
            | Self::AddClassAnnotation { before, after, .. }
            | Self::RemoveClassAnnotation { before, after, .. }
            | Self::ModifyClassAnnotation { before, after, .. } => Subject::Class(*before, *after),
            Self::ExtractClass(e) | Self::ExtractSubclass(e) => {
                Subject::Class(e.source_before, e.source_after)
            }
        }
    }

    /// Evidence in the snapshot before the change, primary range first
    #[must_use]
    pub fn left_side(&self) -> Vec<CodeRange<'a>> {
        let mut ranges = Vec::new();
        match self {
            Self::RemoveAttributeAnnotation { annotation, .. }
            | Self::RemoveMethodAnnotation { annotation, .. }
            | Self::RemoveClassAnnotation { annotation, .. } => {
                ranges.push(annotation_range(*annotation, "removed annotation"));
            }
            Self::ModifyAttributeAnnotation {
                annotation_before, ..
            }
            | Self::ModifyMethodAnnotation {
                annotation_before, ..
            }
            | Self::ModifyClassAnnotation {
                annotation_before, ..
            } => {
                ranges.push(annotation_range(*annotation_before, "original annotation"));
            }
            Self::InlineOperation { inlined, .. } => {
                ranges.push(operation_range(*inlined, "inlined method declaration"));
            }
            _ => {}
        }

        ranges.push(self.subject().before_range());

        if let Self::ExtractClass(e) | Self::ExtractSubclass(e) = self {
            for (before, _) in &e.moved_operations {
                ranges.push(operation_range(*before, "original method declaration"));
            }
            for (before, _) in &e.moved_attributes {
                ranges.push(attribute_range(*before, "original attribute declaration"));
            }
        }
        ranges
    }

    /// Evidence in the snapshot after the change, primary range first
    #[must_use]
    pub fn right_side(&self) -> Vec<CodeRange<'a>> {
        let mut ranges = Vec::new();
        match self {
            Self::AddAttributeAnnotation { annotation, .. }
            | Self::AddMethodAnnotation { annotation, .. }
            | Self::AddClassAnnotation { annotation, .. } => {
                ranges.push(annotation_range(*annotation, "added annotation"));
            }
            Self::ModifyAttributeAnnotation {
                annotation_after, ..
            }
            | Self::ModifyMethodAnnotation {
                annotation_after, ..
            }
            | Self::ModifyClassAnnotation {
                annotation_after, ..
            } => {
                ranges.push(annotation_range(*annotation_after, "modified annotation"));
            }
            Self::ExtractClass(e) | Self::ExtractSubclass(e) => {
                ranges.push(class_range(e.extracted, "extracted type declaration"));
            }
            _ => {}
        }

        ranges.push(self.subject().after_range());

        match self {
            Self::EncapsulateAttribute { getter, setter, .. } => {
                if let Some(getter) = *getter {
                    ranges.push(operation_range(getter, "added getter method"));
                }
                if let Some(setter) = *setter {
                    ranges.push(operation_range(setter, "added setter method"));
                }
            }
            Self::ExtractClass(e) | Self::ExtractSubclass(e) => {
                for (_, after) in &e.moved_operations {
                    ranges.push(operation_range(*after, "extracted method declaration"));
                }
                for (_, after) in &e.moved_attributes {
                    ranges.push(attribute_range(*after, "extracted attribute declaration"));
                }
                if let Some(attribute) = e.attribute_of_extracted_type {
                    ranges.push(attribute_range(attribute, "attribute of extracted type"));
                }
            }
            _ => {}
        }
        ranges
    }

    /// Classes touched in the snapshot before the change
    #[must_use]
    pub fn involved_classes_before(&self) -> BTreeSet<InvolvedClass<'a>> {
        let mut classes = BTreeSet::from([self.subject().involved_before()]);
        if let Self::InlineOperation { inlined, .. } = self {
            classes.insert((inlined.location.file_path.as_str(), inlined.class_name.as_str()));
        }
        classes
    }

    /// Classes touched in the snapshot after the change
    #[must_use]
    pub fn involved_classes_after(&self) -> BTreeSet<InvolvedClass<'a>> {
        let mut classes = BTreeSet::from([self.subject().involved_after()]);
        if let Self::ExtractClass(e) | Self::ExtractSubclass(e) = self {
            classes.insert((e.extracted.location.file_path.as_str(), e.extracted.name.as_str()));
        }
        classes
    }

    /// Annotation in its post-change state, or the removed one when it no
    /// longer exists. `None` for refactorings that are not about annotations.
    #[must_use]
    pub fn current_annotation(&self) -> Option<&'a Annotation> {
        match self {
            Self::AddAttributeAnnotation { annotation, .. }
            | Self::AddMethodAnnotation { annotation, .. }
            | Self::AddClassAnnotation { annotation, .. }
            | Self::RemoveAttributeAnnotation { annotation, .. }
            | Self::RemoveMethodAnnotation { annotation, .. }
            | Self::RemoveClassAnnotation { annotation, .. } => Some(*annotation),
            Self::ModifyAttributeAnnotation {
                annotation_after, ..
            }
            | Self::ModifyMethodAnnotation {
                annotation_after, ..
            }
            | Self::ModifyClassAnnotation {
                annotation_after, ..
            } => Some(*annotation_after),
            _ => None,
        }
    }

    fn defining_entities(&self) -> Vec<Entity<'a>> {
        let mut entities = Vec::from(self.subject().entities());
        match self {
            Self::AddAttributeModifier { modifier, .. }
            | Self::RemoveAttributeModifier { modifier, .. }
            | Self::AddMethodModifier { modifier, .. }
            | Self::RemoveMethodModifier { modifier, .. }
            | Self::AddClassModifier { modifier, .. }
            | Self::RemoveClassModifier { modifier, .. } => {
                entities.push(Entity::Modifier(*modifier));
            }
            Self::AddAttributeAnnotation { annotation, .. }
            | Self::RemoveAttributeAnnotation { annotation, .. }
            | Self::AddMethodAnnotation { annotation, .. }
            | Self::RemoveMethodAnnotation { annotation, .. }
            | Self::AddClassAnnotation { annotation, .. }
            | Self::RemoveClassAnnotation { annotation, .. } => {
                entities.push(Entity::Annotation(*annotation));
            }
            Self::ModifyAttributeAnnotation {
                annotation_before,
                annotation_after,
                ..
            }
            | Self::ModifyMethodAnnotation {
                annotation_before,
                annotation_after,
                ..
            }
            | Self::ModifyClassAnnotation {
                annotation_before,
                annotation_after,
                ..
            } => {
                entities.push(Entity::Annotation(*annotation_before));
                entities.push(Entity::Annotation(*annotation_after));
            }
            Self::AddThrownExceptionType { exception, .. }
            | Self::RemoveThrownExceptionType { exception, .. } => {
                entities.push(Entity::Type(*exception));
            }
            Self::ChangeThrownExceptionType {
                exceptions_before,
                exceptions_after,
                ..
            } => {
                entities.extend(exceptions_before.iter().map(|t| Entity::Type(*t)));
                entities.extend(exceptions_after.iter().map(|t| Entity::Type(*t)));
            }
            Self::InlineOperation { inlined, .. } => entities.push(Entity::Operation(*inlined)),
            Self::ExtractClass(e) | Self::ExtractSubclass(e) => {
                entities.push(Entity::Class(e.extracted));
            }
            _ => {}
        }
        entities
    }

    fn report_line(&self) -> ReportLine<'a> {
        let subject = self.subject();
        let in_class = Some(subject.class_after());
        let line = |before: String, separator, after: String| ReportLine {
            before,
            separator,
            after,
            in_class,
            from_class: None,
        };

        match self {
            Self::AddAttributeModifier { modifier, .. } | Self::AddMethodModifier { modifier, .. } => {
                line(modifier.to_string(), "to", subject.describe_after())
            }
            Self::RemoveAttributeModifier { modifier, .. }
            | Self::RemoveMethodModifier { modifier, .. } => {
                line(modifier.to_string(), "from", subject.describe_before())
            }
            Self::AddAttributeAnnotation { annotation, .. }
            | Self::AddMethodAnnotation { annotation, .. } => {
                line(annotation.to_string(), "to", subject.describe_after())
            }
            Self::RemoveAttributeAnnotation { annotation, .. }
            | Self::RemoveMethodAnnotation { annotation, .. } => {
                line(annotation.to_string(), "from", subject.describe_before())
            }
            Self::ModifyAttributeAnnotation {
                annotation_before,
                annotation_after,
                ..
            }
            | Self::ModifyMethodAnnotation {
                annotation_before,
                annotation_after,
                ..
            } => line(
                annotation_before.to_string(),
                "to",
                annotation_after.to_string(),
            ),
            Self::AddThrownExceptionType { exception, .. } => {
                line(exception.to_string(), "to", subject.describe_after())
            }
            Self::RemoveThrownExceptionType { exception, .. } => {
                line(exception.to_string(), "from", subject.describe_before())
            }
            Self::ChangeThrownExceptionType {
                exceptions_before,
                exceptions_after,
                ..
            } => line(join(exceptions_before), "to", join(exceptions_after)),
            Self::InlineOperation { inlined, .. } => {
                line(inlined.to_string(), "inlined to", subject.describe_after())
            }
            Self::ParameterizeTest { .. } => {
                line(subject.describe_before(), "with", subject.describe_after())
            }
            Self::AddClassModifier { modifier, .. } => ReportLine {
                in_class: None,
                ..line(modifier.to_string(), "to", subject.describe_after())
            },
            Self::RemoveClassModifier { modifier, .. } => ReportLine {
                in_class: None,
                ..line(modifier.to_string(), "from", subject.describe_before())
            },
            Self::AddClassAnnotation { annotation, .. } => ReportLine {
                in_class: None,
                ..line(annotation.to_string(), "to", subject.describe_after())
            },
            Self::RemoveClassAnnotation { annotation, .. } => ReportLine {
                in_class: None,
                ..line(annotation.to_string(), "from", subject.describe_before())
            },
            Self::ModifyClassAnnotation {
                annotation_before,
                annotation_after,
                ..
            } => ReportLine {
                in_class: None,
                from_class: Some(subject.class_after()),
                ..line(
                    annotation_before.to_string(),
                    "to",
                    annotation_after.to_string(),
                )
            },
            Self::ChangeClassAccessModifier { before, after } => ReportLine {
                in_class: None,
                from_class: Some(subject.class_after()),
                ..line(before.visibility.to_string(), "to", after.visibility.to_string())
            },
            Self::ChangeTypeDeclarationKind { before, after } => ReportLine {
                in_class: None,
                from_class: Some(subject.class_after()),
                ..line(before.kind.to_string(), "to", after.kind.to_string())
            },
            Self::ExtractClass(e) | Self::ExtractSubclass(e) => ReportLine {
                in_class: None,
                ..line(e.extracted.name.clone(), "from class", e.source_before.name.clone())
            },
            _ => line(subject.describe_before(), "to", subject.describe_after()),
        }
    }
}

impl PartialEq for Refactoring<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.defining_entities() == other.defining_entities()
    }
}

impl Eq for Refactoring<'_> {}

impl Hash for Refactoring<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.defining_entities().hash(state);
    }
}

/// Tab-separated report line:
/// `Name\tbefore\tseparator\tafter[\tin class C][\tfrom class C]`
impl std::fmt::Display for Refactoring<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let line = self.report_line();
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.display_name(),
            line.before,
            line.separator,
            line.after
        )?;
        if let Some(class) = line.in_class {
            write!(f, "\tin class {class}")?;
        }
        if let Some(class) = line.from_class {
            write!(f, "\tfrom class {class}")?;
        }
        Ok(())
    }
}

fn attribute_range<'a>(attribute: &'a Attribute, description: &'static str) -> CodeRange<'a> {
    attribute
        .location
        .code_range()
        .with_description(description)
        .with_code_element(attribute)
}

fn operation_range<'a>(operation: &'a Operation, description: &'static str) -> CodeRange<'a> {
    operation
        .location
        .code_range()
        .with_description(description)
        .with_code_element(operation)
}

fn class_range<'a>(class: &'a ClassModel, description: &'static str) -> CodeRange<'a> {
    class
        .location
        .code_range()
        .with_description(description)
        .with_code_element(&class.name)
}

fn annotation_range<'a>(annotation: &'a Annotation, description: &'static str) -> CodeRange<'a> {
    annotation
        .location
        .code_range()
        .with_description(description)
        .with_code_element(annotation)
}

fn join(types: &[&TypeRef]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::location::LocationInfo;
    use crate::core::mapping::StatementMapping;
    use crate::core::model::Parameter;
    use crate::core::types::{TypeKind, Visibility};
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn attribute(name: &str, type_name: &str) -> Attribute {
        let mut attr = Attribute::new(name, type_name);
        attr.visibility = Visibility::Private;
        attr.class_name = "org.acme.Shop".to_string();
        attr.location = LocationInfo::new("src/org/acme/Shop.java", 4, 4);
        attr
    }

    fn operation(name: &str) -> Operation {
        let mut op = Operation::new(name);
        op.return_type = Some(TypeRef::new("void"));
        op.class_name = "org.acme.ShopTest".to_string();
        op.location = LocationInfo::new("src/org/acme/ShopTest.java", 10, 20);
        op
    }

    fn class(name: &str, file: &str) -> ClassModel {
        let mut class = ClassModel::new(name, "org.acme");
        class.location = LocationInfo::new(file, 1, 100);
        class
    }

    fn hash_of(r: &Refactoring<'_>) -> u64 {
        let mut hasher = DefaultHasher::new();
        r.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_rename_attribute_report_line() {
        let before = attribute("count", "int");
        let after = attribute("total", "int");
        let r = Refactoring::RenameAttribute {
            before: &before,
            after: &after,
        };
        assert_eq!(
            r.to_string(),
            "Rename Attribute\tprivate count : int\tto\tprivate total : int\tin class org.acme.Shop"
        );
        assert_eq!(r.kind(), RefactoringKind::RenameAttribute);
    }

    #[test]
    fn test_extract_class_report_line_and_classes() {
        let source_before = class("org.acme.Shop", "src/org/acme/Shop.java");
        let source_after = class("org.acme.Shop", "src/org/acme/Shop.java");
        let extracted = class("org.acme.Cart", "src/org/acme/Cart.java");
        let r = Refactoring::ExtractClass(ExtractedClass {
            extracted: &extracted,
            source_before: &source_before,
            source_after: &source_after,
            moved_operations: Vec::new(),
            moved_attributes: Vec::new(),
            attribute_of_extracted_type: None,
        });
        assert_eq!(
            r.to_string(),
            "Extract Class\torg.acme.Cart\tfrom class\torg.acme.Shop"
        );
        assert_eq!(
            r.involved_classes_before(),
            BTreeSet::from([("src/org/acme/Shop.java", "org.acme.Shop")])
        );
        assert_eq!(r.involved_classes_after().len(), 2);
        assert_eq!(r.right_side()[0].description, "extracted type declaration");
    }

    #[test]
    fn test_parameterize_test_equality_ignores_mapping_instance() {
        let removed = operation("testAdd");
        let parameterized = operation("testAddParameterized");
        let first = OperationMapping::new(&removed, &parameterized);
        let mut second = OperationMapping::new(&removed, &parameterized);
        second.mappings.push(StatementMapping {
            before: crate::core::mapping::CodeFragment {
                text: "assertEquals(2, add(1, 1));".to_string(),
                location: LocationInfo::new("src/org/acme/ShopTest.java", 11, 11),
            },
            after: crate::core::mapping::CodeFragment {
                text: "assertEquals(expected, add(a, b));".to_string(),
                location: LocationInfo::new("src/org/acme/ShopTest.java", 12, 12),
            },
        });

        let a = Refactoring::ParameterizeTest { mapping: &first };
        let b = Refactoring::ParameterizeTest { mapping: &second };
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let other = operation("testSub");
        let third = OperationMapping::new(&other, &parameterized);
        let c = Refactoring::ParameterizeTest { mapping: &third };
        assert_ne!(a, c);
    }

    #[test]
    fn test_parameterize_test_reads_operations_from_mapping() {
        let removed = operation("testAdd");
        let parameterized = operation("testAddParameterized");
        let mapping = OperationMapping::new(&removed, &parameterized);
        let r = Refactoring::ParameterizeTest { mapping: &mapping };
        assert_eq!(
            r.to_string(),
            "Parameterize Test\tpublic testAdd() : void\twith\tpublic testAddParameterized() : void\tin class org.acme.ShopTest"
        );
        assert_eq!(r.left_side()[0].code_element.as_deref(), Some("public testAdd() : void"));
    }

    #[test]
    fn test_equality_ignores_derived_state() {
        let before = attribute("count", "int");
        let after = attribute("count", "long");
        let getter = operation("getCount");
        let a = Refactoring::EncapsulateAttribute {
            before: &before,
            after: &after,
            getter: Some(&getter),
            setter: None,
        };
        let b = Refactoring::EncapsulateAttribute {
            before: &before,
            after: &after,
            getter: None,
            setter: None,
        };
        assert_eq!(a, b);
        assert_eq!(a.right_side().len(), 2);
        assert_eq!(b.right_side().len(), 1);

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_kind_participates_in_equality() {
        let before = attribute("count", "int");
        let after = attribute("total", "long");
        let rename = Refactoring::RenameAttribute {
            before: &before,
            after: &after,
        };
        let retype = Refactoring::ChangeAttributeType {
            before: &before,
            after: &after,
        };
        assert_ne!(rename, retype);
    }

    #[test]
    fn test_current_annotation() {
        let before = operation("run");
        let after = operation("run");
        let old = Annotation::new("Deprecated");
        let mut new = Annotation::new("Deprecated");
        new.value = Some("since = \"2\"".to_string());

        let added = Refactoring::AddMethodAnnotation {
            annotation: &new,
            before: &before,
            after: &after,
        };
        let removed = Refactoring::RemoveMethodAnnotation {
            annotation: &old,
            before: &before,
            after: &after,
        };
        let modified = Refactoring::ModifyMethodAnnotation {
            annotation_before: &old,
            annotation_after: &new,
            before: &before,
            after: &after,
        };
        let rename = Refactoring::RenameMethod {
            before: &before,
            after: &after,
        };
        assert_eq!(added.current_annotation(), Some(&new));
        assert_eq!(removed.current_annotation(), Some(&old));
        assert_eq!(modified.current_annotation(), Some(&new));
        assert_eq!(rename.current_annotation(), None);
        assert_eq!(
            added.to_string(),
            "Add Method Annotation\t@Deprecated(since = \"2\")\tto\tpublic run() : void\tin class org.acme.ShopTest"
        );
    }

    #[test]
    fn test_class_level_report_lines() {
        let mut before = class("org.acme.Shop", "src/org/acme/Shop.java");
        let mut after = before.clone();
        after.kind = TypeKind::Interface;
        let r = Refactoring::ChangeTypeDeclarationKind {
            before: &before,
            after: &after,
        };
        assert_eq!(
            r.to_string(),
            "Change Type Declaration Kind\tclass\tto\tinterface\tfrom class org.acme.Shop"
        );

        before.visibility = Visibility::Public;
        after.visibility = Visibility::Package;
        let r = Refactoring::ChangeClassAccessModifier {
            before: &before,
            after: &after,
        };
        assert_eq!(
            r.to_string(),
            "Change Class Access Modifier\tpublic\tto\tpackage\tfrom class org.acme.Shop"
        );

        let r = Refactoring::AddClassModifier {
            modifier: Modifier::Final,
            before: &before,
            after: &after,
        };
        assert_eq!(r.to_string(), "Add Class Modifier\tfinal\tto\torg.acme.Shop");
    }

    #[test]
    fn test_inline_operation_sides() {
        let mut inlined = operation("helper");
        inlined.class_name = "org.acme.Util".to_string();
        inlined.location = LocationInfo::new("src/org/acme/Util.java", 5, 9);
        let mut target_before = operation("process");
        target_before.parameters.push(Parameter::new("x", "int"));
        let target_after = target_before.clone();
        let mapping = OperationMapping::new(&target_before, &target_after);

        let r = Refactoring::InlineOperation {
            inlined: &inlined,
            mapping: &mapping,
        };
        assert_eq!(r.left_side().len(), 2);
        assert_eq!(r.left_side()[0].description, "inlined method declaration");
        assert_eq!(r.right_side().len(), 1);
        assert_eq!(r.involved_classes_before().len(), 2);
        assert_eq!(r.involved_classes_after().len(), 1);
        assert!(r.to_string().starts_with("Inline Method\tpublic helper() : void\tinlined to\t"));
    }

    #[test]
    fn test_every_variant_has_evidence_on_both_sides() {
        let a1 = attribute("count", "int");
        let a2 = attribute("total", "long");
        let o1 = operation("run");
        let o2 = operation("execute");
        let c1 = class("org.acme.Shop", "src/org/acme/Shop.java");
        let c2 = class("org.acme.Shop", "src/org/acme/Shop.java");
        let c3 = class("org.acme.Cart", "src/org/acme/Cart.java");
        let ann = Annotation::new("Override");
        let ex = TypeRef::new("IOException");
        let mapping = OperationMapping::new(&o1, &o2);
        let extracted = ExtractedClass {
            extracted: &c3,
            source_before: &c1,
            source_after: &c2,
            moved_operations: vec![(&o1, &o2)],
            moved_attributes: vec![(&a1, &a2)],
            attribute_of_extracted_type: Some(&a2),
        };

        let all = vec![
            Refactoring::RenameAttribute { before: &a1, after: &a2 },
            Refactoring::ChangeAttributeType { before: &a1, after: &a2 },
            Refactoring::ChangeAttributeAccessModifier { before: &a1, after: &a2 },
            Refactoring::AddAttributeModifier { modifier: Modifier::Final, before: &a1, after: &a2 },
            Refactoring::RemoveAttributeModifier { modifier: Modifier::Static, before: &a1, after: &a2 },
            Refactoring::EncapsulateAttribute { before: &a1, after: &a2, getter: Some(&o2), setter: None },
            Refactoring::AddAttributeAnnotation { annotation: &ann, before: &a1, after: &a2 },
            Refactoring::RemoveAttributeAnnotation { annotation: &ann, before: &a1, after: &a2 },
            Refactoring::ModifyAttributeAnnotation { annotation_before: &ann, annotation_after: &ann, before: &a1, after: &a2 },
            Refactoring::RenameMethod { before: &o1, after: &o2 },
            Refactoring::ChangeReturnType { before: &o1, after: &o2 },
            Refactoring::ChangeOperationAccessModifier { before: &o1, after: &o2 },
            Refactoring::AddMethodModifier { modifier: Modifier::Static, before: &o1, after: &o2 },
            Refactoring::RemoveMethodModifier { modifier: Modifier::Static, before: &o1, after: &o2 },
            Refactoring::AddMethodAnnotation { annotation: &ann, before: &o1, after: &o2 },
            Refactoring::RemoveMethodAnnotation { annotation: &ann, before: &o1, after: &o2 },
            Refactoring::ModifyMethodAnnotation { annotation_before: &ann, annotation_after: &ann, before: &o1, after: &o2 },
            Refactoring::AddThrownExceptionType { exception: &ex, before: &o1, after: &o2 },
            Refactoring::RemoveThrownExceptionType { exception: &ex, before: &o1, after: &o2 },
            Refactoring::ChangeThrownExceptionType { exceptions_before: vec![&ex], exceptions_after: vec![], before: &o1, after: &o2 },
            Refactoring::InlineOperation { inlined: &o1, mapping: &mapping },
            Refactoring::ParameterizeTest { mapping: &mapping },
            Refactoring::ChangeClassAccessModifier { before: &c1, after: &c2 },
            Refactoring::AddClassModifier { modifier: Modifier::Abstract, before: &c1, after: &c2 },
            Refactoring::RemoveClassModifier { modifier: Modifier::Abstract, before: &c1, after: &c2 },
            Refactoring::ChangeTypeDeclarationKind { before: &c1, after: &c2 },
            Refactoring::AddClassAnnotation { annotation: &ann, before: &c1, after: &c2 },
            Refactoring::RemoveClassAnnotation { annotation: &ann, before: &c1, after: &c2 },
            Refactoring::ModifyClassAnnotation { annotation_before: &ann, annotation_after: &ann, before: &c1, after: &c2 },
            Refactoring::ExtractClass(extracted.clone()),
            Refactoring::ExtractSubclass(extracted),
        ];

        for r in &all {
            assert!(!r.left_side().is_empty(), "{}", r.display_name());
            assert!(!r.right_side().is_empty(), "{}", r.display_name());
            assert!(!r.involved_classes_before().is_empty());
            assert!(!r.involved_classes_after().is_empty());
            assert_eq!(r.to_string().split('\t').next(), Some(r.display_name()));
        }
        let kinds: HashSet<RefactoringKind> = all.iter().map(Refactoring::kind).collect();
        assert_eq!(kinds.len(), all.len());
    }
}
