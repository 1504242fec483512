use serde::Serialize;

/// Tag identifying what kind of change a refactoring describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefactoringKind {
    RenameAttribute,
    ChangeAttributeType,
    ChangeAttributeAccessModifier,
    AddAttributeModifier,
    RemoveAttributeModifier,
    EncapsulateAttribute,
    AddAttributeAnnotation,
    RemoveAttributeAnnotation,
    ModifyAttributeAnnotation,
    RenameMethod,
    ChangeReturnType,
    ChangeOperationAccessModifier,
    AddMethodModifier,
    RemoveMethodModifier,
    AddMethodAnnotation,
    RemoveMethodAnnotation,
    ModifyMethodAnnotation,
    AddThrownExceptionType,
    RemoveThrownExceptionType,
    ChangeThrownExceptionType,
    InlineMethod,
    ParameterizeTest,
    ChangeClassAccessModifier,
    AddClassModifier,
    RemoveClassModifier,
    ChangeTypeDeclarationKind,
    AddClassAnnotation,
    RemoveClassAnnotation,
    ModifyClassAnnotation,
    ExtractClass,
    ExtractSubclass,
}

impl RefactoringKind {
    /// Name used in textual reports
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::RenameAttribute => "Rename Attribute",
            Self::ChangeAttributeType => "Change Attribute Type",
            Self::ChangeAttributeAccessModifier => "Change Attribute Access Modifier",
            Self::AddAttributeModifier => "Add Attribute Modifier",
            Self::RemoveAttributeModifier => "Remove Attribute Modifier",
            Self::EncapsulateAttribute => "Encapsulate Attribute",
            Self::AddAttributeAnnotation => "Add Attribute Annotation",
            Self::RemoveAttributeAnnotation => "Remove Attribute Annotation",
            Self::ModifyAttributeAnnotation => "Modify Attribute Annotation",
            Self::RenameMethod => "Rename Method",
            Self::ChangeReturnType => "Change Return Type",
            Self::ChangeOperationAccessModifier => "Change Method Access Modifier",
            Self::AddMethodModifier => "Add Method Modifier",
            Self::RemoveMethodModifier => "Remove Method Modifier",
            Self::AddMethodAnnotation => "Add Method Annotation",
            Self::RemoveMethodAnnotation => "Remove Method Annotation",
            Self::ModifyMethodAnnotation => "Modify Method Annotation",
            Self::AddThrownExceptionType => "Add Thrown Exception Type",
            Self::RemoveThrownExceptionType => "Remove Thrown Exception Type",
            Self::ChangeThrownExceptionType => "Change Thrown Exception Type",
            Self::InlineMethod => "Inline Method",
            Self::ParameterizeTest => "Parameterize Test",
            Self::ChangeClassAccessModifier => "Change Class Access Modifier",
            Self::AddClassModifier => "Add Class Modifier",
            Self::RemoveClassModifier => "Remove Class Modifier",
            Self::ChangeTypeDeclarationKind => "Change Type Declaration Kind",
            Self::AddClassAnnotation => "Add Class Annotation",
            Self::RemoveClassAnnotation => "Remove Class Annotation",
            Self::ModifyClassAnnotation => "Modify Class Annotation",
            Self::ExtractClass => "Extract Class",
            Self::ExtractSubclass => "Extract Subclass",
        }
    }
}

impl std::fmt::Display for RefactoringKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
