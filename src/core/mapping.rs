use serde::Serialize;

use crate::core::location::LocationInfo;
use crate::core::model::Operation;

/// A statement-level fragment inside an operation body
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CodeFragment {
    pub text: String,
    pub location: LocationInfo,
}

/// Two statements matched between an operation before and after the edit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StatementMapping {
    pub before: CodeFragment,
    pub after: CodeFragment,
}

/// Body-level pairing of one operation before the edit with one after it.
///
/// Produced by the statement matcher; refactorings derived from a mapping
/// read their operations from it rather than storing copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationMapping<'a> {
    pub operation1: &'a Operation,
    pub operation2: &'a Operation,
    pub mappings: Vec<StatementMapping>,
}

impl<'a> OperationMapping<'a> {
    #[must_use]
    pub fn new(operation1: &'a Operation, operation2: &'a Operation) -> Self {
        Self {
            operation1,
            operation2,
            mappings: Vec::new(),
        }
    }
}
