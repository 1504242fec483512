use serde::{Deserialize, Serialize};

/// Source position of a model node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct LocationInfo {
    /// Path of the compilation unit, relative to the project root
    pub file_path: String,

    pub start_line: u32,
    pub end_line: u32,

    #[serde(default)]
    pub start_column: u32,
    #[serde(default)]
    pub end_column: u32,
}

impl LocationInfo {
    #[must_use]
    pub fn new(file_path: impl Into<String>, start_line: u32, end_line: u32) -> Self {
        Self {
            file_path: file_path.into(),
            start_line,
            end_line,
            start_column: 0,
            end_column: 0,
        }
    }

    /// Wrap this location in a code range with no description
    #[must_use]
    pub fn code_range(&self) -> CodeRange<'_> {
        CodeRange {
            location: self,
            description: "",
            code_element: None,
        }
    }
}

/// A described region of source touched by a refactoring.
///
/// Borrowed from the snapshot that owns the node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CodeRange<'a> {
    #[serde(flatten)]
    pub location: &'a LocationInfo,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_element: Option<String>,
}

impl<'a> CodeRange<'a> {
    #[must_use]
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn with_code_element(mut self, element: impl ToString) -> Self {
        self.code_element = Some(element.to_string());
        self
    }
}
