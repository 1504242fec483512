use serde::{Deserialize, Serialize};

use crate::core::location::LocationInfo;
use crate::core::model::{structurally_equal_lists, Annotation, Comment, Import, Javadoc};
use crate::core::node::ModelNode;
use crate::core::types::DirectiveKind;

/// One statement of a module declaration, e.g. `requires transitive java.sql;`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleDirective {
    pub kind: DirectiveKind,

    /// Module, package or service name the directive refers to
    pub name: String,

    /// `transitive`, `static` and the like
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,

    /// `to` / `with` targets
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<String>,

    #[serde(default)]
    pub location: LocationInfo,
}

impl ModelNode for ModuleDirective {
    fn same_identity(&self, other: &Self) -> bool {
        self.kind == other.kind && self.name == other.name
    }

    fn structurally_equal(&self, other: &Self) -> bool {
        self.same_identity(other)
            && self.modifiers == other.modifiers
            && self.targets == other.targets
    }
}

impl std::fmt::Display for ModuleDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        for modifier in &self.modifiers {
            write!(f, " {modifier}")?;
        }
        write!(f, " {}", self.name)?;
        if !self.targets.is_empty() {
            let keyword = if self.kind == DirectiveKind::Provides {
                "with"
            } else {
                "to"
            };
            write!(f, " {keyword} {}", self.targets.join(", "))?;
        }
        Ok(())
    }
}

/// A module declaration (`module-info`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleModel {
    pub name: String,

    #[serde(default)]
    pub open: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<Javadoc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<Import>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,

    #[serde(default)]
    pub directives: Vec<ModuleDirective>,

    #[serde(default)]
    pub location: LocationInfo,
}

/// Same declaration file when both sides carry one, otherwise same name
fn same_declaration(a: &LocationInfo, a_name: &str, b: &LocationInfo, b_name: &str) -> bool {
    if a.file_path.is_empty() || b.file_path.is_empty() {
        a_name == b_name
    } else {
        a.file_path == b.file_path || a_name == b_name
    }
}

impl ModelNode for ModuleModel {
    fn same_identity(&self, other: &Self) -> bool {
        same_declaration(&self.location, &self.name, &other.location, &other.name)
    }

    fn structurally_equal(&self, other: &Self) -> bool {
        self.name == other.name
            && self.open == other.open
            && Javadoc::same_text(self.javadoc.as_ref(), other.javadoc.as_ref())
            && structurally_equal_lists(&self.annotations, &other.annotations)
            && structurally_equal_lists(&self.imports, &other.imports)
            && structurally_equal_lists(&self.comments, &other.comments)
            && structurally_equal_lists(&self.directives, &other.directives)
    }
}

/// A package declaration file (`package-info`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<Javadoc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<Import>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,

    #[serde(default)]
    pub location: LocationInfo,
}

impl ModelNode for PackageInfo {
    fn same_identity(&self, other: &Self) -> bool {
        same_declaration(&self.location, &self.name, &other.location, &other.name)
    }

    fn structurally_equal(&self, other: &Self) -> bool {
        self.name == other.name
            && Javadoc::same_text(self.javadoc.as_ref(), other.javadoc.as_ref())
            && structurally_equal_lists(&self.annotations, &other.annotations)
            && structurally_equal_lists(&self.imports, &other.imports)
            && structurally_equal_lists(&self.comments, &other.comments)
    }
}
