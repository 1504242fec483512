use serde::{Deserialize, Serialize};

/// Access level of a class, attribute or operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Protected,
    Private,
    /// No explicit modifier
    #[default]
    Package,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Protected => write!(f, "protected"),
            Self::Private => write!(f, "private"),
            Self::Package => write!(f, "package"),
        }
    }
}

/// Declaration kind of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
    Record,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Interface => write!(f, "interface"),
            Self::Enum => write!(f, "enum"),
            Self::Annotation => write!(f, "@interface"),
            Self::Record => write!(f, "record"),
        }
    }
}

/// Non-access modifiers that refactorings can add or remove
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Abstract,
    Static,
    Final,
    Volatile,
    Transient,
    Synchronized,
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Abstract => "abstract",
            Self::Static => "static",
            Self::Final => "final",
            Self::Volatile => "volatile",
            Self::Transient => "transient",
            Self::Synchronized => "synchronized",
        };
        f.write_str(s)
    }
}

/// Kind of a module directive (`module-info`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveKind {
    Requires,
    Exports,
    Opens,
    Uses,
    Provides,
}

impl std::fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Requires => write!(f, "requires"),
            Self::Exports => write!(f, "exports"),
            Self::Opens => write!(f, "opens"),
            Self::Uses => write!(f, "uses"),
            Self::Provides => write!(f, "provides"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CommentKind {
    #[default]
    Line,
    Block,
}
