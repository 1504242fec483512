//! Class-level model nodes: types, annotations, imports, comments,
//! attributes, operations and the classes that own them.
//!
//! Nodes are plain owned values deserialized from a snapshot file. Diffs and
//! refactorings only ever borrow them.

use serde::{Deserialize, Serialize};

use crate::core::location::LocationInfo;
use crate::core::node::{simple_name, ModelNode, QualifiedName};
use crate::core::types::{CommentKind, Modifier, TypeKind, Visibility};

/// A reference to a type by name, as written in source
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef {
    pub name: String,
}

impl TypeRef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// True if both references erase to the same simple class name
    #[must_use]
    pub fn same_class_type(&self, other: &TypeRef) -> bool {
        self.class_type() == other.class_type()
    }

    #[must_use]
    pub fn is_void(&self) -> bool {
        self.name == "void"
    }
}

impl QualifiedName for TypeRef {
    fn qualified_name(&self) -> &str {
        &self.name
    }
}

impl ModelNode for TypeRef {
    fn same_identity(&self, other: &Self) -> bool {
        self.name == other.name
    }

    fn structurally_equal(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A generic type parameter such as `T extends Comparable<T>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<TypeRef>,
}

impl ModelNode for TypeParameter {
    fn same_identity(&self, other: &Self) -> bool {
        self.name == other.name
    }

    fn structurally_equal(&self, other: &Self) -> bool {
        self.name == other.name && self.bounds == other.bounds
    }
}

impl std::fmt::Display for TypeParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for (i, bound) in self.bounds.iter().enumerate() {
            let sep = if i == 0 { " extends " } else { " & " };
            write!(f, "{sep}{bound}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation type name without the leading `@`
    pub type_name: String,

    /// Source text of the annotation arguments, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default)]
    pub location: LocationInfo,
}

impl Annotation {
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            value: None,
            location: LocationInfo::default(),
        }
    }
}

impl QualifiedName for Annotation {
    fn qualified_name(&self) -> &str {
        &self.type_name
    }
}

impl ModelNode for Annotation {
    fn same_identity(&self, other: &Self) -> bool {
        self.type_name == other.type_name
    }

    fn structurally_equal(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.value == other.value
    }
}

impl std::fmt::Display for Annotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "@{}({})", self.type_name, value),
            None => write!(f, "@{}", self.type_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Import {
    pub name: String,
    #[serde(default)]
    pub is_static: bool,
    /// Wildcard import (`import a.b.*`)
    #[serde(default)]
    pub on_demand: bool,
    #[serde(default)]
    pub location: LocationInfo,
}

impl Import {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_static: false,
            on_demand: false,
            location: LocationInfo::default(),
        }
    }

    /// True if this import brings `qualified` into scope
    #[must_use]
    pub fn covers(&self, qualified: &str) -> bool {
        if self.on_demand {
            qualified
                .rsplit_once('.')
                .is_some_and(|(pkg, _)| pkg == self.name)
        } else {
            self.name == qualified
        }
    }
}

impl QualifiedName for Import {
    fn qualified_name(&self) -> &str {
        &self.name
    }
}

impl ModelNode for Import {
    fn same_identity(&self, other: &Self) -> bool {
        self.name == other.name
            && self.is_static == other.is_static
            && self.on_demand == other.on_demand
    }

    fn structurally_equal(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl std::fmt::Display for Import {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "import ")?;
        if self.is_static {
            write!(f, "static ")?;
        }
        write!(f, "{}", self.name)?;
        if self.on_demand {
            write!(f, ".*")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    #[serde(default)]
    pub kind: CommentKind,
    #[serde(default)]
    pub location: LocationInfo,
}

impl ModelNode for Comment {
    fn same_identity(&self, other: &Self) -> bool {
        self.text.trim() == other.text.trim()
    }

    fn structurally_equal(&self, other: &Self) -> bool {
        self.text == other.text && self.kind == other.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Javadoc {
    pub text: String,
    #[serde(default)]
    pub location: LocationInfo,
}

impl Javadoc {
    /// Equal text on both sides, or absent on both
    #[must_use]
    pub fn same_text(a: Option<&Javadoc>, b: Option<&Javadoc>) -> bool {
        a.map(|j| j.text.as_str()) == b.map(|j| j.text.as_str())
    }
}

/// A field declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,

    #[serde(rename = "type")]
    pub type_ref: TypeRef,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_volatile: bool,
    #[serde(default)]
    pub is_transient: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,

    /// Qualified name of the owning class, filled in on load when absent
    #[serde(default)]
    pub class_name: String,

    #[serde(default)]
    pub location: LocationInfo,
}

impl Attribute {
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_ref: TypeRef::new(type_name),
            visibility: Visibility::Package,
            is_static: false,
            is_final: false,
            is_volatile: false,
            is_transient: false,
            initializer: None,
            annotations: Vec::new(),
            class_name: String::new(),
            location: LocationInfo::default(),
        }
    }

    /// Modifiers set on this attribute, in declaration order
    #[must_use]
    pub fn modifiers(&self) -> Vec<Modifier> {
        [
            (self.is_static, Modifier::Static),
            (self.is_final, Modifier::Final),
            (self.is_volatile, Modifier::Volatile),
            (self.is_transient, Modifier::Transient),
        ]
        .into_iter()
        .filter_map(|(set, m)| set.then_some(m))
        .collect()
    }
}

impl ModelNode for Attribute {
    fn same_identity(&self, other: &Self) -> bool {
        self.name == other.name && self.type_ref == other.type_ref
    }

    fn structurally_equal(&self, other: &Self) -> bool {
        self.same_identity(other)
            && self.visibility == other.visibility
            && self.modifiers() == other.modifiers()
            && self.initializer == other.initializer
            && structurally_equal_lists(&self.annotations, &other.annotations)
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.visibility != Visibility::Package {
            write!(f, "{} ", self.visibility)?;
        }
        for modifier in self.modifiers() {
            write!(f, "{modifier} ")?;
        }
        write!(f, "{} : {}", self.name, self.type_ref)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub varargs: bool,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Parameter {
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_ref: TypeRef::new(type_name),
            varargs: false,
            is_final: false,
            annotations: Vec::new(),
        }
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} : {}", self.name, self.type_ref)?;
        if self.varargs {
            write!(f, "...")?;
        }
        Ok(())
    }
}

/// A call site inside an operation body
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Invocation {
    pub method_name: String,

    /// Receiver expression, e.g. `this`, `super` or `helper`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,

    #[serde(default)]
    pub arguments: Vec<String>,

    #[serde(default)]
    pub location: LocationInfo,
}

impl Invocation {
    /// Call without receiver or arguments
    #[must_use]
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
            expression: None,
            arguments: Vec::new(),
            location: LocationInfo::default(),
        }
    }

    /// True if this call could target `operation` by name and arity
    #[must_use]
    pub fn matches_operation(&self, operation: &Operation) -> bool {
        if self.method_name != operation.name {
            return false;
        }
        let arity = operation.parameters.len();
        let varargs = operation.parameters.last().is_some_and(|p| p.varargs);
        self.arguments.len() == arity || (varargs && self.arguments.len() + 1 >= arity)
    }
}

/// A method or constructor declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operation {
    pub name: String,

    /// Qualified name of the owning class, filled in on load when absent
    #[serde(default)]
    pub class_name: String,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_synchronized: bool,
    #[serde(default)]
    pub is_constructor: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameter>,

    #[serde(default)]
    pub parameters: Vec<Parameter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thrown_exceptions: Vec<TypeRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,

    /// Identifiers referenced in the body
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invocations: Vec<Invocation>,

    #[serde(default)]
    pub location: LocationInfo,
}

impl Operation {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class_name: String::new(),
            visibility: Visibility::Public,
            is_static: false,
            is_final: false,
            is_abstract: false,
            is_synchronized: false,
            is_constructor: false,
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
            thrown_exceptions: Vec::new(),
            annotations: Vec::new(),
            variables: Vec::new(),
            invocations: Vec::new(),
            location: LocationInfo::default(),
        }
    }

    pub fn parameter_types(&self) -> impl Iterator<Item = &TypeRef> {
        self.parameters.iter().map(|p| &p.type_ref)
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name.as_str())
    }

    /// Same name and same parameter types, in order
    #[must_use]
    pub fn equal_signature(&self, other: &Operation) -> bool {
        self.name == other.name && self.parameter_types().eq(other.parameter_types())
    }

    #[must_use]
    pub fn equal_parameter_names(&self, other: &Operation) -> bool {
        self.parameter_names().eq(other.parameter_names())
    }

    #[must_use]
    pub fn references_variable(&self, name: &str) -> bool {
        self.variables.iter().any(|v| v == name)
    }

    #[must_use]
    pub fn is_getter(&self) -> bool {
        (self.name.starts_with("get") || self.name.starts_with("is"))
            && self.parameters.is_empty()
            && self.return_type.as_ref().is_some_and(|t| !t.is_void())
    }

    #[must_use]
    pub fn is_setter(&self) -> bool {
        self.name.starts_with("set") && self.parameters.len() == 1
    }

    /// `equals`, `hashCode`, `toString`, `clone` or `compareTo`
    #[must_use]
    pub fn overrides_object(&self) -> bool {
        let returns = |name: &str| self.return_type.as_ref().is_some_and(|t| t.class_type() == name);
        let params: Vec<&str> = self.parameter_types().map(|t| t.class_type()).collect();
        match self.name.as_str() {
            "equals" => returns("boolean") && params == ["Object"],
            "hashCode" => returns("int") && params.is_empty(),
            "toString" => returns("String") && params.is_empty(),
            "clone" => params.is_empty(),
            "compareTo" => returns("int") && params.len() == 1,
            _ => false,
        }
    }

    /// Modifiers set on this operation, in declaration order
    #[must_use]
    pub fn modifiers(&self) -> Vec<Modifier> {
        [
            (self.is_abstract, Modifier::Abstract),
            (self.is_static, Modifier::Static),
            (self.is_final, Modifier::Final),
            (self.is_synchronized, Modifier::Synchronized),
        ]
        .into_iter()
        .filter_map(|(set, m)| set.then_some(m))
        .collect()
    }
}

impl ModelNode for Operation {
    fn same_identity(&self, other: &Self) -> bool {
        self.equal_signature(other)
    }

    fn structurally_equal(&self, other: &Self) -> bool {
        self.equal_signature(other)
            && self.equal_parameter_names(other)
            && self.visibility == other.visibility
            && self.modifiers() == other.modifiers()
            && self.is_constructor == other.is_constructor
            && self.return_type == other.return_type
            && self.thrown_exceptions == other.thrown_exceptions
            && self.type_parameters == other.type_parameters
            && structurally_equal_lists(&self.annotations, &other.annotations)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.visibility != Visibility::Package {
            write!(f, "{} ", self.visibility)?;
        }
        for modifier in self.modifiers() {
            write!(f, "{modifier} ")?;
        }
        write!(f, "{}(", self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ")")?;
        if let Some(ret) = &self.return_type {
            write!(f, " : {ret}")?;
        }
        Ok(())
    }
}

/// A class, interface, enum, annotation type or record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassModel {
    /// Fully qualified name; nested classes use `Outer.Inner`
    pub name: String,

    #[serde(default)]
    pub package_name: String,

    #[serde(default)]
    pub kind: TypeKind,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_static: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<TypeRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implemented_interfaces: Vec<TypeRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameter>,

    #[serde(default)]
    pub attributes: Vec<Attribute>,

    #[serde(default)]
    pub operations: Vec<Operation>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<Import>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<Javadoc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,

    #[serde(default)]
    pub location: LocationInfo,
}

impl ClassModel {
    #[must_use]
    pub fn new(name: impl Into<String>, package_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package_name: package_name.into(),
            kind: TypeKind::Class,
            visibility: Visibility::Public,
            is_abstract: false,
            is_final: false,
            is_static: false,
            superclass: None,
            implemented_interfaces: Vec::new(),
            type_parameters: Vec::new(),
            attributes: Vec::new(),
            operations: Vec::new(),
            annotations: Vec::new(),
            imports: Vec::new(),
            javadoc: None,
            comments: Vec::new(),
            location: LocationInfo::default(),
        }
    }

    #[must_use]
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    /// Name relative to the package, e.g. `Outer.Inner`
    #[must_use]
    pub fn local_name(&self) -> &str {
        if self.package_name.is_empty() {
            return &self.name;
        }
        self.name
            .strip_prefix(&self.package_name)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(&self.name)
    }

    #[must_use]
    pub fn is_top_level(&self) -> bool {
        !self.local_name().contains('.')
    }

    /// True if this class is nested (at any depth) inside `outer`
    #[must_use]
    pub fn is_inner_class_of(&self, outer: &ClassModel) -> bool {
        self.name
            .strip_prefix(&outer.name)
            .is_some_and(|rest| rest.starts_with('.'))
    }

    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Source root of the compilation unit: the file path minus the package
    /// directories and file name. Falls back to the parent directory when the
    /// path does not end in the package directories.
    #[must_use]
    pub fn source_folder(&self) -> &str {
        let path = self.location.file_path.as_str();
        let dir = path.rsplit_once('/').map_or("", |(dir, _)| dir);
        if self.package_name.is_empty() {
            return dir;
        }
        let package_dir = self.package_name.replace('.', "/");
        match dir.strip_suffix(package_dir.as_str()) {
            Some(root) => root.strip_suffix('/').unwrap_or(root),
            None => dir,
        }
    }

    /// Attribute with the same name, ignoring any change of type
    #[must_use]
    pub fn attribute_with_same_name(&self, attribute: &Attribute) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == attribute.name)
    }

    /// Modifiers set on this class, in declaration order
    #[must_use]
    pub fn modifiers(&self) -> Vec<Modifier> {
        [
            (self.is_abstract, Modifier::Abstract),
            (self.is_static, Modifier::Static),
            (self.is_final, Modifier::Final),
        ]
        .into_iter()
        .filter_map(|(set, m)| set.then_some(m))
        .collect()
    }
}

impl QualifiedName for ClassModel {
    fn qualified_name(&self) -> &str {
        &self.name
    }
}

impl ModelNode for ClassModel {
    fn same_identity(&self, other: &Self) -> bool {
        self.name == other.name
    }

    fn structurally_equal(&self, other: &Self) -> bool {
        self.name == other.name
            && self.package_name == other.package_name
            && self.kind == other.kind
            && self.visibility == other.visibility
            && self.modifiers() == other.modifiers()
            && self.superclass == other.superclass
            && self.implemented_interfaces == other.implemented_interfaces
            && structurally_equal_lists(&self.type_parameters, &other.type_parameters)
            && structurally_equal_lists(&self.attributes, &other.attributes)
            && structurally_equal_lists(&self.operations, &other.operations)
            && structurally_equal_lists(&self.annotations, &other.annotations)
            && structurally_equal_lists(&self.imports, &other.imports)
            && Javadoc::same_text(self.javadoc.as_ref(), other.javadoc.as_ref())
            && structurally_equal_lists(&self.comments, &other.comments)
    }
}

impl std::fmt::Display for ClassModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Pairwise structural equality of two node lists, ignoring locations
pub(crate) fn structurally_equal_lists<T: ModelNode>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.structurally_equal(y))
}
