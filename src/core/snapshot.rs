use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::core::model::ClassModel;
use crate::core::module::{ModuleModel, PackageInfo};

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read model: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse model: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate class in model: {0}")]
    DuplicateClass(String),
}

/// Serializable snapshot format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelData {
    #[serde(default)]
    pub classes: Vec<ClassModel>,
    #[serde(default)]
    pub modules: Vec<ModuleModel>,
    #[serde(default)]
    pub packages: Vec<PackageInfo>,
}

/// One snapshot of a project's code model, with a name index
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub classes: Vec<ClassModel>,
    pub modules: Vec<ModuleModel>,
    pub packages: Vec<PackageInfo>,

    /// Index: qualified class name -> index in classes
    name_to_index: HashMap<String, usize>,
}

impl Model {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a snapshot from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let data: ModelData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    pub fn from_data(data: ModelData) -> Result<Self, ModelError> {
        let mut model = Self {
            modules: data.modules,
            packages: data.packages,
            ..Self::default()
        };
        for class in data.classes {
            model.add_class(class)?;
        }
        Ok(model)
    }

    /// Add a class, filling in owner names and file paths its members omit
    pub fn add_class(&mut self, mut class: ClassModel) -> Result<(), ModelError> {
        if self.name_to_index.contains_key(&class.name) {
            return Err(ModelError::DuplicateClass(class.name));
        }

        let file_path = class.location.file_path.clone();
        for attribute in &mut class.attributes {
            if attribute.class_name.is_empty() {
                attribute.class_name.clone_from(&class.name);
            }
            if attribute.location.file_path.is_empty() {
                attribute.location.file_path.clone_from(&file_path);
            }
        }
        for operation in &mut class.operations {
            if operation.class_name.is_empty() {
                operation.class_name.clone_from(&class.name);
            }
            if operation.location.file_path.is_empty() {
                operation.location.file_path.clone_from(&file_path);
            }
        }

        self.name_to_index.insert(class.name.clone(), self.classes.len());
        self.classes.push(class);
        Ok(())
    }

    /// Get a class by qualified name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ClassModel> {
        self.name_to_index.get(name).map(|&idx| &self.classes[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "classes": [
            {
                "name": "org.acme.Shop",
                "package_name": "org.acme",
                "location": {"file_path": "src/org/acme/Shop.java", "start_line": 1, "end_line": 20},
                "attributes": [{"name": "total", "type": "int", "visibility": "private"}],
                "operations": [{"name": "getTotal", "return_type": "int", "variables": ["total"]}]
            }
        ]
    }"#;

    #[test]
    fn test_from_json_fills_owner() {
        let model = Model::from_json(SNAPSHOT).unwrap();
        let shop = model.get("org.acme.Shop").unwrap();
        assert_eq!(shop.attributes[0].class_name, "org.acme.Shop");
        assert_eq!(shop.operations[0].class_name, "org.acme.Shop");
        assert_eq!(
            shop.operations[0].location.file_path,
            "src/org/acme/Shop.java"
        );
        assert!(shop.operations[0].is_getter());
    }

    #[test]
    fn test_duplicate_class_rejected() {
        let mut model = Model::new();
        model
            .add_class(ClassModel::new("org.acme.Shop", "org.acme"))
            .unwrap();
        let err = model
            .add_class(ClassModel::new("org.acme.Shop", "org.acme"))
            .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateClass(name) if name == "org.acme.Shop"));
    }

    #[test]
    fn test_parse_error() {
        let err = Model::from_json("{not json").unwrap_err();
        assert!(matches!(err, ModelError::ParseError(_)));
    }
}
