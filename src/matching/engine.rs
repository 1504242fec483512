use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::model::ClassModel;
use crate::core::module::{ModuleModel, PackageInfo};
use crate::core::node::QualifiedName;
use crate::core::snapshot::Model;
use crate::matching::call_tree::{CallTree, CallTreeNode, InvocationResolver};
use crate::matching::class_diff::ClassDiff;
use crate::matching::module_diff::{ModuleDiff, PackageDiff};
use crate::matching::ranking::{self, Candidate};
use crate::matching::reconcile::ListDiff;
use crate::refactoring::{ExtractedClass, Refactoring};

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Analysis timed out")]
    TimedOut,

    #[error("Failed to read config: {0}")]
    ConfigReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParseError(#[from] serde_json::Error),
}

/// Default depth bound for call trees
pub const DEFAULT_MAX_CALL_DEPTH: usize = 3;

/// Configuration for the diff engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Maximum number of call hops below the root of a call tree
    pub max_call_depth: usize,
    /// Look for Extract Class / Extract Subclass among added classes
    pub detect_extract_class: bool,
    /// A candidate needs strictly more common members than this, unless it
    /// is an inner class of the source, or the source gained a field of its
    /// type or an import of it
    pub extract_class_min_common: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            detect_extract_class: true,
            extract_class_min_common: 1,
        }
    }
}

impl DiffConfig {
    /// Load configuration from a JSON file; missing fields take defaults
    pub fn load_from_file(path: &Path) -> Result<Self, DiffError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Cooperative cancellation point consulted between pairwise diffs
pub trait Watchdog {
    fn timed_out(&self) -> bool;
}

/// Never fires
impl Watchdog for () {
    fn timed_out(&self) -> bool {
        false
    }
}

impl<F> Watchdog for F
where
    F: Fn() -> bool,
{
    fn timed_out(&self) -> bool {
        self()
    }
}

/// Everything that changed between two snapshots
#[derive(Debug, Clone)]
pub struct ModelDiff<'a> {
    removed_classes: Vec<&'a ClassModel>,
    added_classes: Vec<&'a ClassModel>,
    class_diffs: Vec<ClassDiff<'a>>,
    removed_modules: Vec<&'a ModuleModel>,
    added_modules: Vec<&'a ModuleModel>,
    module_diffs: Vec<ModuleDiff<'a>>,
    removed_packages: Vec<&'a PackageInfo>,
    added_packages: Vec<&'a PackageInfo>,
    package_diffs: Vec<PackageDiff<'a>>,
    refactorings: Vec<Refactoring<'a>>,
}

impl<'a> ModelDiff<'a> {
    #[must_use]
    pub fn removed_classes(&self) -> &[&'a ClassModel] {
        &self.removed_classes
    }

    #[must_use]
    pub fn added_classes(&self) -> &[&'a ClassModel] {
        &self.added_classes
    }

    /// Diffs of matched classes that changed
    #[must_use]
    pub fn class_diffs(&self) -> &[ClassDiff<'a>] {
        &self.class_diffs
    }

    #[must_use]
    pub fn class_diff(&self, name: &str) -> Option<&ClassDiff<'a>> {
        self.class_diffs.iter().find(|d| d.next().name == name)
    }

    #[must_use]
    pub fn removed_modules(&self) -> &[&'a ModuleModel] {
        &self.removed_modules
    }

    #[must_use]
    pub fn added_modules(&self) -> &[&'a ModuleModel] {
        &self.added_modules
    }

    #[must_use]
    pub fn module_diffs(&self) -> &[ModuleDiff<'a>] {
        &self.module_diffs
    }

    #[must_use]
    pub fn removed_packages(&self) -> &[&'a PackageInfo] {
        &self.removed_packages
    }

    #[must_use]
    pub fn added_packages(&self) -> &[&'a PackageInfo] {
        &self.added_packages
    }

    #[must_use]
    pub fn package_diffs(&self) -> &[PackageDiff<'a>] {
        &self.package_diffs
    }

    /// All refactorings, class diffs first in class order, then the model
    /// level ones
    #[must_use]
    pub fn refactorings(&self) -> &[Refactoring<'a>] {
        &self.refactorings
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed_classes.is_empty()
            && self.added_classes.is_empty()
            && self.class_diffs.is_empty()
            && self.removed_modules.is_empty()
            && self.added_modules.is_empty()
            && self.module_diffs.is_empty()
            && self.removed_packages.is_empty()
            && self.added_packages.is_empty()
            && self.package_diffs.is_empty()
    }
}

/// The model-level diff engine
pub struct DiffEngine {
    config: DiffConfig,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffEngine {
    /// Create an engine with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: DiffConfig::default(),
        }
    }

    /// Create an engine with custom configuration
    #[must_use]
    pub fn with_config(config: DiffConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Diff two snapshots without a time budget
    pub fn diff<'a>(&self, before: &'a Model, after: &'a Model) -> Result<ModelDiff<'a>, DiffError> {
        self.diff_with_watchdog(before, after, &())
    }

    /// Diff two snapshots, consulting `watchdog` before every pairwise diff
    pub fn diff_with_watchdog<'a>(
        &self,
        before: &'a Model,
        after: &'a Model,
        watchdog: &dyn Watchdog,
    ) -> Result<ModelDiff<'a>, DiffError> {
        let classes = ListDiff::compute(&before.classes, &after.classes);
        let mut class_diffs = Vec::new();
        for &(original, next) in classes.common() {
            check(watchdog, &next.name)?;
            let diff = ClassDiff::compute(original, next);
            if !diff.is_empty() {
                class_diffs.push(diff);
            }
        }

        let modules = ListDiff::compute(&before.modules, &after.modules);
        let mut module_diffs = Vec::new();
        for &(original, next) in modules.common() {
            check(watchdog, &next.name)?;
            let diff = ModuleDiff::compute(original, next);
            if !diff.is_empty() {
                module_diffs.push(diff);
            }
        }

        let packages = ListDiff::compute(&before.packages, &after.packages);
        let mut package_diffs = Vec::new();
        for &(original, next) in packages.common() {
            check(watchdog, &next.name)?;
            let diff = PackageDiff::compute(original, next);
            if !diff.is_empty() {
                package_diffs.push(diff);
            }
        }

        let mut refactorings: Vec<Refactoring<'a>> = class_diffs
            .iter()
            .flat_map(|d| d.refactorings().iter().cloned())
            .collect();
        if self.config.detect_extract_class {
            for &added in classes.added() {
                check(watchdog, &added.name)?;
                refactorings.extend(self.extract_class_refactorings(added, &class_diffs));
            }
        }

        tracing::debug!(
            removed_classes = classes.removed().len(),
            added_classes = classes.added().len(),
            changed_classes = class_diffs.len(),
            changed_modules = module_diffs.len(),
            changed_packages = package_diffs.len(),
            refactorings = refactorings.len(),
            "Model diff"
        );

        Ok(ModelDiff {
            removed_classes: classes.removed().to_vec(),
            added_classes: classes.added().to_vec(),
            class_diffs,
            removed_modules: modules.removed().to_vec(),
            added_modules: modules.added().to_vec(),
            module_diffs,
            removed_packages: packages.removed().to_vec(),
            added_packages: packages.added().to_vec(),
            package_diffs,
            refactorings,
        })
    }

    /// Extract Class / Extract Subclass candidates moving members of one of
    /// `class_diffs` into the added class `target`, after ranking
    fn extract_class_refactorings<'d, 'a>(
        &self,
        target: &'a ClassModel,
        class_diffs: &'d [ClassDiff<'a>],
    ) -> Vec<Refactoring<'a>> {
        if target.is_interface() {
            return Vec::new();
        }
        let candidates: Vec<Candidate<'d, 'a>> = class_diffs
            .iter()
            .filter_map(|class_diff| self.extract_class_candidate(target, class_diff))
            .collect();

        if candidates.is_empty() {
            return Vec::new();
        }
        tracing::debug!(
            target = %target.name,
            candidates = candidates.len(),
            "Extract class candidates"
        );
        ranking::select(candidates)
    }

    fn extract_class_candidate<'d, 'a>(
        &self,
        target: &'a ClassModel,
        class_diff: &'d ClassDiff<'a>,
    ) -> Option<Candidate<'d, 'a>> {
        let source = class_diff.next();
        let attribute_of_extracted_type = class_diff
            .added_attributes()
            .iter()
            .copied()
            .find(|a| target.name.ends_with(&format!(".{}", a.type_ref.class_type())));
        let found_in_added_import = class_diff
            .import_diff()
            .is_some_and(|imports| imports.added().iter().any(|i| i.covers(&target.name)));

        // Classes in one hierarchy need direct evidence
        if shares_hierarchy(target, source)
            && attribute_of_extracted_type.is_none()
            && !found_in_added_import
        {
            return None;
        }

        let moved_operations = class_diff.removed_operations_found_in(target);
        let moved_attributes = class_diff.removed_attributes_found_in(target);
        let threshold = if attribute_of_extracted_type.is_some()
            || target.is_inner_class_of(source)
            || found_in_added_import
        {
            0
        } else {
            self.config.extract_class_min_common
        };
        if moved_operations.len() <= threshold && moved_attributes.len() <= threshold {
            return None;
        }

        let extracted = ExtractedClass {
            extracted: target,
            source_before: class_diff.original(),
            source_after: source,
            moved_operations,
            moved_attributes,
            attribute_of_extracted_type,
        };
        let is_subclass = target
            .superclass
            .as_ref()
            .is_some_and(|s| s.class_type() == source.simple_name());
        let refactoring = if is_subclass {
            Refactoring::ExtractSubclass(extracted)
        } else {
            Refactoring::ExtractClass(extracted)
        };
        Some(Candidate::new(class_diff, target, refactoring))
    }

    /// Call tree rooted at `root`, bounded by the configured depth
    pub fn call_tree<'a, R>(&self, root: CallTreeNode<'a>, resolver: &R) -> CallTree<'a>
    where
        R: InvocationResolver<'a> + ?Sized,
    {
        CallTree::generate(root, resolver, self.config.max_call_depth)
    }
}

/// True if `target` and `source` have the same superclass, share an
/// interface, or `source` extends `target`
fn shares_hierarchy(target: &ClassModel, source: &ClassModel) -> bool {
    let common_superclass = match (&target.superclass, &source.superclass) {
        (Some(a), Some(b)) => a.class_type() == b.class_type(),
        _ => false,
    };
    let common_interface = target.implemented_interfaces.iter().any(|a| {
        source
            .implemented_interfaces
            .iter()
            .any(|b| a.class_type() == b.class_type())
    });
    let extends_target = source
        .superclass
        .as_ref()
        .is_some_and(|s| target.name.ends_with(&format!(".{}", s.class_type())));
    common_superclass || common_interface || extends_target
}

fn check(watchdog: &dyn Watchdog, current: &str) -> Result<(), DiffError> {
    if watchdog.timed_out() {
        tracing::warn!(at = current, "Analysis timed out");
        return Err(DiffError::TimedOut);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::location::LocationInfo;
    use crate::core::model::{Attribute, Import, Invocation, Operation, Parameter, TypeRef};
    use crate::refactoring::RefactoringKind;
    use std::cell::Cell;

    fn class(name: &str) -> ClassModel {
        let simple = name.rsplit('.').next().unwrap_or(name);
        let mut class = ClassModel::new(name, "org.acme");
        class.location = LocationInfo::new(format!("src/main/java/org/acme/{simple}.java"), 1, 80);
        class
    }

    fn operation(name: &str, param: &str) -> Operation {
        let mut op = Operation::new(name);
        op.parameters.push(Parameter::new(param, "int"));
        op.return_type = Some(TypeRef::new("void"));
        op
    }

    fn model(classes: Vec<ClassModel>) -> Model {
        let mut model = Model::new();
        for class in classes {
            model.add_class(class).unwrap();
        }
        model
    }

    /// `Shop` loses `addItem`/`removeItem`/`items` to a new `Cart`
    fn extract_fixture(cart_superclass: Option<&str>) -> (Model, Model) {
        let mut shop = class("org.acme.Shop");
        shop.operations.push(operation("addItem", "id"));
        shop.operations.push(operation("removeItem", "id"));
        shop.operations.push(operation("checkout", "total"));
        shop.attributes.push(Attribute::new("items", "List<Item>"));

        let mut shop_after = class("org.acme.Shop");
        shop_after.operations.push(operation("checkout", "total"));

        let mut cart = class("org.acme.Cart");
        cart.operations.push(operation("addItem", "id"));
        cart.operations.push(operation("removeItem", "id"));
        cart.attributes.push(Attribute::new("items", "List<Item>"));
        cart.superclass = cart_superclass.map(TypeRef::new);

        (model(vec![shop]), model(vec![shop_after, cart]))
    }

    #[test]
    fn test_default_config() {
        let config = DiffConfig::default();
        assert_eq!(config.max_call_depth, DEFAULT_MAX_CALL_DEPTH);
        assert!(config.detect_extract_class);
        assert_eq!(config.extract_class_min_common, 1);
    }

    #[test]
    fn test_config_partial_json() {
        let config: DiffConfig = serde_json::from_str(r#"{"max_call_depth": 5}"#).unwrap();
        assert_eq!(config.max_call_depth, 5);
        assert!(config.detect_extract_class);
    }

    #[test]
    fn test_config_load_missing_file() {
        let result = DiffConfig::load_from_file(Path::new("/nonexistent/diff-config.json"));
        assert!(matches!(result, Err(DiffError::ConfigReadError(_))));
    }

    #[test]
    fn test_identical_models_are_empty() {
        let (before, _) = extract_fixture(None);
        let diff = DiffEngine::new().diff(&before, &before).unwrap();
        assert!(diff.is_empty());
        assert!(diff.refactorings().is_empty());
    }

    #[test]
    fn test_removed_and_added_classes() {
        let before = model(vec![class("org.acme.Shop"), class("org.acme.Legacy")]);
        let after = model(vec![class("org.acme.Shop"), class("org.acme.Modern")]);
        let diff = DiffEngine::new().diff(&before, &after).unwrap();
        assert_eq!(diff.removed_classes().len(), 1);
        assert_eq!(diff.removed_classes()[0].name, "org.acme.Legacy");
        assert_eq!(diff.added_classes().len(), 1);
        assert!(diff.class_diffs().is_empty());
    }

    #[test]
    fn test_extract_class_detected() {
        let (before, after) = extract_fixture(None);
        let diff = DiffEngine::new().diff(&before, &after).unwrap();

        let shop = diff.class_diff("org.acme.Shop").unwrap();
        assert_eq!(shop.removed_operations().len(), 2);

        let extracts: Vec<_> = diff
            .refactorings()
            .iter()
            .filter(|r| r.kind() == RefactoringKind::ExtractClass)
            .collect();
        assert_eq!(extracts.len(), 1);
        assert_eq!(
            extracts[0].to_string(),
            "Extract Class\torg.acme.Cart\tfrom class\torg.acme.Shop"
        );
        // extracted type + source + two operations + one attribute
        assert_eq!(extracts[0].right_side().len(), 5);
    }

    #[test]
    fn test_extract_subclass_detected() {
        let (before, after) = extract_fixture(Some("Shop"));
        let diff = DiffEngine::new().diff(&before, &after).unwrap();
        let kinds: Vec<_> = diff.refactorings().iter().map(Refactoring::kind).collect();
        assert!(kinds.contains(&RefactoringKind::ExtractSubclass));
        assert!(!kinds.contains(&RefactoringKind::ExtractClass));
    }

    #[test]
    fn test_extract_class_threshold() {
        let (before, after) = extract_fixture(None);
        let config = DiffConfig {
            extract_class_min_common: 2,
            ..DiffConfig::default()
        };
        let diff = DiffEngine::with_config(config).diff(&before, &after).unwrap();
        assert!(diff
            .refactorings()
            .iter()
            .all(|r| r.kind() != RefactoringKind::ExtractClass));
    }

    fn extract_lines(diff: &ModelDiff<'_>) -> Vec<String> {
        diff.refactorings()
            .iter()
            .filter(|r| {
                matches!(
                    r.kind(),
                    RefactoringKind::ExtractClass | RefactoringKind::ExtractSubclass
                )
            })
            .map(ToString::to_string)
            .collect()
    }

    fn strict() -> DiffEngine {
        DiffEngine::with_config(DiffConfig {
            extract_class_min_common: 5,
            ..DiffConfig::default()
        })
    }

    #[test]
    fn test_added_import_lowers_threshold() {
        let (before, mut after) = extract_fixture(None);
        after.classes[0].imports.push(Import::new("org.acme.Cart"));
        let diff = strict().diff(&before, &after).unwrap();
        assert_eq!(extract_lines(&diff).len(), 1);
    }

    #[test]
    fn test_existing_import_keeps_threshold() {
        let (mut before, mut after) = extract_fixture(None);
        before.classes[0].imports.push(Import::new("org.acme.Cart"));
        after.classes[0].imports.push(Import::new("org.acme.Cart"));
        let diff = strict().diff(&before, &after).unwrap();
        assert!(extract_lines(&diff).is_empty());
    }

    #[test]
    fn test_added_field_of_extracted_type_lowers_threshold() {
        let (before, mut after) = extract_fixture(None);
        after.classes[0].attributes.push(Attribute::new("cart", "Cart"));
        let diff = strict().diff(&before, &after).unwrap();
        assert_eq!(extract_lines(&diff).len(), 1);
    }

    #[test]
    fn test_existing_field_of_extracted_type_keeps_threshold() {
        let (mut before, mut after) = extract_fixture(None);
        before.classes[0].attributes.push(Attribute::new("cart", "Cart"));
        after.classes[0].attributes.push(Attribute::new("cart", "Cart"));
        let diff = strict().diff(&before, &after).unwrap();
        assert!(extract_lines(&diff).is_empty());
    }

    #[test]
    fn test_constructors_do_not_count_as_moved() {
        let mut shop = class("org.acme.Shop");
        let mut init = Operation::new("Shop");
        init.is_constructor = true;
        shop.operations.push(init.clone());
        shop.operations.push(operation("addItem", "id"));
        let shop_after = class("org.acme.Shop");

        let mut cart = class("org.acme.Cart");
        cart.operations.push(init);
        cart.operations.push(operation("addItem", "id"));

        let before = model(vec![shop]);
        let after = model(vec![shop_after, cart]);
        let diff = DiffEngine::new().diff(&before, &after).unwrap();
        assert!(extract_lines(&diff).is_empty());
    }

    #[test]
    fn test_sibling_in_same_hierarchy_is_not_extracted() {
        let (mut before, mut after) = extract_fixture(None);
        before.classes[0].superclass = Some(TypeRef::new("Store"));
        after.classes[0].superclass = Some(TypeRef::new("Store"));
        after.classes[1].superclass = Some(TypeRef::new("Store"));
        let diff = DiffEngine::new().diff(&before, &after).unwrap();
        assert!(extract_lines(&diff).is_empty());

        // a new field of the sibling's type is direct evidence
        after.classes[0].attributes.push(Attribute::new("cart", "Cart"));
        let diff = DiffEngine::new().diff(&before, &after).unwrap();
        assert_eq!(extract_lines(&diff).len(), 1);
    }

    #[test]
    fn test_shared_interface_is_not_extracted() {
        let (mut before, mut after) = extract_fixture(None);
        before.classes[0].implemented_interfaces.push(TypeRef::new("Auditable"));
        after.classes[0].implemented_interfaces.push(TypeRef::new("Auditable"));
        after.classes[1].implemented_interfaces.push(TypeRef::new("org.acme.Auditable"));
        let diff = DiffEngine::new().diff(&before, &after).unwrap();
        assert!(extract_lines(&diff).is_empty());
    }

    #[test]
    fn test_each_added_class_ranked_separately() {
        let mut shop = class("org.acme.Shop");
        for name in ["a1", "a2", "b1", "b2"] {
            shop.operations.push(operation(name, "x"));
        }
        let shop_after = class("org.acme.Shop");

        let mut cart = class("org.acme.Shop.Cart");
        cart.operations.push(operation("a1", "x"));
        cart.operations.push(operation("a2", "x"));
        let mut basket = class("org.acme.Basket");
        basket.operations.push(operation("b1", "x"));
        basket.operations.push(operation("b2", "x"));

        let before = model(vec![shop]);
        let after = model(vec![shop_after, cart, basket]);
        let diff = DiffEngine::new().diff(&before, &after).unwrap();
        assert_eq!(
            extract_lines(&diff),
            vec![
                "Extract Class\torg.acme.Shop.Cart\tfrom class\torg.acme.Shop".to_string(),
                "Extract Class\torg.acme.Basket\tfrom class\torg.acme.Shop".to_string(),
            ]
        );
    }

    #[test]
    fn test_outer_class_wins_competing_sources() {
        let mut shop = class("org.acme.Shop");
        let mut store = class("org.acme.Store");
        for name in ["addItem", "removeItem"] {
            shop.operations.push(operation(name, "id"));
            store.operations.push(operation(name, "id"));
        }
        let mut cart = class("org.acme.Shop.Cart");
        cart.operations.push(operation("addItem", "id"));
        cart.operations.push(operation("removeItem", "id"));

        let before = model(vec![store, shop]);
        let after = model(vec![class("org.acme.Store"), class("org.acme.Shop"), cart]);
        let diff = DiffEngine::new().diff(&before, &after).unwrap();
        assert_eq!(diff.class_diffs().len(), 2);
        assert_eq!(
            extract_lines(&diff),
            vec!["Extract Class\torg.acme.Shop.Cart\tfrom class\torg.acme.Shop".to_string()]
        );
    }

    #[test]
    fn test_competing_sources_ordered_by_class_diff() {
        let mut beta = class("org.acme.Beta");
        let mut alpha = class("org.acme.Alpha");
        for name in ["p1", "p2"] {
            beta.operations.push(operation(name, "x"));
            alpha.operations.push(operation(name, "x"));
        }
        let mut cart = class("org.acme.Cart");
        cart.operations.push(operation("p1", "x"));
        cart.operations.push(operation("p2", "x"));

        let before = model(vec![beta, alpha]);
        let after = model(vec![class("org.acme.Beta"), class("org.acme.Alpha"), cart]);
        let diff = DiffEngine::new().diff(&before, &after).unwrap();
        assert_eq!(diff.class_diffs()[0].next().name, "org.acme.Beta");
        assert_eq!(
            extract_lines(&diff),
            vec![
                "Extract Class\torg.acme.Cart\tfrom class\torg.acme.Alpha".to_string(),
                "Extract Class\torg.acme.Cart\tfrom class\torg.acme.Beta".to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_class_disabled() {
        let (before, after) = extract_fixture(None);
        let config = DiffConfig {
            detect_extract_class: false,
            ..DiffConfig::default()
        };
        let diff = DiffEngine::with_config(config).diff(&before, &after).unwrap();
        assert!(diff.refactorings().is_empty());
    }

    #[test]
    fn test_watchdog_aborts() {
        let (before, after) = extract_fixture(None);
        let calls = Cell::new(0);
        let watchdog = || {
            calls.set(calls.get() + 1);
            true
        };
        let result = DiffEngine::new().diff_with_watchdog(&before, &after, &watchdog);
        assert!(matches!(result, Err(DiffError::TimedOut)));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_call_tree_respects_depth() {
        let mut a = Operation::new("a");
        let mut b = Operation::new("b");
        let mut c = Operation::new("c");
        let d = Operation::new("d");
        a.invocations.push(Invocation::new("b"));
        b.invocations.push(Invocation::new("c"));
        c.invocations.push(Invocation::new("d"));
        let ops = [&a, &b, &c, &d];

        let engine = DiffEngine::with_config(DiffConfig {
            max_call_depth: 2,
            ..DiffConfig::default()
        });
        let root = CallTreeNode::new(&a, &b, &a.invocations[0]);
        let tree = engine.call_tree(root, &ops[..]);
        // b -> c -> d
        assert_eq!(tree.len(), 3);
    }
}
