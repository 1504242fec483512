use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::snapshot::Model;
use crate::matching::engine::{DiffConfig, DiffEngine, ModelDiff};
use crate::refactoring::Refactoring;

#[derive(Args)]
pub struct DiffArgs {
    /// Snapshot before the change (JSON)
    #[arg(required = true)]
    pub before: PathBuf,

    /// Snapshot after the change (JSON)
    #[arg(required = true)]
    pub after: PathBuf,

    /// Engine configuration file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: DiffArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => DiffConfig::load_from_file(path)?,
        None => DiffConfig::default(),
    };

    let before = Model::load_from_file(&args.before)?;
    let after = Model::load_from_file(&args.after)?;

    if verbose {
        eprintln!(
            "Before: {} classes, {} modules, {} packages",
            before.classes.len(),
            before.modules.len(),
            before.packages.len()
        );
        eprintln!(
            "After: {} classes, {} modules, {} packages",
            after.classes.len(),
            after.modules.len(),
            after.packages.len()
        );
    }

    let engine = DiffEngine::with_config(config);
    let diff = engine.diff(&before, &after)?;

    match format {
        OutputFormat::Text => print_text_diff(&diff, verbose),
        OutputFormat::Json => print_json_diff(&diff)?,
        OutputFormat::Tsv => print_tsv_diff(&diff),
    }

    Ok(())
}

fn print_text_diff(diff: &ModelDiff<'_>, verbose: bool) {
    if verbose {
        eprintln!(
            "Classes: {} removed, {} added, {} changed",
            diff.removed_classes().len(),
            diff.added_classes().len(),
            diff.class_diffs().len()
        );
    }

    if diff.refactorings().is_empty() {
        println!("No refactorings detected.");
        return;
    }
    for refactoring in diff.refactorings() {
        println!("{refactoring}");
    }
}

fn print_json_diff(diff: &ModelDiff<'_>) -> anyhow::Result<()> {
    let refactorings: Vec<serde_json::Value> =
        diff.refactorings().iter().map(refactoring_json).collect();

    let output = serde_json::json!({
        "summary": {
            "removed_classes": diff.removed_classes().iter().map(|c| &c.name).collect::<Vec<_>>(),
            "added_classes": diff.added_classes().iter().map(|c| &c.name).collect::<Vec<_>>(),
            "changed_classes": diff.class_diffs().iter().map(|d| &d.next().name).collect::<Vec<_>>(),
            "changed_modules": diff.module_diffs().len(),
            "changed_packages": diff.package_diffs().len(),
        },
        "refactorings": refactorings,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn refactoring_json(refactoring: &Refactoring<'_>) -> serde_json::Value {
    let involved = |classes: std::collections::BTreeSet<(&str, &str)>| {
        classes
            .into_iter()
            .map(|(file, class)| serde_json::json!({ "file": file, "class": class }))
            .collect::<Vec<_>>()
    };

    serde_json::json!({
        "type": refactoring.kind(),
        "name": refactoring.display_name(),
        "description": refactoring.to_string(),
        "left_side": refactoring.left_side(),
        "right_side": refactoring.right_side(),
        "involved_classes_before": involved(refactoring.involved_classes_before()),
        "involved_classes_after": involved(refactoring.involved_classes_after()),
    })
}

fn print_tsv_diff(diff: &ModelDiff<'_>) {
    println!("type\trefactoring");
    for refactoring in diff.refactorings() {
        let tag = serde_json::to_value(refactoring.kind())
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        println!("{tag}\t{refactoring}");
    }
}
