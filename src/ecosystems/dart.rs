//! Dart and Flutter stack from pubspec.yaml

use super::ManifestContext;
use crate::detection::{ManifestKind, StackName, TechStackEntry};
use serde_yaml::Value;

pub const FLUTTER: &str = "Flutter";

pub fn build(ctx: &ManifestContext<'_>) -> TechStackEntry {
    let entry = TechStackEntry::new(StackName::Dart);
    let Some(pubspec) = ctx
        .manifest(ManifestKind::Pubspec)
        .and_then(|content| serde_yaml::from_str::<Value>(content).ok())
    else {
        return entry.with_build_tool("Dart");
    };

    let sdk = pubspec
        .get("environment")
        .and_then(|env| env.get("sdk"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let dependencies = mapping_keys(&pubspec, "dependencies");
    let tool = if dependencies.iter().any(|d| d == "flutter") {
        FLUTTER
    } else {
        "Dart"
    };

    entry
        .with_version(sdk)
        .with_build_tool(tool)
        .with_dependencies(dependencies)
        .with_dev_dependencies(mapping_keys(&pubspec, "dev_dependencies"))
}

fn mapping_keys(doc: &Value, field: &str) -> Vec<String> {
    doc.get(field)
        .and_then(Value::as_mapping)
        .map(|m| m.keys().filter_map(|k| k.as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}
