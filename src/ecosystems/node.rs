//! Node.js stack from package.json

use super::{json_object_keys, ManifestContext};
use crate::detection::{ManifestKind, StackName, TechStackEntry};
use crate::repository::FileListing;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

pub fn build(ctx: &ManifestContext<'_>) -> TechStackEntry {
    let entry = TechStackEntry::new(StackName::Node).with_build_tool(package_manager(ctx.listing));

    let Some(content) = ctx.manifest(ManifestKind::PackageJson) else {
        return entry;
    };

    let package: Value = match serde_json::from_str(content) {
        Ok(package) => package,
        Err(e) => {
            debug!(error = %e, "package.json is not valid JSON, using defaults");
            return entry;
        }
    };

    entry
        .with_version(engine_version(&package))
        .with_dependencies(json_object_keys(&package, "dependencies"))
        .with_dev_dependencies(json_object_keys(&package, "devDependencies"))
        .with_scripts(scripts(&package))
}

fn engine_version(package: &Value) -> Option<String> {
    package
        .get("engines")?
        .get("node")?
        .as_str()
        .map(str::to_string)
}

fn scripts(package: &Value) -> BTreeMap<String, String> {
    package
        .get("scripts")
        .and_then(Value::as_object)
        .map(|scripts| {
            scripts
                .iter()
                .filter_map(|(name, cmd)| cmd.as_str().map(|c| (name.clone(), c.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

fn package_manager(listing: &FileListing) -> &'static str {
    if listing.contains_path("pnpm-lock.yaml") {
        "pnpm"
    } else if listing.contains_path("yarn.lock") {
        "yarn"
    } else {
        "npm"
    }
}
