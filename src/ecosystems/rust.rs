//! Rust stack from Cargo.toml

use super::ManifestContext;
use crate::detection::{ManifestKind, StackName, TechStackEntry};
use tracing::debug;

pub fn build(ctx: &ManifestContext<'_>) -> TechStackEntry {
    let entry = TechStackEntry::new(StackName::Rust).with_build_tool("Cargo");
    let Some(content) = ctx.manifest(ManifestKind::CargoToml) else {
        return entry;
    };

    let manifest: toml::Table = match content.parse() {
        Ok(table) => table,
        Err(e) => {
            debug!(error = %e, "Cargo.toml could not be parsed, using defaults");
            return entry;
        }
    };

    let rust_version = manifest
        .get("package")
        .and_then(|p| p.get("rust-version"))
        .and_then(|v| v.as_str())
        .map(str::to_string);

    entry
        .with_version(rust_version)
        .with_dependencies(table_keys(&manifest, "dependencies"))
        .with_dev_dependencies(table_keys(&manifest, "dev-dependencies"))
}

fn table_keys(manifest: &toml::Table, section: &str) -> Vec<String> {
    manifest
        .get(section)
        .and_then(|v| v.as_table())
        .map(|t| t.keys().cloned().collect())
        .unwrap_or_default()
}
