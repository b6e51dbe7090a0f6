//! PHP stack from composer.json or loose `.php` sources

use super::{json_object_keys, ManifestContext};
use crate::detection::{ManifestKind, StackName, TechStackEntry};
use serde_json::Value;

pub fn build(ctx: &ManifestContext<'_>) -> TechStackEntry {
    let entry = TechStackEntry::new(StackName::Php);
    let Some(content) = ctx.manifest(ManifestKind::ComposerJson) else {
        return entry;
    };
    let Ok(composer) = serde_json::from_str::<Value>(content) else {
        return entry;
    };

    entry
        .with_build_tool("Composer")
        .with_dependencies(packages(&composer, "require"))
        .with_dev_dependencies(packages(&composer, "require-dev"))
}

/// Composer packages, leaving out the platform requirements (`php`, `ext-*`)
fn packages(composer: &Value, field: &str) -> Vec<String> {
    json_object_keys(composer, field)
        .into_iter()
        .filter(|name| name != "php" && !name.starts_with("ext-"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::ManifestSet;
    use crate::repository::FileListing;

    #[test]
    fn test_composer_packages() {
        let listing = FileListing::from_paths(["composer.json"]);
        let manifests = ManifestSet::new().with(
            ManifestKind::ComposerJson,
            r#"{"require": {"php": "^8.1", "ext-json": "*", "laravel/framework": "^10"},
                "require-dev": {"phpunit/phpunit": "^10"}}"#,
        );
        let entry = build(&ManifestContext::new(&listing, &manifests));
        assert_eq!(entry.dependencies, vec!["laravel/framework"]);
        assert_eq!(entry.dev_dependencies, vec!["phpunit/phpunit"]);
        assert_eq!(entry.version, "8.x");
    }

    #[test]
    fn test_source_files_only() {
        let listing = FileListing::from_paths(["index.php"]);
        let manifests = ManifestSet::new();
        let entry = build(&ManifestContext::new(&listing, &manifests));
        assert!(entry.build_tool.is_none());
        assert!(entry.dependencies.is_empty());
    }
}
