//! Python stack from requirements.txt

use super::ManifestContext;
use crate::detection::{ManifestKind, StackName, TechStackEntry};

pub fn build(ctx: &ManifestContext<'_>) -> TechStackEntry {
    let entry = TechStackEntry::new(StackName::Python).with_build_tool("pip");
    match ctx.manifest(ManifestKind::Requirements) {
        Some(content) => entry.with_dependencies(parse_requirements(content)),
        None => entry,
    }
}

/// Package names from a requirements listing with version specifiers,
/// extras and environment markers removed
///
/// VCS and URL requirements contribute their `#egg=` name; bare URLs and
/// local paths carry no package name and are skipped.
pub fn parse_requirements(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .filter_map(requirement_name)
        .collect()
}

fn requirement_name(line: &str) -> Option<String> {
    if let Some((_, fragment)) = line.split_once("#egg=") {
        let egg = fragment
            .split(|c: char| c == '&' || c.is_whitespace())
            .next()
            .unwrap_or_default();
        return package_name(egg);
    }
    package_name(line).filter(|name| !name.contains(['/', ':']))
}

fn package_name(spec: &str) -> Option<String> {
    let end = spec
        .find(|c: char| "=<>!~;[ @\t".contains(c))
        .unwrap_or(spec.len());
    let name = spec[..end].trim();
    (!name.is_empty()).then(|| name.to_string())
}
