//! Ruby stack from a Gemfile

use super::ManifestContext;
use crate::detection::{ManifestKind, StackName, TechStackEntry};
use regex::Regex;

pub fn build(ctx: &ManifestContext<'_>) -> TechStackEntry {
    let entry = TechStackEntry::new(StackName::Ruby).with_build_tool("Bundler");
    match ctx.manifest(ManifestKind::Gemfile) {
        Some(content) => entry
            .with_version(parse_ruby_version(content))
            .with_dependencies(parse_gems(content)),
        None => entry,
    }
}

/// `ruby "3.2.2"` declaration of a Gemfile
pub fn parse_ruby_version(content: &str) -> Option<String> {
    let re = Regex::new(r#"(?m)^\s*ruby\s+['"](\d+\.\d+(?:\.\d+)?)['"]"#).ok()?;
    let caps = re.captures(content)?;
    Some(caps.get(1)?.as_str().to_string())
}

fn parse_gems(content: &str) -> Vec<String> {
    let Ok(re) = Regex::new(r#"(?m)^\s*gem\s+['"]([^'"]+)['"]"#) else {
        return Vec::new();
    };
    re.captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}
