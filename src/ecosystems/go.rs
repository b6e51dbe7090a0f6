//! Go stack from go.mod

use super::ManifestContext;
use crate::detection::{ManifestKind, StackName, TechStackEntry};
use regex::Regex;

pub fn build(ctx: &ManifestContext<'_>) -> TechStackEntry {
    TechStackEntry::new(StackName::Go)
        .with_version(ctx.manifest(ManifestKind::GoMod).and_then(parse_go_version))
}

/// `go 1.21` directive of a go.mod file
pub fn parse_go_version(content: &str) -> Option<String> {
    let re = Regex::new(r"(?m)^go\s+(\d+\.\d+(?:\.\d+)?)").ok()?;
    let caps = re.captures(content)?;
    Some(caps.get(1)?.as_str().to_string())
}
