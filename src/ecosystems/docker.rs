//! Container runtime stack, signalled by a Dockerfile anywhere in the tree

use super::ManifestContext;
use crate::detection::{StackName, TechStackEntry};

pub fn build(ctx: &ManifestContext<'_>) -> TechStackEntry {
    let entry = TechStackEntry::new(StackName::Docker);
    if ctx.listing.contains_name("docker-compose.yml") || ctx.listing.contains_name("compose.yaml") {
        entry.with_build_tool("Docker Compose")
    } else {
        entry
    }
}
