//! Java stack from Maven or Gradle build descriptors

use super::ManifestContext;
use crate::detection::{ManifestKind, StackName, TechStackEntry};

pub const MAVEN: &str = "Maven";
pub const GRADLE: &str = "Gradle";

pub fn build(ctx: &ManifestContext<'_>) -> TechStackEntry {
    let has = |kind: ManifestKind| {
        ctx.manifests.contains(kind) || ctx.listing.contains_path(kind.filename())
    };

    let entry = TechStackEntry::new(StackName::Java);
    if has(ManifestKind::PomXml) {
        entry.with_build_tool(MAVEN)
    } else if has(ManifestKind::BuildGradle) {
        entry.with_build_tool(GRADLE)
    } else {
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::ManifestSet;
    use crate::repository::FileListing;

    #[test]
    fn test_maven_preferred_over_gradle() {
        let listing = FileListing::from_paths(["pom.xml", "build.gradle"]);
        let manifests = ManifestSet::new()
            .with(ManifestKind::PomXml, "<project/>")
            .with(ManifestKind::BuildGradle, "plugins {}");
        let entry = build(&ManifestContext::new(&listing, &manifests));
        assert_eq!(entry.build_tool.as_deref(), Some(MAVEN));
        assert_eq!(entry.version, "17");
    }

    #[test]
    fn test_gradle_only() {
        let listing = FileListing::from_paths(["build.gradle"]);
        let manifests = ManifestSet::new().with(ManifestKind::BuildGradle, "plugins {}");
        let entry = build(&ManifestContext::new(&listing, &manifests));
        assert_eq!(entry.build_tool.as_deref(), Some(GRADLE));
    }
}
