//! Ordered stack detection table
//!
//! The order of [`RULES`] is the order entries appear in a profile, and the
//! synthesizer relies on it when composing install commands and overlays.

use super::manifest::{ManifestKind, CONTAINERFILE};
use super::types::{StackName, TechStackEntry};
use crate::ecosystems::{self, ManifestContext};

/// Condition under which a rule contributes a stack entry
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// The manifest was fetched into the manifest set
    Manifest(ManifestKind),
    /// Any of the manifests was fetched
    AnyManifest(&'static [ManifestKind]),
    /// Some file in the listing has exactly this base name
    FileName(&'static str),
    /// Some file in the listing ends with one of these extensions
    Extension(&'static [&'static str]),
    /// Manifest fetched, or a file with one of the extensions exists
    ManifestOrExtension(ManifestKind, &'static [&'static str]),
}

impl Trigger {
    pub fn is_satisfied(&self, ctx: &ManifestContext<'_>) -> bool {
        match *self {
            Trigger::Manifest(kind) => ctx.manifests.contains(kind),
            Trigger::AnyManifest(kinds) => kinds.iter().any(|k| ctx.manifests.contains(*k)),
            Trigger::FileName(name) => ctx.listing.contains_name(name),
            Trigger::Extension(extensions) => ctx.listing.any_extension(extensions),
            Trigger::ManifestOrExtension(kind, extensions) => {
                ctx.manifests.contains(kind) || ctx.listing.any_extension(extensions)
            }
        }
    }
}

pub struct DetectionRule {
    pub stack: StackName,
    pub trigger: Trigger,
    pub build: fn(&ManifestContext<'_>) -> TechStackEntry,
}

pub static RULES: &[DetectionRule] = &[
    DetectionRule {
        stack: StackName::Node,
        trigger: Trigger::Manifest(ManifestKind::PackageJson),
        build: ecosystems::node::build,
    },
    DetectionRule {
        stack: StackName::Python,
        trigger: Trigger::Manifest(ManifestKind::Requirements),
        build: ecosystems::python::build,
    },
    DetectionRule {
        stack: StackName::Docker,
        trigger: Trigger::FileName(CONTAINERFILE),
        build: ecosystems::docker::build,
    },
    DetectionRule {
        stack: StackName::Java,
        trigger: Trigger::AnyManifest(&[ManifestKind::PomXml, ManifestKind::BuildGradle]),
        build: ecosystems::java::build,
    },
    DetectionRule {
        stack: StackName::Go,
        trigger: Trigger::Manifest(ManifestKind::GoMod),
        build: ecosystems::go::build,
    },
    DetectionRule {
        stack: StackName::Ruby,
        trigger: Trigger::Manifest(ManifestKind::Gemfile),
        build: ecosystems::ruby::build,
    },
    DetectionRule {
        stack: StackName::Php,
        trigger: Trigger::ManifestOrExtension(ManifestKind::ComposerJson, &["php"]),
        build: ecosystems::php::build,
    },
    DetectionRule {
        stack: StackName::Rust,
        trigger: Trigger::Manifest(ManifestKind::CargoToml),
        build: ecosystems::rust::build,
    },
    DetectionRule {
        stack: StackName::DotNet,
        trigger: Trigger::Extension(ecosystems::dotnet::EXTENSIONS),
        build: ecosystems::dotnet::build,
    },
    DetectionRule {
        stack: StackName::Dart,
        trigger: Trigger::Manifest(ManifestKind::Pubspec),
        build: ecosystems::dart::build,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_order() {
        let order: Vec<StackName> = RULES.iter().map(|r| r.stack).collect();
        assert_eq!(
            order,
            vec![
                StackName::Node,
                StackName::Python,
                StackName::Docker,
                StackName::Java,
                StackName::Go,
                StackName::Ruby,
                StackName::Php,
                StackName::Rust,
                StackName::DotNet,
                StackName::Dart,
            ]
        );
    }

    #[test]
    fn test_builders_match_their_stack() {
        let listing = crate::repository::FileListing::default();
        let manifests = crate::detection::ManifestSet::new();
        let ctx = ManifestContext::new(&listing, &manifests);
        for rule in RULES {
            assert_eq!((rule.build)(&ctx).name, rule.stack);
        }
    }
}
