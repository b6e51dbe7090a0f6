//! Recognized manifest files and the set of fetched manifest contents

use crate::repository::FileListing;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Container build file, used only as a presence signal and never fetched
pub const CONTAINERFILE: &str = "Dockerfile";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ManifestKind {
    PackageJson,
    Requirements,
    Gemfile,
    GoMod,
    PomXml,
    BuildGradle,
    CargoToml,
    ComposerJson,
    Pubspec,
}

impl ManifestKind {
    pub const ALL: [ManifestKind; 9] = [
        ManifestKind::PackageJson,
        ManifestKind::Requirements,
        ManifestKind::Gemfile,
        ManifestKind::GoMod,
        ManifestKind::PomXml,
        ManifestKind::BuildGradle,
        ManifestKind::CargoToml,
        ManifestKind::ComposerJson,
        ManifestKind::Pubspec,
    ];

    pub fn filename(self) -> &'static str {
        match self {
            ManifestKind::PackageJson => "package.json",
            ManifestKind::Requirements => "requirements.txt",
            ManifestKind::Gemfile => "Gemfile",
            ManifestKind::GoMod => "go.mod",
            ManifestKind::PomXml => "pom.xml",
            ManifestKind::BuildGradle => "build.gradle",
            ManifestKind::CargoToml => "Cargo.toml",
            ManifestKind::ComposerJson => "composer.json",
            ManifestKind::Pubspec => "pubspec.yaml",
        }
    }

    /// Case-sensitive lookup by file name
    pub fn from_filename(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.filename() == name)
    }

    /// Manifests present at the top level of a listing, in listing order
    pub fn present_in(listing: &FileListing) -> Vec<ManifestKind> {
        let mut found = Vec::new();
        for entry in listing.iter().filter(|e| e.is_top_level()) {
            if let Some(kind) = Self::from_filename(&entry.path) {
                if !found.contains(&kind) {
                    found.push(kind);
                }
            }
        }
        found
    }
}

/// Raw contents of the manifests that exist and could be fetched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestSet {
    contents: BTreeMap<ManifestKind, String>,
}

impl ManifestSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: ManifestKind, content: impl Into<String>) -> Self {
        self.insert(kind, content);
        self
    }

    pub fn insert(&mut self, kind: ManifestKind, content: impl Into<String>) {
        self.contents.insert(kind, content.into());
    }

    pub fn get(&self, kind: ManifestKind) -> Option<&str> {
        self.contents.get(&kind).map(String::as_str)
    }

    pub fn contains(&self, kind: ManifestKind) -> bool {
        self.contents.contains_key(&kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = ManifestKind> + '_ {
        self.contents.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_filename_is_case_sensitive() {
        assert_eq!(ManifestKind::from_filename("Gemfile"), Some(ManifestKind::Gemfile));
        assert_eq!(ManifestKind::from_filename("gemfile"), None);
        assert_eq!(ManifestKind::from_filename("cargo.toml"), None);
        assert_eq!(ManifestKind::from_filename(CONTAINERFILE), None);
    }

    #[test]
    fn test_present_in_only_top_level() {
        let listing = FileListing::from_paths([
            "frontend/package.json",
            "go.mod",
            "requirements.txt",
            "go.mod",
        ]);
        assert_eq!(
            ManifestKind::present_in(&listing),
            vec![ManifestKind::GoMod, ManifestKind::Requirements]
        );
    }

    #[test]
    fn test_manifest_set() {
        let set = ManifestSet::new().with(ManifestKind::GoMod, "module x\n\ngo 1.21\n");
        assert!(set.contains(ManifestKind::GoMod));
        assert!(!set.contains(ManifestKind::PackageJson));
        assert_eq!(set.len(), 1);
        assert!(set.get(ManifestKind::GoMod).unwrap().contains("go 1.21"));
    }
}
