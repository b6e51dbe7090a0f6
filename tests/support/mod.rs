//! Shared helpers for integration tests

#![allow(dead_code)]

use devbundle::{detect, FileListing, ManifestKind, ManifestSet, RepositoryHandle, StackProfile};
use std::fs;
use std::path::{Path, PathBuf};

/// Path to a checked-in fixture repository under tests/fixtures
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Writes `files` (relative path, content) under `root`
pub fn write_repo(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full = root.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        fs::write(&full, content).expect("Failed to write fixture file");
    }
}

/// Detects a profile from bare paths and in-memory manifests
pub fn profile_from(paths: &[&str], manifests: &[(ManifestKind, &str)]) -> StackProfile {
    let set = manifests
        .iter()
        .fold(ManifestSet::new(), |set, (kind, content)| {
            set.with(*kind, *content)
        });
    detect(
        RepositoryHandle::new("acme", "fixture"),
        "",
        FileListing::from_paths(paths.iter().copied()),
        &set,
    )
    .expect("Detection failed")
}

pub fn get_devbundle_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_devbundle"))
}
