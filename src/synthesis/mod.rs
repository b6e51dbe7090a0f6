//! Development-environment artifact generation
//!
//! [`synthesize`] renders one document per [`ArtifactSlot`] from a
//! [`StackProfile`]. The application port is resolved once and handed to every
//! generator, so the compose mapping, guide URLs and startup script always agree.

pub mod compose;
pub mod devcontainer;
pub mod editor;
pub mod guide;
pub mod overlay;
pub mod port;
pub mod startup;

use crate::detection::StackProfile;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub use port::{resolve_app_port, DEFAULT_APP_PORT};

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Failed to serialize YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to serialize JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fixed output slots of a bundle, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ArtifactSlot {
    Orchestration,
    ContainerDescriptor,
    EditorSettings,
    EditorExtensions,
    Guide,
    StartupScript,
}

impl ArtifactSlot {
    pub const ALL: [ArtifactSlot; 6] = [
        ArtifactSlot::Orchestration,
        ArtifactSlot::ContainerDescriptor,
        ArtifactSlot::EditorSettings,
        ArtifactSlot::EditorExtensions,
        ArtifactSlot::Guide,
        ArtifactSlot::StartupScript,
    ];

    pub fn path(self) -> &'static str {
        match self {
            ArtifactSlot::Orchestration => "docker-compose.yml",
            ArtifactSlot::ContainerDescriptor => ".devcontainer/devcontainer.json",
            ArtifactSlot::EditorSettings => ".vscode/settings.json",
            ArtifactSlot::EditorExtensions => ".vscode/extensions.json",
            ArtifactSlot::Guide => "DEVELOPMENT.md",
            ArtifactSlot::StartupScript => "scripts/dev-setup.sh",
        }
    }

    pub fn is_executable(self) -> bool {
        self == ArtifactSlot::StartupScript
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    pub slot: ArtifactSlot,
    pub path: String,
    pub content: String,
}

impl GeneratedArtifact {
    fn new(slot: ArtifactSlot, content: String) -> Self {
        Self {
            slot,
            path: slot.path().to_string(),
            content,
        }
    }
}

/// Renders the six bundle artifacts, stamping the guide with the current time
pub fn synthesize(profile: &StackProfile) -> Result<Vec<GeneratedArtifact>, SynthesisError> {
    synthesize_at(profile, Utc::now())
}

/// Renders the six bundle artifacts with an explicit generation timestamp
pub fn synthesize_at(
    profile: &StackProfile,
    generated_at: DateTime<Utc>,
) -> Result<Vec<GeneratedArtifact>, SynthesisError> {
    let app_port = resolve_app_port(profile);
    debug!(repository = %profile.repository, app_port, "Synthesizing bundle");

    ArtifactSlot::ALL
        .into_iter()
        .map(|slot| -> Result<GeneratedArtifact, SynthesisError> {
            let content = match slot {
                ArtifactSlot::Orchestration => compose::render(profile, app_port)?,
                ArtifactSlot::ContainerDescriptor => devcontainer::render(profile)?,
                ArtifactSlot::EditorSettings => editor::render_settings(profile)?,
                ArtifactSlot::EditorExtensions => editor::render_extensions(profile)?,
                ArtifactSlot::Guide => guide::render(profile, app_port, generated_at),
                ArtifactSlot::StartupScript => startup::render(profile, app_port),
            };
            Ok(GeneratedArtifact::new(slot, content))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{detect, ManifestSet};
    use crate::repository::{FileListing, RepositoryHandle};

    #[test]
    fn test_slot_paths_are_unique() {
        let mut paths: Vec<&str> = ArtifactSlot::ALL.iter().map(|s| s.path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 6);
    }

    #[test]
    fn test_empty_profile_yields_six_artifacts() {
        let profile = detect(
            RepositoryHandle::new("o", "r"),
            "",
            FileListing::default(),
            &ManifestSet::new(),
        )
        .unwrap();
        let artifacts = synthesize(&profile).unwrap();
        assert_eq!(artifacts.len(), 6);
        for (artifact, slot) in artifacts.iter().zip(ArtifactSlot::ALL) {
            assert_eq!(artifact.slot, slot);
            assert_eq!(artifact.path, slot.path());
            assert!(!artifact.content.is_empty());
        }
    }
}
