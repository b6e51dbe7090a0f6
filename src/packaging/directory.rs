use super::PackagingError;
use crate::synthesis::GeneratedArtifact;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes each artifact under `dir`, creating parent directories as needed
///
/// Existing files at the same paths are overwritten. Returns the written paths
/// in artifact order.
pub fn write_directory(
    artifacts: &[GeneratedArtifact],
    dir: &Path,
) -> Result<Vec<PathBuf>, PackagingError> {
    let mut written = Vec::with_capacity(artifacts.len());

    for artifact in artifacts {
        let path = dir.join(&artifact.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| PackagingError::io(parent, e))?;
        }
        fs::write(&path, &artifact.content).map_err(|e| PackagingError::io(&path, e))?;

        #[cfg(unix)]
        if artifact.slot.is_executable() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(super::EXECUTABLE_MODE))
                .map_err(|e| PackagingError::io(&path, e))?;
        }

        debug!(path = %path.display(), "Wrote artifact");
        written.push(path);
    }

    Ok(written)
}
