use super::{PackagingError, EXECUTABLE_MODE, REGULAR_MODE};
use crate::synthesis::GeneratedArtifact;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use tar::{Builder, Header};
use tracing::debug;

pub const ARCHIVE_EXTENSION: &str = "tar.gz";

/// Writes the artifacts as a `.tar.gz` stream, each under `prefix/`
///
/// An empty prefix places the files at the archive root.
pub fn write_archive<W: Write>(
    artifacts: &[GeneratedArtifact],
    prefix: &str,
    writer: W,
) -> Result<W, PackagingError> {
    let prefix = prefix.trim_matches('/');
    let encoder = GzEncoder::new(writer, Compression::default());
    let mut builder = Builder::new(encoder);

    for artifact in artifacts {
        let path = if prefix.is_empty() {
            artifact.path.clone()
        } else {
            format!("{}/{}", prefix, artifact.path)
        };
        let bytes = artifact.content.as_bytes();

        let mut header = Header::new_gnu();
        header
            .set_path(&path)
            .map_err(|e| PackagingError::io(&path, e))?;
        header.set_size(bytes.len() as u64);
        header.set_mode(if artifact.slot.is_executable() {
            EXECUTABLE_MODE
        } else {
            REGULAR_MODE
        });
        header.set_mtime(0);
        header.set_cksum();

        builder
            .append(&header, bytes)
            .map_err(|e| PackagingError::io(&path, e))?;
        debug!(path = %path, bytes = bytes.len(), "Archived artifact");
    }

    let encoder = builder
        .into_inner()
        .map_err(|e| PackagingError::io(prefix, e))?;
    encoder.finish().map_err(|e| PackagingError::io(prefix, e))
}
