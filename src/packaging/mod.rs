//! Bundle packaging
//!
//! Writes a set of [`GeneratedArtifact`](crate::synthesis::GeneratedArtifact)s either as a gzip-compressed tarball
//! or as plain files under a directory.

mod archive;
mod directory;

pub use archive::{write_archive, ARCHIVE_EXTENSION};
pub use directory::write_directory;

use std::path::PathBuf;
use thiserror::Error;

pub(crate) const EXECUTABLE_MODE: u32 = 0o755;
pub(crate) const REGULAR_MODE: u32 = 0o644;

#[derive(Debug, Error)]
pub enum PackagingError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PackagingError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PackagingError::Io {
            path: path.into(),
            source,
        }
    }
}
