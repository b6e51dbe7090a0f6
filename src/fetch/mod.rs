//! Repository fetching
//!
//! A [`RepositoryFetcher`] resolves a [`RepositoryHandle`] into a depth-bounded
//! file listing and raw manifest contents. Detection never performs I/O itself;
//! it is handed what the fetcher returned.

mod github;
mod local;

pub use github::{GitHubFetcher, DEFAULT_API_URL};
pub use local::LocalFetcher;

use crate::detection::{ManifestKind, ManifestSet};
use crate::repository::{FileListing, RepositoryHandle};
use async_trait::async_trait;
use futures_util::future::join_all;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// Listings stop descending past this many path segments
pub const DEFAULT_MAX_DEPTH: usize = 3;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Repository not found: {0}")]
    NotFound(String),

    #[error("API rate limit exceeded; set DEVBUNDLE_GITHUB_TOKEN to raise the limit")]
    RateLimited,

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Repository-level information that is not part of the file tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryMetadata {
    pub description: String,
    pub default_branch: Option<String>,
}

#[async_trait]
pub trait RepositoryFetcher: Send + Sync {
    /// Short name of the fetcher, used in logs
    fn name(&self) -> &str;

    async fn fetch_metadata(
        &self,
        repository: &RepositoryHandle,
    ) -> Result<RepositoryMetadata, FetchError>;

    /// Depth-bounded file listing in traversal order
    async fn fetch_listing(&self, repository: &RepositoryHandle) -> Result<FileListing, FetchError>;

    /// Raw contents of a file, `None` when it does not exist
    async fn fetch_manifest(
        &self,
        repository: &RepositoryHandle,
        path: &str,
    ) -> Result<Option<String>, FetchError>;
}

/// Fetches every recognized top-level manifest in the listing concurrently
///
/// A manifest that cannot be fetched is left out of the set rather than
/// failing the analysis.
pub async fn collect_manifests(
    fetcher: &dyn RepositoryFetcher,
    repository: &RepositoryHandle,
    listing: &FileListing,
) -> ManifestSet {
    let kinds = ManifestKind::present_in(listing);
    let fetches = kinds
        .iter()
        .map(|kind| fetcher.fetch_manifest(repository, kind.filename()));
    let results = join_all(fetches).await;

    let mut manifests = ManifestSet::new();
    for (kind, result) in kinds.into_iter().zip(results) {
        match result {
            Ok(Some(content)) => {
                debug!(manifest = kind.filename(), bytes = content.len(), "Fetched manifest");
                manifests.insert(kind, content);
            }
            Ok(None) => {
                warn!(manifest = kind.filename(), "Listed manifest disappeared before fetch");
            }
            Err(e) => {
                warn!(manifest = kind.filename(), error = %e, "Skipping manifest that could not be fetched");
            }
        }
    }
    manifests
}
