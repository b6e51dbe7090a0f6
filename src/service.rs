//! Analysis service orchestration
//!
//! [`AnalysisService`] drives one analysis end to end: it fetches repository
//! metadata and a listing through a [`RepositoryFetcher`], gathers manifests,
//! runs detection and, for bundles, synthesis.
//!
//! # Example
//!
//! ```no_run
//! use devbundle::{AnalysisService, DevbundleConfig, RepositoryHandle};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DevbundleConfig::default();
//! let service = AnalysisService::github(&config)?;
//!
//! let repository = RepositoryHandle::parse("rust-lang/cargo")?;
//! let profile = service.analyze(&repository).await?;
//! println!("{} stacks detected", profile.tech_stack.len());
//! # Ok(())
//! # }
//! ```

use crate::config::{ConfigError, DevbundleConfig};
use crate::detection::{detect, DetectionError, StackProfile};
use crate::fetch::{collect_manifests, FetchError, GitHubFetcher, LocalFetcher, RepositoryFetcher};
use crate::packaging::PackagingError;
use crate::repository::{RepositoryError, RepositoryHandle};
use crate::synthesis::{synthesize, GeneratedArtifact, SynthesisError};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Detection error: {0}")]
    Detection(#[from] DetectionError),

    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("Packaging error: {0}")]
    Packaging(#[from] PackagingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Repository path not found: {0}")]
    PathNotFound(PathBuf),
}

impl ServiceError {
    /// Returns a user-friendly error message with troubleshooting hints
    pub fn help_message(&self) -> String {
        match self {
            ServiceError::Repository(RepositoryError::InvalidReference { reference, reason }) => {
                format!(
                    "Error: Invalid repository reference\nReference: {}\n\n\
                    Help: Use one of the accepted forms:\n\
                    - owner/name\n\
                    - https://github.com/owner/name\n\
                    - git@github.com:owner/name.git\n\n\
                    Details: {}",
                    reference, reason
                )
            }
            ServiceError::PathNotFound(path) => {
                format!(
                    "Error: Repository path not found\nPath: {}\n\n\
                    Help: The specified path does not exist. Please check:\n\
                    - Is the path correct?\n\
                    - Is it a directory?\n\
                    - Do you have permission to read it?",
                    path.display()
                )
            }
            ServiceError::Fetch(FetchError::NotFound(what)) => {
                format!(
                    "Error: Repository not found\n\n\
                    Help: The repository could not be found. Try:\n\
                    - Check the owner and name spelling\n\
                    - Set DEVBUNDLE_GITHUB_TOKEN if the repository is private\n\n\
                    Details: {}",
                    what
                )
            }
            ServiceError::Fetch(FetchError::RateLimited) => "Error: GitHub API rate limit exceeded\n\n\
                Help: Unauthenticated requests are heavily rate limited. Try:\n\
                - export DEVBUNDLE_GITHUB_TOKEN=<token>\n\
                - Wait for the rate limit window to reset\n\
                - Analyze a local checkout with --path"
                .to_string(),
            ServiceError::Fetch(FetchError::Request(e)) if e.is_timeout() => {
                format!(
                    "Error: Request timed out\n\n\
                    Help: The GitHub API did not respond in time. Try:\n\
                    - Increase DEVBUNDLE_REQUEST_TIMEOUT\n\
                    - Check network connectivity\n\n\
                    Details: {}",
                    e
                )
            }
            ServiceError::Fetch(e) => {
                format!(
                    "Error: Failed to fetch repository contents\n\n\
                    Help: Try:\n\
                    - Check network connectivity\n\
                    - Check DEVBUNDLE_API_URL points at a GitHub API\n\
                    - Retry the operation\n\n\
                    Details: {}",
                    e
                )
            }
            ServiceError::Config(e) => {
                format!(
                    "Error: Configuration error\n\n\
                    Help: Configuration validation failed. Try:\n\
                    - Check DEVBUNDLE_* environment variables\n\
                    - Run with --log-level debug for details\n\n\
                    Details: {}",
                    e
                )
            }
            other => format!("Error: {}", other),
        }
    }
}

/// A generated bundle together with the profile it was derived from
#[derive(Debug, Clone)]
pub struct Bundle {
    pub profile: StackProfile,
    pub artifacts: Vec<GeneratedArtifact>,
}

pub struct AnalysisService {
    fetcher: Arc<dyn RepositoryFetcher>,
}

impl std::fmt::Debug for AnalysisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisService")
            .field("fetcher", &self.fetcher.name())
            .finish()
    }
}

impl AnalysisService {
    pub fn new(fetcher: Arc<dyn RepositoryFetcher>) -> Self {
        info!("Analysis service initialized with fetcher: {}", fetcher.name());
        Self { fetcher }
    }

    /// Service backed by the GitHub API, configured from `config`
    pub fn github(config: &DevbundleConfig) -> Result<Self, ServiceError> {
        config.validate()?;
        let fetcher = GitHubFetcher::from_config(config)?;
        Ok(Self::new(Arc::new(fetcher)))
    }

    /// Service backed by a directory on disk
    pub fn local(root: impl Into<PathBuf>, config: &DevbundleConfig) -> Result<Self, ServiceError> {
        config.validate()?;
        let root = root.into();
        if !root.is_dir() {
            return Err(ServiceError::PathNotFound(root));
        }
        let fetcher = LocalFetcher::new(root).with_max_depth(config.max_depth);
        Ok(Self::new(Arc::new(fetcher)))
    }

    /// Fetches and analyzes a repository into a [`StackProfile`]
    pub async fn analyze(&self, repository: &RepositoryHandle) -> Result<StackProfile, ServiceError> {
        let start = Instant::now();
        info!(repository = %repository, fetcher = self.fetcher.name(), "Starting analysis");

        let metadata = self.fetcher.fetch_metadata(repository).await?;
        let listing = self.fetcher.fetch_listing(repository).await?;
        let manifests = collect_manifests(self.fetcher.as_ref(), repository, &listing).await;

        let profile = detect(repository.clone(), metadata.description, listing, &manifests)?;

        info!(
            repository = %repository,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Analysis complete"
        );
        Ok(profile)
    }

    /// Analyzes a repository and renders its development bundle
    pub async fn generate(&self, repository: &RepositoryHandle) -> Result<Bundle, ServiceError> {
        let profile = self.analyze(repository).await?;
        let artifacts = synthesize(&profile)?;
        info!(
            repository = %repository,
            artifacts = artifacts.len(),
            "Bundle generated"
        );
        Ok(Bundle { profile, artifacts })
    }
}
