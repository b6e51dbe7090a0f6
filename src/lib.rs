//! devbundle - repository stack detection and development-environment bundles
//!
//! Given a repository's file listing and the contents of its recognized
//! manifests, devbundle detects the technology stacks and backing services in
//! use and renders a bundle of six files that stand up a working development
//! environment.
//!
//! # Core Concepts
//!
//! - **Detection**: pure function from a listing and manifests to a
//!   [`StackProfile`], driven by an ordered rule table
//! - **Synthesis**: pure functions from a profile to [`GeneratedArtifact`]s,
//!   all sharing one resolved application port
//! - **Fetching**: a [`RepositoryFetcher`] for the GitHub API or a local checkout
//!
//! # Example Usage
//!
//! ```
//! use devbundle::{detect, synthesize, FileListing, ManifestKind, ManifestSet, RepositoryHandle};
//!
//! let repository = RepositoryHandle::parse("acme/shop").unwrap();
//! let listing = FileListing::from_paths(["package.json", "server.js"]);
//! let manifests = ManifestSet::new()
//!     .with(ManifestKind::PackageJson, r#"{"dependencies": {"express": "^4"}}"#);
//!
//! let profile = detect(repository, "", listing, &manifests).unwrap();
//! assert_eq!(profile.ports, vec![3000]);
//!
//! let artifacts = synthesize(&profile).unwrap();
//! assert_eq!(artifacts.len(), 6);
//! ```

pub mod cli;
pub mod config;
pub mod detection;
pub mod ecosystems;
pub mod fetch;
pub mod packaging;
pub mod repository;
pub mod service;
pub mod synthesis;
pub mod util;

pub use config::{ConfigError, DevbundleConfig};
pub use detection::{
    detect, DetectionError, ManifestKind, ManifestSet, ServiceEntry, ServiceKind, StackName,
    StackProfile, TechStackEntry,
};
pub use fetch::{FetchError, GitHubFetcher, LocalFetcher, RepositoryFetcher, RepositoryMetadata};
pub use packaging::{write_archive, write_directory, PackagingError};
pub use repository::{FileEntry, FileListing, RepositoryError, RepositoryHandle};
pub use service::{AnalysisService, Bundle, ServiceError};
pub use synthesis::{
    resolve_app_port, synthesize, synthesize_at, ArtifactSlot, GeneratedArtifact, SynthesisError,
    DEFAULT_APP_PORT,
};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
