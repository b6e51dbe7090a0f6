use super::{FetchError, RepositoryFetcher, RepositoryMetadata, DEFAULT_MAX_DEPTH};
use crate::repository::{FileEntry, FileListing, RepositoryHandle};
use async_trait::async_trait;
use ignore::WalkBuilder;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Serves a repository already checked out on disk
///
/// The handle passed to the trait methods is only used for logging; every
/// path resolves against `root`.
pub struct LocalFetcher {
    root: PathBuf,
    max_depth: usize,
}

impl LocalFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if segments.is_empty() {
            None
        } else {
            Some(segments.join("/"))
        }
    }

    fn walk(&self) -> Result<FileListing, FetchError> {
        if !self.root.is_dir() {
            return Err(FetchError::NotFound(self.root.display().to_string()));
        }

        let walker = WalkBuilder::new(&self.root)
            .max_depth(Some(self.max_depth))
            .hidden(false)
            .git_ignore(true)
            .require_git(false)
            .filter_entry(|entry| entry.file_name() != ".git")
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut listing = FileListing::default();
        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let Some(path) = self.relative_path(entry.path()) else {
                continue;
            };
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            listing.push(FileEntry::new(path, size));
        }
        Ok(listing)
    }
}

#[async_trait]
impl RepositoryFetcher for LocalFetcher {
    fn name(&self) -> &str {
        "local"
    }

    async fn fetch_metadata(
        &self,
        _repository: &RepositoryHandle,
    ) -> Result<RepositoryMetadata, FetchError> {
        Ok(RepositoryMetadata::default())
    }

    async fn fetch_listing(&self, repository: &RepositoryHandle) -> Result<FileListing, FetchError> {
        let listing = self.walk()?;
        info!(
            repository = %repository,
            root = %self.root.display(),
            files = listing.len(),
            "Scanned local repository"
        );
        Ok(listing)
    }

    async fn fetch_manifest(
        &self,
        _repository: &RepositoryHandle,
        path: &str,
    ) -> Result<Option<String>, FetchError> {
        let full_path = self.root.join(path);
        match tokio::fs::read_to_string(&full_path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %full_path.display(), "Manifest not present");
                Ok(None)
            }
            Err(source) => Err(FetchError::Io {
                path: full_path,
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn handle() -> RepositoryHandle {
        RepositoryHandle::new("local", "fixture")
    }

    fn write(dir: &TempDir, path: &str, content: &str) {
        let full = dir.path().join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }

    #[tokio::test]
    async fn test_listing_is_sorted_and_relative() {
        let dir = TempDir::new().unwrap();
        write(&dir, "package.json", "{}");
        write(&dir, "src/index.js", "console.log(1)");
        write(&dir, "README.md", "# hi");

        let fetcher = LocalFetcher::new(dir.path());
        let listing = fetcher.fetch_listing(&handle()).await.unwrap();
        let paths: Vec<&str> = listing.iter().map(|e| e.path.as_str()).collect();

        assert_eq!(paths, vec!["README.md", "package.json", "src/index.js"]);
        assert_eq!(listing.entries()[1].size, 2);
    }

    #[tokio::test]
    async fn test_listing_respects_depth() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a/b/c/deep.txt", "x");
        write(&dir, "a/b/shallow.txt", "x");

        let fetcher = LocalFetcher::new(dir.path()).with_max_depth(3);
        let listing = fetcher.fetch_listing(&handle()).await.unwrap();

        assert!(listing.contains_path("a/b/shallow.txt"));
        assert!(!listing.contains_path("a/b/c/deep.txt"));
    }

    #[tokio::test]
    async fn test_git_directory_is_skipped() {
        let dir = TempDir::new().unwrap();
        write(&dir, ".git/HEAD", "ref: refs/heads/main");
        write(&dir, ".env.example", "PORT=3000");

        let fetcher = LocalFetcher::new(dir.path());
        let listing = fetcher.fetch_listing(&handle()).await.unwrap();

        assert!(listing.contains_path(".env.example"));
        assert!(!listing.iter().any(|e| e.path.starts_with(".git/")));
    }

    #[tokio::test]
    async fn test_missing_root_is_not_found() {
        let dir = TempDir::new().unwrap();
        let fetcher = LocalFetcher::new(dir.path().join("nope"));
        let result = fetcher.fetch_listing(&handle()).await;
        assert!(matches!(result, Err(FetchError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_manifest() {
        let dir = TempDir::new().unwrap();
        write(&dir, "go.mod", "module x\n");

        let fetcher = LocalFetcher::new(dir.path());
        assert_eq!(
            fetcher.fetch_manifest(&handle(), "go.mod").await.unwrap(),
            Some("module x\n".to_string())
        );
        assert_eq!(fetcher.fetch_manifest(&handle(), "Gemfile").await.unwrap(), None);
    }
}
