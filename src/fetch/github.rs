use super::{FetchError, RepositoryFetcher, RepositoryMetadata, DEFAULT_MAX_DEPTH};
use crate::config::DevbundleConfig;
use crate::repository::{FileEntry, FileListing, RepositoryHandle};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, info};

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct RepoResponse {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    default_branch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentItem {
    path: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    size: u64,
}

/// Fetches listings and manifests through the GitHub REST contents API
pub struct GitHubFetcher {
    client: Client,
    api_url: String,
    max_depth: usize,
}

fn default_headers(token: Option<&str>) -> Result<HeaderMap, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("devbundle/", env!("CARGO_PKG_VERSION"))),
    );
    headers.insert(ACCEPT, HeaderValue::from_static(JSON_MEDIA_TYPE));
    if let Some(token) = token {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| FetchError::Decode(format!("invalid token header: {}", e)))?;
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

impl GitHubFetcher {
    pub fn new(
        api_url: impl Into<String>,
        token: Option<&str>,
        timeout: Duration,
        max_depth: usize,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .default_headers(default_headers(token)?)
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(client, api_url, max_depth))
    }

    fn with_client(client: Client, api_url: impl Into<String>, max_depth: usize) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            max_depth,
        }
    }

    pub fn from_config(config: &DevbundleConfig) -> Result<Self, FetchError> {
        Self::new(
            config.api_url.clone(),
            config.github_token.as_deref(),
            Duration::from_secs(config.request_timeout_secs),
            config.max_depth,
        )
    }

    fn repo_url(&self, repository: &RepositoryHandle) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_url, repository.owner, repository.name
        )
    }

    fn contents_url(&self, repository: &RepositoryHandle, path: &str) -> String {
        if path.is_empty() {
            format!("{}/contents", self.repo_url(repository))
        } else {
            format!("{}/contents/{}", self.repo_url(repository), path)
        }
    }

    async fn get(&self, url: &str, accept: &'static str) -> Result<Response, FetchError> {
        debug!(url, "GET");
        let response = self.client.get(url).header(ACCEPT, accept).send().await?;
        check_status(response, url)
    }

    async fn list_directory(
        &self,
        repository: &RepositoryHandle,
        path: &str,
    ) -> Result<Vec<ContentItem>, FetchError> {
        let url = self.contents_url(repository, path);
        let response = self.get(&url, JSON_MEDIA_TYPE).await?;
        let body = response.text().await?;
        parse_directory(&body)
    }
}

fn check_status(response: Response, url: &str) -> Result<Response, FetchError> {
    match status_error(response.status(), response.headers(), url) {
        Some(error) => Err(error),
        None => Ok(response),
    }
}

/// Maps a non-success status to its fetch error; GitHub signals an exhausted
/// quota with 403 plus `x-ratelimit-remaining: 0` as well as with 429
fn status_error(status: StatusCode, headers: &HeaderMap, url: &str) -> Option<FetchError> {
    if status.is_success() {
        return None;
    }

    let quota_exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        == Some("0");

    let error = match status {
        StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited,
        StatusCode::FORBIDDEN if quota_exhausted => FetchError::RateLimited,
        StatusCode::NOT_FOUND => FetchError::NotFound(url.to_string()),
        _ => FetchError::Http {
            status: status.as_u16(),
            url: url.to_string(),
        },
    };
    Some(error)
}

fn parse_directory(body: &str) -> Result<Vec<ContentItem>, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

fn segment_count(path: &str) -> usize {
    path.split('/').filter(|s| !s.is_empty()).count()
}

#[async_trait]
impl RepositoryFetcher for GitHubFetcher {
    fn name(&self) -> &str {
        "github"
    }

    async fn fetch_metadata(
        &self,
        repository: &RepositoryHandle,
    ) -> Result<RepositoryMetadata, FetchError> {
        let url = self.repo_url(repository);
        let response = self.get(&url, JSON_MEDIA_TYPE).await?;
        let repo: RepoResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(RepositoryMetadata {
            description: repo.description.unwrap_or_default(),
            default_branch: repo.default_branch,
        })
    }

    async fn fetch_listing(&self, repository: &RepositoryHandle) -> Result<FileListing, FetchError> {
        let max_depth = if self.max_depth == 0 {
            DEFAULT_MAX_DEPTH
        } else {
            self.max_depth
        };

        let mut listing = FileListing::default();
        let mut pending = VecDeque::from([String::new()]);

        while let Some(dir) = pending.pop_front() {
            for item in self.list_directory(repository, &dir).await? {
                match item.kind.as_str() {
                    "file" => listing.push(FileEntry::new(item.path, item.size)),
                    "dir" if segment_count(&item.path) < max_depth => {
                        pending.push_back(item.path)
                    }
                    _ => {}
                }
            }
        }

        info!(
            repository = %repository,
            files = listing.len(),
            max_depth,
            "Fetched repository listing"
        );
        Ok(listing)
    }

    async fn fetch_manifest(
        &self,
        repository: &RepositoryHandle,
        path: &str,
    ) -> Result<Option<String>, FetchError> {
        let url = self.contents_url(repository, path);
        match self.get(&url, RAW_MEDIA_TYPE).await {
            Ok(response) => Ok(Some(response.text().await?)),
            Err(FetchError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> GitHubFetcher {
        GitHubFetcher::new("https://api.example.com/", None, Duration::from_secs(5), 3).unwrap()
    }

    #[test]
    fn test_urls() {
        let f = fetcher();
        let repo = RepositoryHandle::new("acme", "widget");
        assert_eq!(f.repo_url(&repo), "https://api.example.com/repos/acme/widget");
        assert_eq!(
            f.contents_url(&repo, ""),
            "https://api.example.com/repos/acme/widget/contents"
        );
        assert_eq!(
            f.contents_url(&repo, "cmd/server"),
            "https://api.example.com/repos/acme/widget/contents/cmd/server"
        );
    }

    #[test]
    fn test_parse_directory() {
        let body = r#"[
            {"name": "go.mod", "path": "go.mod", "type": "file", "size": 42, "sha": "x"},
            {"name": "cmd", "path": "cmd", "type": "dir", "size": 0},
            {"name": "vendor", "path": "vendor", "type": "submodule"}
        ]"#;
        let items = parse_directory(body).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].path, "go.mod");
        assert_eq!(items[0].size, 42);
        assert_eq!(items[1].kind, "dir");
        assert_eq!(items[2].size, 0);
    }

    #[test]
    fn test_parse_directory_rejects_file_object() {
        let body = r#"{"name": "README.md", "path": "README.md", "type": "file"}"#;
        assert!(matches!(parse_directory(body), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_segment_count() {
        assert_eq!(segment_count("cmd"), 1);
        assert_eq!(segment_count("cmd/server"), 2);
        assert_eq!(segment_count("a/b/c"), 3);
    }

    #[test]
    fn test_invalid_token_is_rejected() {
        let result =
            GitHubFetcher::new(DEFAULT_API_URL, Some("bad\ntoken"), Duration::from_secs(5), 3);
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_status_mapping() {
        let url = "https://api.example.com/repos/acme/widget";
        let mut exhausted = HeaderMap::new();
        exhausted.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        let mut remaining = HeaderMap::new();
        remaining.insert("x-ratelimit-remaining", HeaderValue::from_static("42"));
        let none = HeaderMap::new();

        assert!(status_error(StatusCode::OK, &none, url).is_none());
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, &none, url),
            Some(FetchError::NotFound(u)) if u == url
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, &none, url),
            Some(FetchError::RateLimited)
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, &exhausted, url),
            Some(FetchError::RateLimited)
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, &remaining, url),
            Some(FetchError::Http { status: 403, .. })
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, &none, url),
            Some(FetchError::Http { status: 403, .. })
        ));
        assert!(matches!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR, &none, url),
            Some(FetchError::Http { status: 500, .. })
        ));
    }

    const TOKEN: &str = "test-token";

    fn mock_fetcher(server: &MockServer, max_depth: usize) -> GitHubFetcher {
        let client = Client::builder()
            .default_headers(default_headers(Some(TOKEN)).unwrap())
            .no_proxy()
            .build()
            .expect("Failed to create HTTP client");
        GitHubFetcher::with_client(client, server.uri(), max_depth)
    }

    fn repo() -> RepositoryHandle {
        RepositoryHandle::new("acme", "widget")
    }

    fn contents_path(dir: &str) -> String {
        if dir.is_empty() {
            "/repos/acme/widget/contents".to_string()
        } else {
            format!("/repos/acme/widget/contents/{}", dir)
        }
    }

    fn file(path: &str, size: u64) -> Value {
        json!({"path": path, "type": "file", "size": size})
    }

    fn dir(path: &str) -> Value {
        json!({"path": path, "type": "dir", "size": 0})
    }

    async fn mount_directory(server: &MockServer, dir_path: &str, items: Value) {
        Mock::given(method("GET"))
            .and(path(contents_path(dir_path)))
            .and(header("Authorization", format!("Bearer {}", TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(items))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_listing_is_breadth_first_and_depth_bounded() {
        let server = MockServer::start().await;
        mount_directory(
            &server,
            "",
            json!([file("README.md", 10), dir("a"), dir("docs"), file("main.go", 20)]),
        )
        .await;
        mount_directory(&server, "a", json!([file("a/one.txt", 1), dir("a/b")])).await;
        mount_directory(&server, "docs", json!([file("docs/guide.md", 3)])).await;
        mount_directory(&server, "a/b", json!([file("a/b/two.txt", 2), dir("a/b/c")])).await;
        Mock::given(method("GET"))
            .and(path(contents_path("a/b/c")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([file("a/b/c/deep.txt", 4)])),
            )
            .expect(0)
            .mount(&server)
            .await;

        let listing = mock_fetcher(&server, 3).fetch_listing(&repo()).await.unwrap();
        let paths: Vec<&str> = listing.iter().map(|e| e.path.as_str()).collect();

        assert_eq!(
            paths,
            vec!["README.md", "main.go", "a/one.txt", "docs/guide.md", "a/b/two.txt"]
        );
        assert!(listing.iter().all(|e| segment_count(&e.path) <= 3));
        assert_eq!(listing.total_size(), 36);
    }

    #[tokio::test]
    async fn test_listing_of_missing_repository_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(contents_path("")))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})),
            )
            .mount(&server)
            .await;

        let result = mock_fetcher(&server, 3).fetch_listing(&repo()).await;
        assert!(matches!(result, Err(FetchError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widget"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "full_name": "acme/widget",
                "description": "Widget service",
                "default_branch": "main"
            })))
            .mount(&server)
            .await;

        let metadata = mock_fetcher(&server, 3).fetch_metadata(&repo()).await.unwrap();
        assert_eq!(metadata.description, "Widget service");
        assert_eq!(metadata.default_branch.as_deref(), Some("main"));

        let missing = mock_fetcher(&server, 3)
            .fetch_metadata(&RepositoryHandle::new("acme", "gone"))
            .await;
        assert!(matches!(missing, Err(FetchError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_manifest_raw_and_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(contents_path("go.mod")))
            .and(header("Accept", RAW_MEDIA_TYPE))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("module acme/widget\n\ngo 1.22\n"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(contents_path("Gemfile")))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})),
            )
            .mount(&server)
            .await;

        let fetcher = mock_fetcher(&server, 3);
        assert_eq!(
            fetcher.fetch_manifest(&repo(), "go.mod").await.unwrap().as_deref(),
            Some("module acme/widget\n\ngo 1.22\n")
        );
        assert_eq!(fetcher.fetch_manifest(&repo(), "Gemfile").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_fetch_manifest_propagates_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(contents_path("package.json")))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = mock_fetcher(&server, 3).fetch_manifest(&repo(), "package.json").await;
        assert!(matches!(result, Err(FetchError::Http { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_rate_limit_responses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(contents_path("")))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("x-ratelimit-remaining", "0")
                    .set_body_json(json!({"message": "API rate limit exceeded"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(contents_path("Cargo.toml")))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let fetcher = mock_fetcher(&server, 3);
        assert!(matches!(
            fetcher.fetch_listing(&repo()).await,
            Err(FetchError::RateLimited)
        ));
        assert!(matches!(
            fetcher.fetch_manifest(&repo(), "Cargo.toml").await,
            Err(FetchError::RateLimited)
        ));
    }
}
