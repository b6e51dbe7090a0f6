//! Configuration management for devbundle
//!
//! Settings are loaded from environment variables with sensible defaults.
//!
//! # Environment Variables
//!
//! - `DEVBUNDLE_GITHUB_TOKEN`: GitHub token for API requests, falls back to `GITHUB_TOKEN`
//! - `DEVBUNDLE_API_URL`: GitHub API base URL - default: "https://api.github.com"
//! - `DEVBUNDLE_REQUEST_TIMEOUT`: Timeout in seconds - default: "30"
//! - `DEVBUNDLE_MAX_DEPTH`: Listing depth in path segments - default: "3"
//! - `DEVBUNDLE_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use devbundle::DevbundleConfig;
//!
//! let config = DevbundleConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config);
//! ```

use crate::fetch::{DEFAULT_API_URL, DEFAULT_MAX_DEPTH};
use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;
const MAX_LISTING_DEPTH: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone)]
pub struct DevbundleConfig {
    /// Token sent as a bearer credential to the GitHub API
    pub github_token: Option<String>,

    pub api_url: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Maximum path segments a listing descends into
    pub max_depth: usize,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for DevbundleConfig {
    /// Loads DEVBUNDLE_* environment variables, falling back to defaults for
    /// anything unset or unparseable
    fn default() -> Self {
        let github_token = env::var("DEVBUNDLE_GITHUB_TOKEN")
            .or_else(|_| env::var("GITHUB_TOKEN"))
            .ok()
            .filter(|t| !t.trim().is_empty());

        let api_url = env::var("DEVBUNDLE_API_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let request_timeout_secs = env::var("DEVBUNDLE_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let max_depth = env::var("DEVBUNDLE_MAX_DEPTH")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_DEPTH);

        let log_level = env::var("DEVBUNDLE_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            github_token,
            api_url,
            request_timeout_secs,
            max_depth,
            log_level,
        }
    }
}

impl DevbundleConfig {
    /// Checks numeric ranges, the API URL scheme and the log level
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        if self.max_depth == 0 || self.max_depth > MAX_LISTING_DEPTH {
            return Err(ConfigError::ValidationFailed(format!(
                "Max depth must be between 1 and {}, got {}",
                MAX_LISTING_DEPTH, self.max_depth
            )));
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::ParseError {
                field: "DEVBUNDLE_API_URL".to_string(),
                error: format!("'{}' is not an http(s) URL", self.api_url),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }
}

impl fmt::Display for DevbundleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Devbundle Configuration:")?;
        writeln!(
            f,
            "  GitHub Token: {}",
            if self.github_token.is_some() {
                "***"
            } else {
                "(not set)"
            }
        )?;
        writeln!(f, "  API URL: {}", self.api_url)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Max Depth: {}", self.max_depth)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
