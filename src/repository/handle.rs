use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const GITHUB_HOST: &str = "github.com";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Invalid repository reference '{reference}': {reason}")]
    InvalidReference { reference: String, reason: String },
}

impl RepositoryError {
    fn invalid(reference: &str, reason: impl Into<String>) -> Self {
        RepositoryError::InvalidReference {
            reference: reference.to_string(),
            reason: reason.into(),
        }
    }
}

/// Owner and name of a hosted repository, parsed once from a user reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryHandle {
    pub owner: String,
    pub name: String,
}

impl RepositoryHandle {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parses `owner/name`, `github.com/owner/name`, an http(s) URL or an
    /// SSH remote (`git@github.com:owner/name.git`).
    pub fn parse(reference: &str) -> Result<Self, RepositoryError> {
        let trimmed = reference.trim();
        if trimmed.is_empty() {
            return Err(RepositoryError::invalid(reference, "reference is empty"));
        }

        let path = if let Some(rest) = trimmed.strip_prefix("git@") {
            let (host, path) = rest
                .split_once(':')
                .ok_or_else(|| RepositoryError::invalid(reference, "missing ':' in SSH remote"))?;
            if host != GITHUB_HOST {
                return Err(RepositoryError::invalid(
                    reference,
                    format!("unsupported host '{}'", host),
                ));
            }
            path
        } else {
            let without_scheme = trimmed
                .strip_prefix("https://")
                .or_else(|| trimmed.strip_prefix("http://"));

            match without_scheme {
                Some(rest) => {
                    let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
                    let host = host.strip_prefix("www.").unwrap_or(host);
                    if host != GITHUB_HOST {
                        return Err(RepositoryError::invalid(
                            reference,
                            format!("unsupported host '{}'", host),
                        ));
                    }
                    path
                }
                None => trimmed
                    .strip_prefix("github.com/")
                    .or_else(|| trimmed.strip_prefix("www.github.com/"))
                    .unwrap_or(trimmed),
            }
        };

        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let owner = segments
            .next()
            .ok_or_else(|| RepositoryError::invalid(reference, "missing owner"))?;
        let name = segments
            .next()
            .ok_or_else(|| RepositoryError::invalid(reference, "missing repository name"))?;
        let name = name.strip_suffix(".git").unwrap_or(name);

        for part in [owner, name] {
            if !is_valid_segment(part) {
                return Err(RepositoryError::invalid(
                    reference,
                    format!("'{}' is not a valid owner or repository name", part),
                ));
            }
        }

        Ok(Self::new(owner, name))
    }

    /// Handle used when analyzing a directory on disk rather than a hosted repository
    pub fn local(dir_name: impl Into<String>) -> Self {
        Self::new("local", dir_name)
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl fmt::Display for RepositoryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
