use super::manifest::{ManifestSet, CONTAINERFILE};
use super::profile::{estimate_setup_time, StackProfile};
use super::rules::RULES;
use super::services::detect_services;
use crate::ecosystems::ManifestContext;
use crate::repository::{FileListing, RepositoryHandle};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetectionError {
    /// The file listing cannot describe a repository tree
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Infers the stack profile of a repository from its listing and fetched manifests
///
/// Missing or malformed manifests never fail detection; they only leave
/// fields at their defaults. The listing itself must be well formed.
pub fn detect(
    repository: RepositoryHandle,
    description: impl Into<String>,
    listing: FileListing,
    manifests: &ManifestSet,
) -> Result<StackProfile, DetectionError> {
    if let Some((entry, defect)) = listing
        .iter()
        .find_map(|e| e.defect().map(|defect| (e, defect)))
    {
        return Err(DetectionError::InvalidInput(format!(
            "listing entry '{}' has {}",
            entry.path, defect
        )));
    }

    let ctx = ManifestContext::new(&listing, manifests);

    let tech_stack: Vec<_> = RULES
        .iter()
        .filter(|rule| rule.trigger.is_satisfied(&ctx))
        .map(|rule| {
            let entry = (rule.build)(&ctx);
            debug!(stack = %rule.stack, version = %entry.version, "Stack detected");
            entry
        })
        .collect();

    let services = detect_services(&listing);
    let ports = services.iter().map(|s| s.port).collect();
    let has_containerfile = listing.contains_path(CONTAINERFILE);
    let has_tests = listing.iter().any(|e| e.path.contains("test"));
    let setup_time = estimate_setup_time(tech_stack.len(), services.len()).to_string();

    info!(
        repository = %repository,
        files = listing.len(),
        manifests = manifests.len(),
        stacks = tech_stack.len(),
        services = services.len(),
        "Detection complete"
    );

    Ok(StackProfile {
        repository,
        description: description.into(),
        files: listing,
        tech_stack,
        services,
        ports,
        has_containerfile,
        has_tests,
        setup_time,
    })
}
