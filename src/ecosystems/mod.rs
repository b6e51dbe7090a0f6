//! Per-ecosystem stack entry builders
//!
//! Each builder turns the manifest it is keyed on into a [`TechStackEntry`].
//! Builders never fail: unreadable or malformed manifests fall back to the
//! stack's default version and empty dependency lists.

pub mod dart;
pub mod docker;
pub mod dotnet;
pub mod go;
pub mod java;
pub mod node;
pub mod php;
pub mod python;
pub mod ruby;
pub mod rust;

use crate::detection::{ManifestKind, ManifestSet};
use crate::repository::FileListing;
use serde_json::Value;

/// Inputs available to every stack builder
#[derive(Debug, Clone, Copy)]
pub struct ManifestContext<'a> {
    pub listing: &'a FileListing,
    pub manifests: &'a ManifestSet,
}

impl<'a> ManifestContext<'a> {
    pub fn new(listing: &'a FileListing, manifests: &'a ManifestSet) -> Self {
        Self { listing, manifests }
    }

    pub fn manifest(&self, kind: ManifestKind) -> Option<&'a str> {
        self.manifests.get(kind)
    }
}

/// Keys of a JSON object field in document order
pub(crate) fn json_object_keys(document: &Value, field: &str) -> Vec<String> {
    document
        .get(field)
        .and_then(Value::as_object)
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default()
}
