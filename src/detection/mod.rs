//! Stack and service detection
//!
//! [`detect`] turns a file listing plus the fetched manifest contents into a
//! [`StackProfile`]. It performs no I/O; fetching belongs to [`crate::fetch`].

mod engine;
pub mod manifest;
mod profile;
pub mod rules;
pub mod services;
pub mod types;

pub use engine::{detect, DetectionError};
pub use manifest::{ManifestKind, ManifestSet, CONTAINERFILE};
pub use profile::{estimate_setup_time, StackProfile};
pub use types::{
    ServiceEntry, ServiceKind, StackName, TechStackEntry, LATEST_VERSION, MAX_DEPENDENCIES,
    MAX_DEV_DEPENDENCIES,
};
