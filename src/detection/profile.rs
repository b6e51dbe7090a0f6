use super::types::{ServiceEntry, ServiceKind, StackName, TechStackEntry};
use crate::repository::{FileListing, RepositoryHandle};
use serde::{Deserialize, Serialize};

/// Normalized result of analyzing one repository
///
/// Built once by [`detect`](super::detect) and never mutated afterwards; it is
/// the only input the synthesizer sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackProfile {
    pub repository: RepositoryHandle,
    pub description: String,
    pub files: FileListing,
    pub tech_stack: Vec<TechStackEntry>,
    pub services: Vec<ServiceEntry>,
    pub ports: Vec<u16>,
    pub has_containerfile: bool,
    pub has_tests: bool,
    pub setup_time: String,
}

impl StackProfile {
    pub fn stack(&self, name: StackName) -> Option<&TechStackEntry> {
        self.tech_stack.iter().find(|e| e.name == name)
    }

    pub fn has_stack(&self, name: StackName) -> bool {
        self.stack(name).is_some()
    }

    pub fn has_service(&self, kind: ServiceKind) -> bool {
        self.services.iter().any(|s| s.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.tech_stack.is_empty() && self.services.is_empty()
    }
}

/// Coarse setup time for a profile with the given counts
///
/// Score is `1 + 0.5 * stacks + services`, kept in half units so the
/// thresholds stay exact.
pub fn estimate_setup_time(stack_count: usize, service_count: usize) -> &'static str {
    let half_units = 2 + stack_count + 2 * service_count;
    match half_units {
        n if n < 4 => "1-2 minutes",
        n if n < 10 => "2-5 minutes",
        n if n < 20 => "5-10 minutes",
        _ => "10+ minutes",
    }
}
