//! Editor settings and add-on recommendations

use super::overlay::{self, BASE_EXTENSIONS, BASE_SETTINGS};
use super::SynthesisError;
use crate::detection::StackProfile;
use serde::Serialize;
use serde_json::{Map, Value};

/// Base settings with each stack's overrides applied in profile order;
/// a later stack overwrites keys an earlier one set
pub fn settings(profile: &StackProfile) -> Map<String, Value> {
    let mut settings = Map::new();
    for (key, value) in BASE_SETTINGS {
        settings.insert(key.to_string(), value.to_json());
    }
    for entry in &profile.tech_stack {
        for (key, value) in overlay::settings(entry.name) {
            settings.insert(key.to_string(), value.to_json());
        }
    }
    settings
}

/// Base add-ons followed by each stack's add-ons, first occurrence kept
pub fn recommended_extensions(profile: &StackProfile) -> Vec<String> {
    let mut extensions: Vec<String> = Vec::new();
    let stack_extensions = profile.tech_stack.iter().flat_map(overlay::extensions);
    for ext in BASE_EXTENSIONS.iter().copied().chain(stack_extensions) {
        if !extensions.iter().any(|e| e == ext) {
            extensions.push(ext.to_string());
        }
    }
    extensions
}

#[derive(Serialize)]
struct ExtensionsFile {
    recommendations: Vec<String>,
}

pub fn render_settings(profile: &StackProfile) -> Result<String, SynthesisError> {
    Ok(serde_json::to_string_pretty(&Value::Object(settings(profile)))? + "\n")
}

pub fn render_extensions(profile: &StackProfile) -> Result<String, SynthesisError> {
    let file = ExtensionsFile {
        recommendations: recommended_extensions(profile),
    };
    Ok(serde_json::to_string_pretty(&file)? + "\n")
}
