//! Output formatting for stack profiles
//!
//! JSON and YAML serialize the [`StackProfile`] as-is; the human format is a
//! compact report for terminals.

use anyhow::{Context, Result};
use std::path::Path;

use crate::detection::StackProfile;
use crate::synthesis::GeneratedArtifact;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, profile: &StackProfile) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(profile)
                .context("Failed to serialize stack profile to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(profile).context("Failed to serialize stack profile to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(profile)),
        }
    }

    fn format_human(&self, profile: &StackProfile) -> String {
        let mut output = String::new();

        output.push_str(&format!("\u{2713} Stack Profile: {}\n", profile.repository));
        output.push_str(RULE);
        output.push_str("\n\n");

        if !profile.description.trim().is_empty() {
            output.push_str(&format!("{}\n\n", profile.description.trim()));
        }

        output.push_str("Technology Stack:\n");
        if profile.tech_stack.is_empty() {
            output.push_str("\u{2514}\u{2500} (none detected)\n");
        }
        for (i, entry) in profile.tech_stack.iter().enumerate() {
            let connector = if i == profile.tech_stack.len() - 1 {
                "\u{2514}"
            } else {
                "\u{251C}"
            };
            output.push_str(&format!(
                "{}\u{2500} {} {} {}",
                connector, entry.glyph, entry.name, entry.version
            ));
            if let Some(ref tool) = entry.build_tool {
                output.push_str(&format!(" ({})", tool));
            }
            output.push('\n');
            if !entry.dependencies.is_empty() {
                output.push_str(&format!(
                    "     dependencies: {}\n",
                    entry.dependencies.join(", ")
                ));
            }
            if !entry.dev_dependencies.is_empty() {
                output.push_str(&format!(
                    "     dev dependencies: {}\n",
                    entry.dev_dependencies.join(", ")
                ));
            }
        }
        output.push('\n');

        output.push_str("Services:\n");
        if profile.services.is_empty() {
            output.push_str("\u{2514}\u{2500} (none detected)\n");
        }
        for (i, service) in profile.services.iter().enumerate() {
            let connector = if i == profile.services.len() - 1 {
                "\u{2514}"
            } else {
                "\u{251C}"
            };
            output.push_str(&format!(
                "{}\u{2500} {} ({}) on port {}\n",
                connector,
                service.name,
                service.kind.type_tag(),
                service.port
            ));
        }
        output.push('\n');

        output.push_str(&format!("Files:       {}\n", profile.files.len()));
        output.push_str(&format!(
            "Dockerfile:  {}\n",
            if profile.has_containerfile { "yes" } else { "no" }
        ));
        output.push_str(&format!(
            "Tests:       {}\n",
            if profile.has_tests { "yes" } else { "no" }
        ));
        output.push_str(&format!("Setup time:  {}\n", profile.setup_time));

        output
    }
}

/// Lists where a bundle was written, one artifact per line
pub fn format_written(destination: &Path, artifacts: &[GeneratedArtifact]) -> String {
    let mut output = format!("\u{2713} Bundle written to {}\n", destination.display());
    for artifact in artifacts {
        output.push_str(&format!("  {}\n", artifact.path));
    }
    output
}
