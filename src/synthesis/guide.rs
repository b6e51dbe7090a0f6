//! DEVELOPMENT.md generation

use super::{devcontainer, ArtifactSlot};
use crate::detection::{ServiceKind, StackProfile};
use chrono::{DateTime, SecondsFormat, Utc};

pub fn application_url(app_port: u16) -> String {
    format!("http://localhost:{}", app_port)
}

pub fn render(profile: &StackProfile, app_port: u16, generated_at: DateTime<Utc>) -> String {
    let mut doc = String::new();
    let repo = &profile.repository;

    doc.push_str(&format!("# {} Development Environment\n\n", repo.full_name()));
    if !profile.description.trim().is_empty() {
        doc.push_str(&format!("> {}\n\n", profile.description.trim()));
    }
    doc.push_str(&format!(
        "This bundle provides a ready-to-run development environment for `{}`.\n\n",
        repo.full_name()
    ));

    doc.push_str("## Quick Start\n\n");
    doc.push_str(&format!(
        "1. Copy these files into the root of your clone of `{}`.\n",
        repo.name
    ));
    doc.push_str(
        "2. Open the folder in VS Code and choose **Reopen in Container**, \
         or run `docker compose up --build`.\n",
    );
    doc.push_str(&format!(
        "3. Run `sh {}` to install dependencies and start the app.\n\n",
        ArtifactSlot::StartupScript.path()
    ));

    doc.push_str("## Detected Stack\n\n");
    if profile.tech_stack.is_empty() {
        doc.push_str("No specific technology stack was detected.\n");
    }
    for entry in &profile.tech_stack {
        doc.push_str(&format!("- {} **{}** {}", entry.glyph, entry.name, entry.version));
        if let Some(tool) = &entry.build_tool {
            doc.push_str(&format!(" ({})", tool));
        }
        doc.push('\n');
        if !entry.dependencies.is_empty() {
            doc.push_str(&format!("  - Dependencies: {}\n", entry.dependencies.join(", ")));
        }
        if !entry.dev_dependencies.is_empty() {
            doc.push_str(&format!(
                "  - Dev dependencies: {}\n",
                entry.dev_dependencies.join(", ")
            ));
        }
    }
    doc.push('\n');

    doc.push_str("## Services\n\n");
    doc.push_str(&format!("- **Application**: {}\n", application_url(app_port)));
    for service in &profile.services {
        match service.kind {
            ServiceKind::WebServer => {
                doc.push_str(&format!(
                    "- **{}**: {}\n",
                    service.name,
                    application_url(app_port)
                ));
            }
            _ => {
                doc.push_str(&format!(
                    "- **{}** ({}): `localhost:{}`\n",
                    service.name,
                    service.kind.type_tag(),
                    service.port
                ));
            }
        }
    }
    doc.push('\n');

    doc.push_str("## Setup\n\n");
    if let Some(command) = devcontainer::post_create_command(profile) {
        doc.push_str("Dependencies are installed on container creation with:\n\n");
        doc.push_str(&format!("```sh\n{}\n```\n\n", command));
    }
    if profile.has_tests {
        doc.push_str("Tests were detected in this repository; run them inside the container.\n");
    } else {
        doc.push_str("No tests were detected in this repository.\n");
    }
    doc.push_str(&format!("Estimated setup time: {}.\n", profile.setup_time));
    doc.push('\n');

    doc.push_str("## Files Produced\n\n");
    for slot in ArtifactSlot::ALL {
        doc.push_str(&format!("- `{}`\n", slot.path()));
    }
    doc.push('\n');

    doc.push_str(&format!(
        "_Generated by devbundle on {}._\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));

    doc
}
