//! .devcontainer/devcontainer.json generation

use super::compose::{APP_SERVICE, WORKSPACE_DIR};
use super::{editor, overlay, SynthesisError};
use crate::detection::StackProfile;
use serde::Serialize;
use serde_json::{Map, Value};

const INSTALL_SEPARATOR: &str = " && ";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DevContainer {
    name: String,
    docker_compose_file: &'static str,
    service: &'static str,
    workspace_folder: &'static str,
    forward_ports: Vec<u16>,
    customizations: Customizations,
    #[serde(skip_serializing_if = "Option::is_none")]
    post_create_command: Option<String>,
    remote_user: &'static str,
}

#[derive(Debug, Serialize)]
struct Customizations {
    vscode: VsCode,
}

#[derive(Debug, Serialize)]
struct VsCode {
    extensions: Vec<String>,
    settings: Map<String, Value>,
}

/// Install commands of every stack that has one, in profile order
pub fn post_create_command(profile: &StackProfile) -> Option<String> {
    let commands: Vec<String> = profile
        .tech_stack
        .iter()
        .filter_map(overlay::install_command)
        .collect();
    (!commands.is_empty()).then(|| commands.join(INSTALL_SEPARATOR))
}

pub fn render(profile: &StackProfile) -> Result<String, SynthesisError> {
    let descriptor = DevContainer {
        name: format!("{} Dev Environment", profile.repository.name),
        docker_compose_file: "../docker-compose.yml",
        service: APP_SERVICE,
        workspace_folder: WORKSPACE_DIR,
        forward_ports: profile.ports.clone(),
        customizations: Customizations {
            vscode: VsCode {
                extensions: editor::recommended_extensions(profile),
                settings: editor::settings(profile),
            },
        },
        post_create_command: post_create_command(profile),
        remote_user: "root",
    };

    Ok(serde_json::to_string_pretty(&descriptor)? + "\n")
}
