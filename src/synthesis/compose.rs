//! docker-compose.yml generation

use super::SynthesisError;
use crate::detection::{ServiceKind, StackProfile, CONTAINERFILE};
use serde::Serialize;
use serde_yaml::{Mapping, Value};

pub const APP_SERVICE: &str = "app";
pub const WORKSPACE_DIR: &str = "/workspace";
const COMPOSE_VERSION: &str = "3.8";
const POSTGRES_IMAGE: &str = "postgres:15.4-alpine";
const REDIS_IMAGE: &str = "redis:7.2-alpine";
const POSTGRES_VOLUME: &str = "postgres_data";

#[derive(Debug, Serialize)]
struct ComposeFile {
    version: &'static str,
    services: Mapping,
    #[serde(skip_serializing_if = "Option::is_none")]
    volumes: Option<Mapping>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum BuildSpec {
    Context(&'static str),
    Dockerfile {
        context: &'static str,
        dockerfile: &'static str,
    },
}

#[derive(Debug, Default, Serialize)]
struct ComposeService {
    #[serde(skip_serializing_if = "Option::is_none")]
    build: Option<BuildSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ports: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    volumes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    environment: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<String>,
}

/// Backing service block for a detected service kind, if one is provisionable
fn backing_service(kind: ServiceKind, port: u16) -> Option<(&'static str, ComposeService)> {
    match kind {
        ServiceKind::Database => Some((
            "postgres",
            ComposeService {
                image: Some(POSTGRES_IMAGE),
                ports: vec![format!("{}:{}", port, port)],
                volumes: vec![format!("{}:/var/lib/postgresql/data", POSTGRES_VOLUME)],
                environment: vec![
                    "POSTGRES_USER=devuser".to_string(),
                    "POSTGRES_PASSWORD=devpassword".to_string(),
                    "POSTGRES_DB=devdb".to_string(),
                ],
                ..Default::default()
            },
        )),
        ServiceKind::Cache => Some((
            "redis",
            ComposeService {
                image: Some(REDIS_IMAGE),
                ports: vec![format!("{}:{}", port, port)],
                ..Default::default()
            },
        )),
        ServiceKind::WebServer => None,
    }
}

pub fn render(profile: &StackProfile, app_port: u16) -> Result<String, SynthesisError> {
    let backing: Vec<(&'static str, ComposeService)> = profile
        .services
        .iter()
        .filter_map(|s| backing_service(s.kind, s.port))
        .collect();

    let has_database = profile.has_service(ServiceKind::Database);

    let app = ComposeService {
        build: Some(if profile.has_containerfile {
            BuildSpec::Dockerfile {
                context: ".",
                dockerfile: CONTAINERFILE,
            }
        } else {
            BuildSpec::Context(".")
        }),
        ports: vec![format!("{}:{}", app_port, app_port)],
        volumes: vec![format!(".:{}:cached", WORKSPACE_DIR)],
        environment: vec!["APP_ENV=development".to_string()],
        depends_on: backing.iter().map(|(name, _)| name.to_string()).collect(),
        ..Default::default()
    };

    let mut services = Mapping::new();
    services.insert(Value::from(APP_SERVICE), serde_yaml::to_value(&app)?);
    for (name, service) in &backing {
        services.insert(Value::from(*name), serde_yaml::to_value(service)?);
    }

    let volumes = has_database.then(|| {
        let mut volumes = Mapping::new();
        volumes.insert(Value::from(POSTGRES_VOLUME), Value::Mapping(Mapping::new()));
        volumes
    });

    let compose = ComposeFile {
        version: COMPOSE_VERSION,
        services,
        volumes,
    };

    Ok(serde_yaml::to_string(&compose)?)
}
