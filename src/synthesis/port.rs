use crate::detection::{ServiceKind, StackProfile};

/// Application port used when no web server was detected
pub const DEFAULT_APP_PORT: u16 = 8080;

/// The single port every generated artifact refers to for the application:
/// the first web service's port, or [`DEFAULT_APP_PORT`]
pub fn resolve_app_port(profile: &StackProfile) -> u16 {
    profile
        .services
        .iter()
        .find(|s| s.kind == ServiceKind::WebServer)
        .map(|s| s.port)
        .unwrap_or(DEFAULT_APP_PORT)
}
