//! scripts/dev-setup.sh generation
//!
//! Every matching stack block runs; a polyglot repository installs and starts
//! each of its ecosystems in turn.

use super::guide::application_url;
use super::overlay::launch_block;
use crate::detection::StackProfile;

pub fn render(profile: &StackProfile, app_port: u16) -> String {
    let mut script = String::new();
    script.push_str("#!/bin/sh\n");
    script.push_str(&format!(
        "# Development setup for {}\n",
        profile.repository.full_name()
    ));
    script.push_str("set -e\n\n");
    script.push_str(&format!("APP_PORT={}\n", app_port));
    script.push_str("export APP_PORT\n\n");

    for block in profile.tech_stack.iter().filter_map(launch_block) {
        script.push_str(&format!("# {}\n", block.label));
        script.push_str(&format!("if {}; then\n", block.guard));
        if let Some(install) = &block.install {
            script.push_str(&format!(
                "  echo \"Installing {} dependencies...\"\n",
                block.label
            ));
            script.push_str(&format!("  {}\n", install));
        }
        for line in &block.run {
            script.push_str(&format!("  {}\n", line));
        }
        script.push_str("fi\n\n");
    }

    script.push_str(&format!(
        "echo \"Development environment ready at {}\"\n",
        application_url(app_port)
    ));
    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{detect, ManifestKind, ManifestSet};
    use crate::repository::{FileListing, RepositoryHandle};

    #[test]
    fn test_empty_profile_script() {
        let profile = detect(
            RepositoryHandle::new("o", "r"),
            "",
            FileListing::default(),
            &ManifestSet::new(),
        )
        .unwrap();
        let script = render(&profile, 8080);
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(!script.contains("if ["));
        assert_eq!(
            script.lines().last(),
            Some("echo \"Development environment ready at http://localhost:8080\"")
        );
    }

    #[test]
    fn test_every_stack_block_is_emitted_in_order() {
        let listing = FileListing::from_paths(["package.json", "requirements.txt", "Dockerfile"]);
        let manifests = ManifestSet::new()
            .with(ManifestKind::PackageJson, "{}")
            .with(ManifestKind::Requirements, "django\n");
        let profile = detect(RepositoryHandle::new("o", "r"), "", listing, &manifests).unwrap();
        let script = render(&profile, 3000);

        let node = script.find("if [ -f package.json ]; then").unwrap();
        let python = script.find("if [ -f requirements.txt ]; then").unwrap();
        assert!(node < python);
        assert!(script.contains("  npm install\n"));
        assert!(script.contains("  pip install -r requirements.txt\n"));
        assert!(!script.contains("# Docker"));
        assert!(script.contains("APP_PORT=3000\n"));
    }
}
