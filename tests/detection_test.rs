//! Detection engine integration tests
//!
//! Exercise `detect` through the public API on in-memory listings.

mod support;

use devbundle::detection::estimate_setup_time;
use devbundle::{
    detect, DetectionError, FileEntry, FileListing, ManifestKind, ManifestSet, RepositoryHandle,
    ServiceKind, StackName,
};
use support::profile_from;
use yare::parameterized;

#[test]
fn test_node_express_scenario() {
    let profile = profile_from(
        &["package.json"],
        &[(ManifestKind::PackageJson, r#"{"dependencies": {"express": "^4"}}"#)],
    );

    assert_eq!(profile.tech_stack.len(), 1);
    let node = &profile.tech_stack[0];
    assert_eq!(node.name, StackName::Node);
    assert_eq!(node.name.to_string(), "Node.js");
    assert_eq!(node.dependencies, vec!["express".to_string()]);
    assert!(profile.services.is_empty());
    assert!(profile.ports.is_empty());
    assert_eq!(profile.setup_time, "1-2 minutes");
}

#[test]
fn test_go_web_server_scenario() {
    let profile = profile_from(
        &["go.mod", "cmd/server/main.go"],
        &[(ManifestKind::GoMod, "module example.com/api\n\ngo 1.21\n")],
    );

    let go = profile.stack(StackName::Go).expect("Go stack");
    assert_eq!(go.version, "1.21");
    assert_eq!(profile.services.len(), 1);
    assert_eq!(profile.services[0].kind, ServiceKind::WebServer);
    assert_eq!(profile.services[0].port, 3000);
    assert_eq!(profile.ports, vec![3000]);
}

#[test]
fn test_python_redis_scenario() {
    let profile = profile_from(
        &["requirements.txt", "app/redis_client.py"],
        &[(ManifestKind::Requirements, "flask==3.0\nredis\n")],
    );

    assert!(profile.has_stack(StackName::Python));
    assert!(profile.has_service(ServiceKind::Cache));
    assert!(profile.ports.contains(&6379));
}

#[test]
fn test_empty_listing_has_empty_profile() {
    let profile = profile_from(&["README.md", "LICENSE", "docs/intro.md"], &[]);
    assert!(profile.tech_stack.is_empty());
    assert!(profile.services.is_empty());
    assert!(profile.is_empty());
}

#[test]
fn test_detector_order_is_stable() {
    let paths = [
        "pubspec.yaml",
        "Cargo.toml",
        "index.php",
        "Gemfile",
        "go.mod",
        "pom.xml",
        "Dockerfile",
        "requirements.txt",
        "package.json",
        "App.csproj",
    ];
    let manifests = [
        (ManifestKind::Pubspec, "name: x\n"),
        (ManifestKind::CargoToml, "[package]\nname = \"x\"\n"),
        (ManifestKind::Gemfile, "source 'https://rubygems.org'\n"),
        (ManifestKind::GoMod, "module x\n"),
        (ManifestKind::PomXml, "<project/>"),
        (ManifestKind::Requirements, "django\n"),
        (ManifestKind::PackageJson, "{}"),
    ];

    let first = profile_from(&paths, &manifests);
    let second = profile_from(&paths, &manifests);

    let names: Vec<StackName> = first.tech_stack.iter().map(|e| e.name).collect();
    assert_eq!(
        names,
        vec![
            StackName::Node,
            StackName::Python,
            StackName::Docker,
            StackName::Java,
            StackName::Go,
            StackName::Ruby,
            StackName::Php,
            StackName::Rust,
            StackName::DotNet,
            StackName::Dart,
        ]
    );
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first.tech_stack).unwrap(),
        serde_json::to_string(&second.tech_stack).unwrap()
    );
}

#[test]
fn test_services_are_emitted_in_fixed_order() {
    let profile = profile_from(&["server.js", "lib/cache.js", "prisma/schema.prisma"], &[]);
    let kinds: Vec<ServiceKind> = profile.services.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![ServiceKind::Database, ServiceKind::Cache, ServiceKind::WebServer]
    );
    assert_eq!(profile.ports, vec![5432, 6379, 3000]);
}

#[test]
fn test_weak_database_heuristic_overmatches() {
    // "feedback" contains "db"
    let profile = profile_from(&["docs/feedback.md"], &[]);
    assert!(profile.has_service(ServiceKind::Database));
}

#[test]
fn test_nested_manifest_is_not_fetched_or_detected() {
    let profile = profile_from(&["frontend/package.json"], &[]);
    assert!(!profile.has_stack(StackName::Node));
}

#[test]
fn test_containerfile_and_tests_flags() {
    let profile = profile_from(&["Dockerfile", "src/lib_test.go"], &[]);
    assert!(profile.has_containerfile);
    assert!(profile.has_tests);

    let nested = profile_from(&["deploy/Dockerfile", "Tests/Spec.cs"], &[]);
    assert!(!nested.has_containerfile);
    assert!(!nested.has_tests);
    assert!(nested.has_stack(StackName::Docker));
}

#[parameterized(
    empty_path = { "" },
    absolute = { "/etc/passwd" },
    parent_segment = { "src/../../secret" },
)]
fn test_malformed_listing_is_rejected(path: &str) {
    let listing = FileListing::new(vec![FileEntry::new(path, 1)]);
    let result = detect(
        RepositoryHandle::new("acme", "bad"),
        "",
        listing,
        &ManifestSet::new(),
    );
    assert!(matches!(result, Err(DetectionError::InvalidInput(_))));
}

#[parameterized(
    no_stacks = { 0 },
    one_stack = { 1 },
    four_stacks = { 4 },
    ten_stacks = { 10 },
)]
fn test_setup_time_monotonic_in_services(stacks: usize) {
    let ranks: Vec<usize> = (0..=3)
        .map(|services| bucket_rank(estimate_setup_time(stacks, services)))
        .collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "{:?}", ranks);
}

#[parameterized(
    no_services = { 0 },
    one_service = { 1 },
    three_services = { 3 },
)]
fn test_setup_time_monotonic_in_stacks(services: usize) {
    let ranks: Vec<usize> = (0..=10)
        .map(|stacks| bucket_rank(estimate_setup_time(stacks, services)))
        .collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "{:?}", ranks);
}

fn bucket_rank(bucket: &str) -> usize {
    ["1-2 minutes", "2-5 minutes", "5-10 minutes", "10+ minutes"]
        .iter()
        .position(|b| *b == bucket)
        .expect("unknown bucket")
}
