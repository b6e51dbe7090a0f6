//! Path-keyword service heuristics
//!
//! These predicates over- and under-match on purpose; they mirror the
//! keyword scan users of the generated bundles already rely on.

use super::types::{ServiceEntry, ServiceKind};
use crate::repository::FileListing;

const DATABASE_FRAGMENTS: &[&str] = &["database", "db", "migration", "prisma"];
const DATABASE_SUFFIXES: &[&str] = &[".sql"];
const CACHE_FRAGMENTS: &[&str] = &["redis", "cache"];
const WEB_ENTRY_POINTS: &[&str] = &[
    "server.js",
    "app.js",
    "index.js",
    "server.ts",
    "app.ts",
    "main.py",
    "app.py",
    "manage.py",
    "wsgi.py",
    "main.go",
    "server.go",
    "app.rb",
    "config.ru",
    "index.php",
    "Program.cs",
];

/// Services suggested by the listing, at most one per kind, ordered
/// database, cache, web server
pub fn detect_services(listing: &FileListing) -> Vec<ServiceEntry> {
    let paths: Vec<String> = listing.iter().map(|e| e.path.to_lowercase()).collect();

    let mut services = Vec::new();

    let database = paths.iter().any(|p| {
        DATABASE_FRAGMENTS.iter().any(|f| p.contains(f))
            || DATABASE_SUFFIXES.iter().any(|s| p.ends_with(s))
    });
    if database {
        services.push(ServiceEntry::new(ServiceKind::Database));
    }

    if paths.iter().any(|p| CACHE_FRAGMENTS.iter().any(|f| p.contains(f))) {
        services.push(ServiceEntry::new(ServiceKind::Cache));
    }

    if listing
        .iter()
        .any(|e| WEB_ENTRY_POINTS.contains(&e.name.as_str()))
    {
        services.push(ServiceEntry::new(ServiceKind::WebServer));
    }

    services
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(paths: &[&str]) -> Vec<ServiceKind> {
        detect_services(&FileListing::from_paths(paths.iter().copied()))
            .into_iter()
            .map(|s| s.kind)
            .collect()
    }

    #[test]
    fn test_no_services() {
        assert!(kinds(&["package.json", "README.md", "src/lib.rs"]).is_empty());
    }

    #[test]
    fn test_database_keywords() {
        assert_eq!(kinds(&["db/schema.rb"]), vec![ServiceKind::Database]);
        assert_eq!(kinds(&["src/Migrations/0001.php"]), vec![ServiceKind::Database]);
        assert_eq!(kinds(&["seed.sql"]), vec![ServiceKind::Database]);
    }

    #[test]
    fn test_weak_heuristic_overmatches() {
        // "db" inside an unrelated word still counts
        assert_eq!(kinds(&["docs/feedback.md"]), vec![ServiceKind::Database]);
    }

    #[test]
    fn test_order_and_uniqueness() {
        assert_eq!(
            kinds(&["cmd/server/main.go", "internal/redis/client.go", "db/init.sql", "app.py"]),
            vec![ServiceKind::Database, ServiceKind::Cache, ServiceKind::WebServer]
        );
    }

    #[test]
    fn test_web_entry_point_matches_base_name() {
        assert_eq!(kinds(&["cmd/server/main.go"]), vec![ServiceKind::WebServer]);
        assert!(kinds(&["main.golang"]).is_empty());
    }
}
