use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Technology stacks the detector knows about, in detector priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackName {
    #[serde(rename = "Node.js")]
    Node,
    Python,
    Docker,
    Java,
    Go,
    Ruby,
    #[serde(rename = "PHP")]
    Php,
    Rust,
    #[serde(rename = ".NET")]
    DotNet,
    Dart,
}

impl StackName {
    pub fn name(self) -> &'static str {
        match self {
            StackName::Node => "Node.js",
            StackName::Python => "Python",
            StackName::Docker => "Docker",
            StackName::Java => "Java",
            StackName::Go => "Go",
            StackName::Ruby => "Ruby",
            StackName::Php => "PHP",
            StackName::Rust => "Rust",
            StackName::DotNet => ".NET",
            StackName::Dart => "Dart",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            StackName::Node => "⬢",
            StackName::Python => "🐍",
            StackName::Docker => "🐳",
            StackName::Java => "☕",
            StackName::Go => "🐹",
            StackName::Ruby => "💎",
            StackName::Php => "🐘",
            StackName::Rust => "🦀",
            StackName::DotNet => "🟣",
            StackName::Dart => "🎯",
        }
    }

    /// Version reported when the manifest does not pin one
    pub fn default_version(self) -> &'static str {
        match self {
            StackName::Python => "3.x",
            StackName::Java => "17",
            StackName::Php => "8.x",
            StackName::DotNet => "8.0",
            _ => LATEST_VERSION,
        }
    }
}

impl fmt::Display for StackName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sentinel version for ecosystems whose version could not be derived
pub const LATEST_VERSION: &str = "latest";

/// Presentation limit on runtime dependencies listed per stack
pub const MAX_DEPENDENCIES: usize = 8;

/// Presentation limit on development dependencies listed per stack
pub const MAX_DEV_DEPENDENCIES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechStackEntry {
    pub name: StackName,
    pub glyph: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dev_dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_tool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<BTreeMap<String, String>>,
}

impl TechStackEntry {
    /// Entry carrying the stack's default version and no extras
    pub fn new(name: StackName) -> Self {
        Self {
            name,
            glyph: name.glyph().to_string(),
            version: name.default_version().to_string(),
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
            build_tool: None,
            scripts: None,
        }
    }

    pub fn with_version(mut self, version: Option<String>) -> Self {
        if let Some(version) = version.filter(|v| !v.trim().is_empty()) {
            self.version = version.trim().to_string();
        }
        self
    }

    pub fn with_dependencies<I: IntoIterator<Item = String>>(mut self, deps: I) -> Self {
        self.dependencies = deps.into_iter().take(MAX_DEPENDENCIES).collect();
        self
    }

    pub fn with_dev_dependencies<I: IntoIterator<Item = String>>(mut self, deps: I) -> Self {
        self.dev_dependencies = deps.into_iter().take(MAX_DEV_DEPENDENCIES).collect();
        self
    }

    pub fn with_build_tool(mut self, tool: impl Into<String>) -> Self {
        self.build_tool = Some(tool.into());
        self
    }

    pub fn with_scripts(mut self, scripts: BTreeMap<String, String>) -> Self {
        if !scripts.is_empty() {
            self.scripts = Some(scripts);
        }
        self
    }

    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.as_ref().is_some_and(|s| s.contains_key(name))
    }
}

/// Backing or primary services inferred from repository paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    #[serde(rename = "web")]
    WebServer,
    Database,
    Cache,
}

impl ServiceKind {
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::WebServer => "Web Server",
            ServiceKind::Database => "PostgreSQL",
            ServiceKind::Cache => "Redis",
        }
    }

    pub fn type_tag(self) -> &'static str {
        match self {
            ServiceKind::WebServer => "web",
            ServiceKind::Database => "database",
            ServiceKind::Cache => "cache",
        }
    }

    /// Fixed per kind so repeated analyses stay reproducible
    pub fn default_port(self) -> u16 {
        match self {
            ServiceKind::WebServer => 3000,
            ServiceKind::Database => 5432,
            ServiceKind::Cache => 6379,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ServiceKind,
    pub port: u16,
}

impl ServiceEntry {
    pub fn new(kind: ServiceKind) -> Self {
        Self {
            name: kind.name().to_string(),
            kind,
            port: kind.default_port(),
        }
    }
}
