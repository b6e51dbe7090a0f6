//! Per-stack editor, install and launch overlays
//!
//! Every generator looks stacks up here, so a stack's add-ons, settings and
//! commands stay consistent across the descriptor, settings file and script.

use crate::detection::{StackName, TechStackEntry};
use crate::ecosystems::{dart::FLUTTER, java::GRADLE};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Str(&'static str),
}

impl SettingValue {
    pub fn to_json(self) -> Value {
        match self {
            SettingValue::Bool(b) => Value::Bool(b),
            SettingValue::Int(i) => Value::from(i),
            SettingValue::Str(s) => Value::from(s),
        }
    }
}

pub const BASE_EXTENSIONS: &[&str] = &["editorconfig.editorconfig", "eamodio.gitlens"];

pub const BASE_SETTINGS: &[(&str, SettingValue)] = &[
    ("editor.formatOnSave", SettingValue::Bool(true)),
    ("editor.tabSize", SettingValue::Int(2)),
    ("files.trimTrailingWhitespace", SettingValue::Bool(true)),
    ("files.insertFinalNewline", SettingValue::Bool(true)),
];

pub fn extensions(entry: &TechStackEntry) -> Vec<&'static str> {
    match entry.name {
        StackName::Node => vec!["dbaeumer.vscode-eslint", "esbenp.prettier-vscode"],
        StackName::Python => vec!["ms-python.python", "ms-python.vscode-pylance"],
        StackName::Docker => vec!["ms-azuretools.vscode-docker"],
        StackName::Java => vec!["vscjava.vscode-java-pack"],
        StackName::Go => vec!["golang.go"],
        StackName::Ruby => vec!["shopify.ruby-lsp"],
        StackName::Php => vec!["bmewburn.vscode-intelephense-client"],
        StackName::Rust => vec!["rust-lang.rust-analyzer"],
        StackName::DotNet => vec!["ms-dotnettools.csharp"],
        StackName::Dart if is_flutter(entry) => vec!["dart-code.dart-code", "dart-code.flutter"],
        StackName::Dart => vec!["dart-code.dart-code"],
    }
}

pub fn settings(stack: StackName) -> &'static [(&'static str, SettingValue)] {
    match stack {
        StackName::Node => &[(
            "editor.defaultFormatter",
            SettingValue::Str("esbenp.prettier-vscode"),
        )],
        StackName::Python => &[
            ("editor.tabSize", SettingValue::Int(4)),
            (
                "python.defaultInterpreterPath",
                SettingValue::Str("/usr/local/bin/python"),
            ),
        ],
        StackName::Java => &[
            ("editor.tabSize", SettingValue::Int(4)),
            (
                "java.configuration.updateBuildConfiguration",
                SettingValue::Str("automatic"),
            ),
        ],
        StackName::Go => &[
            ("editor.tabSize", SettingValue::Int(4)),
            ("go.useLanguageServer", SettingValue::Bool(true)),
        ],
        StackName::Php | StackName::DotNet => &[("editor.tabSize", SettingValue::Int(4))],
        StackName::Rust => &[
            ("editor.tabSize", SettingValue::Int(4)),
            ("rust-analyzer.check.command", SettingValue::Str("clippy")),
        ],
        StackName::Docker | StackName::Ruby | StackName::Dart => &[],
    }
}

/// Canonical dependency install command for a stack, if it has one
pub fn install_command(entry: &TechStackEntry) -> Option<String> {
    let command = match entry.name {
        StackName::Node => match entry.build_tool.as_deref() {
            Some("yarn") => "yarn install",
            Some("pnpm") => "pnpm install",
            _ => "npm install",
        },
        StackName::Python => "pip install -r requirements.txt",
        StackName::Java if is_gradle(entry) => "./gradlew build -x test",
        StackName::Java => "mvn install -DskipTests",
        StackName::Go => "go mod download",
        StackName::Ruby => "bundle install",
        StackName::Php if entry.build_tool.is_some() => "composer install",
        StackName::Rust => "cargo build",
        StackName::DotNet => "dotnet restore",
        StackName::Dart if is_flutter(entry) => "flutter pub get",
        StackName::Dart => "dart pub get",
        StackName::Docker | StackName::Php => return None,
    };
    Some(command.to_string())
}

/// Guarded install-then-run section of the startup script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchBlock {
    pub label: &'static str,
    /// POSIX test that the ecosystem's manifest exists
    pub guard: String,
    pub install: Option<String>,
    /// Shell lines that start the application in the background
    pub run: Vec<String>,
}

pub fn launch_block(entry: &TechStackEntry) -> Option<LaunchBlock> {
    let file_guard = |name: &str| format!("[ -f {} ]", name);
    let install = install_command(entry);
    let label = entry.name.name();

    let (guard, run) = match entry.name {
        StackName::Docker => return None,
        StackName::Node => {
            let manager = entry.build_tool.as_deref().unwrap_or("npm");
            let run = if entry.has_script("dev") {
                format!("{} run dev &", manager)
            } else {
                format!("{} start &", manager)
            };
            (file_guard("package.json"), vec![run])
        }
        StackName::Python => (
            file_guard("requirements.txt"),
            vec![
                "if [ -f manage.py ]; then".to_string(),
                "  python manage.py runserver 0.0.0.0:$APP_PORT &".to_string(),
                "elif [ -f app.py ]; then".to_string(),
                "  python app.py &".to_string(),
                "elif [ -f main.py ]; then".to_string(),
                "  python main.py &".to_string(),
                "fi".to_string(),
            ],
        ),
        StackName::Java if is_gradle(entry) => (
            file_guard("build.gradle"),
            vec!["./gradlew bootRun &".to_string()],
        ),
        StackName::Java => (
            file_guard("pom.xml"),
            vec!["mvn spring-boot:run &".to_string()],
        ),
        StackName::Go => (file_guard("go.mod"), vec!["go run . &".to_string()]),
        StackName::Ruby => (
            file_guard("Gemfile"),
            vec![
                "if [ -f bin/rails ]; then".to_string(),
                "  bundle exec rails server -b 0.0.0.0 -p $APP_PORT &".to_string(),
                "else".to_string(),
                "  bundle exec rackup -o 0.0.0.0 -p $APP_PORT &".to_string(),
                "fi".to_string(),
            ],
        ),
        StackName::Php => (
            file_guard("composer.json"),
            vec!["php -S 0.0.0.0:$APP_PORT &".to_string()],
        ),
        StackName::Rust => (file_guard("Cargo.toml"), vec!["cargo run &".to_string()]),
        StackName::DotNet => (
            "[ -n \"$(find . -maxdepth 2 \\( -name '*.csproj' -o -name '*.fsproj' -o -name '*.sln' \\) -print)\" ]"
                .to_string(),
            vec!["dotnet run &".to_string()],
        ),
        StackName::Dart if is_flutter(entry) => (
            file_guard("pubspec.yaml"),
            vec!["flutter run -d web-server --web-port $APP_PORT &".to_string()],
        ),
        StackName::Dart => (file_guard("pubspec.yaml"), vec!["dart run &".to_string()]),
    };

    Some(LaunchBlock {
        label,
        guard,
        install,
        run,
    })
}

fn is_gradle(entry: &TechStackEntry) -> bool {
    entry.build_tool.as_deref() == Some(GRADLE)
}

fn is_flutter(entry: &TechStackEntry) -> bool {
    entry.build_tool.as_deref() == Some(FLUTTER)
}
