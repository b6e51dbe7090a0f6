//! Structured logging setup for devbundle
//!
//! Initializes a `tracing` subscriber with an `EnvFilter` and either pretty
//! console output or JSON lines. Logs go to stderr so command output on stdout
//! stays machine-readable.
//!
//! # Example
//!
//! ```no_run
//! use devbundle::util::logging;
//! use tracing::{debug, info};
//!
//! logging::init_from_env();
//!
//! info!("Application started");
//! debug!(repository = "acme/api", "Analyzing repository");
//! ```

use std::env;
use std::sync::Once;
use tracing::{Level, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Noisy HTTP stack crates capped at `warn` unless `RUST_LOG` says otherwise
const QUIET_DEPENDENCIES: &[&str] = &["h2", "hyper", "hyper_util", "reqwest"];

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., devbundle::detection) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,

    /// Include thread ID and name in logs
    pub include_thread_ids: bool,
}

impl Default for LoggingConfig {
    /// INFO level, pretty console output, targets on, locations and threads off
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// JSON output with locations and thread ids, for log collectors
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
            include_thread_ids: true,
        }
    }

    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            ..Default::default()
        }
    }
}

/// Parses a log level from a string, case-insensitively
///
/// Unknown values print a warning to stderr and fall back to `Level::INFO`.
///
/// ```
/// use devbundle::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("INFO"), Level::INFO);
/// assert_eq!(parse_level("invalid"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn build_filter(level: Level) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("devbundle={}", level).parse::<Directive>() {
        filter = filter.add_directive(directive);
    }

    if env::var("RUST_LOG").is_err() {
        for krate in QUIET_DEPENDENCIES {
            if let Ok(directive) = format!("{}=warn", krate).parse::<Directive>() {
                filter = filter.add_directive(directive);
            }
        }
    }
    filter
}

/// stderr formatting layer, JSON lines or pretty text per `config`
fn output_layer<S>(config: &LoggingConfig) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.include_target)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_thread_ids(config.include_thread_ids)
        .with_thread_names(config.include_thread_ids);

    if config.use_json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

/// Initializes the global subscriber; calls after the first are ignored
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(build_filter(config.level))
            .with(output_layer(&config))
            .init();
    });
}

pub fn init_default() {
    init_logging(LoggingConfig::default());
}

/// Reads `DEVBUNDLE_LOG_LEVEL` and `DEVBUNDLE_LOG_JSON`; `RUST_LOG` still
/// applies as the base filter
pub fn init_from_env() {
    init_logging(config_from_env());
}

/// Builds a [`LoggingConfig`] from `DEVBUNDLE_LOG_LEVEL` and `DEVBUNDLE_LOG_JSON`
pub fn config_from_env() -> LoggingConfig {
    let level_str = env::var("DEVBUNDLE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let level = parse_level(&level_str);

    let use_json = env::var("DEVBUNDLE_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    LoggingConfig {
        level,
        use_json,
        ..Default::default()
    }
}
