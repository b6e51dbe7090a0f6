use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Repository stack detection and development-environment bundle generation
#[derive(Parser, Debug)]
#[command(
    name = "devbundle",
    about = "Detect a repository's stack and generate a development environment bundle",
    version,
    author,
    long_about = "devbundle inspects a repository's file listing and manifests to detect its \
                  technology stack and backing services, then generates a docker-compose file, \
                  a devcontainer, VS Code settings, a development guide and a setup script \
                  that all agree on one application port."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Detect the technology stack of a repository",
        long_about = "Fetches the repository listing and manifests and prints the detected \
                      stack profile.\n\n\
                      Examples:\n  \
                      devbundle analyze rust-lang/cargo\n  \
                      devbundle analyze https://github.com/expressjs/express --format json\n  \
                      devbundle analyze my-app --path ./my-app"
    )]
    Analyze(AnalyzeArgs),

    #[command(
        about = "Generate a development environment bundle",
        long_about = "Analyzes the repository and writes the six bundle files either to a \
                      directory or to a .tar.gz archive.\n\n\
                      Examples:\n  \
                      devbundle generate rust-lang/cargo --archive cargo-devbundle.tar.gz\n  \
                      devbundle generate my-app --path ./my-app --out-dir ./my-app"
    )]
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    #[arg(
        value_name = "REF",
        help = "Repository reference (owner/name or GitHub URL), or a display name with --path"
    )]
    pub reference: String,

    #[arg(
        short = 'p',
        long,
        value_name = "DIR",
        help = "Analyze a local checkout instead of fetching from GitHub"
    )]
    pub path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(
        short = 'a',
        long,
        value_name = "FILE",
        conflicts_with = "out_dir",
        help = "Write the bundle as a .tar.gz archive"
    )]
    pub archive: Option<PathBuf>,

    #[arg(
        short = 'd',
        long,
        value_name = "DIR",
        help = "Write the bundle files under this directory"
    )]
    pub out_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
