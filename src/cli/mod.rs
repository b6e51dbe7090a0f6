pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{AnalyzeArgs, CliArgs, Commands, GenerateArgs, OutputFormatArg, SourceArgs};
pub use output::{OutputFormat, OutputFormatter};
