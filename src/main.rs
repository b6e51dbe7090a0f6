use devbundle::cli::commands::{CliArgs, Commands};
use devbundle::cli::handlers::{handle_analyze, handle_generate};
use devbundle::util::logging::{self, parse_level};
use devbundle::VERSION;

use clap::Parser;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("devbundle v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Analyze(analyze_args) => handle_analyze(analyze_args, args.quiet).await,
        Commands::Generate(generate_args) => handle_generate(generate_args, args.quiet).await,
    };

    std::process::exit(exit_code);
}

/// `--log-level` wins over `-v`/`-q`, which win over DEVBUNDLE_LOG_LEVEL
fn init_logging_from_args(args: &CliArgs) {
    let mut config = logging::config_from_env();

    if let Some(level_str) = &args.log_level {
        config.level = parse_level(level_str);
    } else if args.verbose {
        config.level = Level::DEBUG;
    } else if args.quiet {
        config.level = Level::ERROR;
    }

    logging::init_logging(config);
}
