//! tcapi2postman - Postman collection generator for Teamcenter services
//!
//! This is the main entry point of the CLI: it loads configuration, sets up
//! logging and dispatches to the command handlers.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    let config = {
        let _config_timer = Timer::new("config_loading");
        match Config::load_with_file(cli.config.as_deref()) {
            Ok(config) => config,
            Err(e) => exit_with(&e),
        }
    };

    control::set_override(cli.use_color() && config.output.color);

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli, &config).await {
        Ok(()) => process::exit(0),
        Err(e) => exit_with(&e),
    }
}

fn exit_with(error: &error::Error) -> ! {
    eprintln!("{}", error::format_error(error, control::SHOULD_COLORIZE.should_colorize()));
    process::exit(error.exit_code());
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
async fn run(cli: Cli, config: &Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let use_color = control::SHOULD_COLORIZE.should_colorize();
    let mut output = OutputWriter::new(cli.format, use_color, cli.quiet, cli.verbosity_level());

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Generate(args) => handlers::handle_generate(args, config, &mut output).await,
        Commands::Inspect(args) => handlers::handle_inspect(args, &mut output).await,
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let verbosity = cli.verbosity_level();
    let mut logging_config = LoggingConfig::from_verbosity(verbosity);

    logging_config.apply_settings(&config.logging, verbosity);
    logging_config.merge_with_env();

    // Quiet mode keeps errors only, and only when a log file is configured
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}
