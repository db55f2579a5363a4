//! Hookup CLI - map and validate documents through declarative schemas
//!
//! This is the main entry point for the Hookup CLI application, providing
//! commands for mapping source documents, checking schemas and generating
//! shell completions.

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
    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    // The configuration feeds logging, so it is read first
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = run(cli, config).await {
        exit_with(&e);
    }
}

fn exit_with(e: &error::Error) -> ! {
    eprintln!(
        "{}",
        error::format_error(e, control::SHOULD_COLORIZE.should_colorize())
    );

    if e.should_show_help() {
        eprintln!("\nFor more information, try '--help'");
    }

    process::exit(e.exit_code());
}

/// Main application logic
#[instrument(
    skip(cli, config),
    fields(
        command = ?cli.command,
        run_id = logging::current_run_id().unwrap_or("unknown")
    )
)]
async fn run(cli: Cli, config: Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = match cli.output {
        Some(format) => format,
        None => config.output_format()?,
    };
    let use_color = cli.use_color() && config.output.color;
    let mut output = OutputWriter::new(format, use_color, cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Map(args) => handlers::handle_map(args, &config, &mut output).await,
        Commands::Check(args) => handlers::handle_check(args, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_file(&config.logging, cli.verbosity_level());
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}
