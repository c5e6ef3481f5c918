use clap::Parser;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cli;
mod commands;
mod config;
mod credentials;
mod crew;
mod llm;
mod question;
mod report;

use cli::{Cli, Commands};
use commands::ask::AskOptions;
use config::{Config, LogLevel};
use credentials::Credentials;

fn setup_logging(log_level: LogLevel) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("twincrew")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("twincrew.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG env var takes precedence, otherwise use config log_level
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(log_level.to_level_filter());
    }

    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    info!(
        "Log level: {} (from {})",
        log_level.as_filter(),
        if std::env::var("RUST_LOG").is_ok() { "RUST_LOG env" } else { "config" }
    );
    Ok(())
}

fn run(cli: Cli, config: Config, credentials: Credentials) -> Result<()> {
    let (verbose, quiet) = (cli.verbose, cli.quiet);
    let ask = |question: Option<String>, dry_run: bool| AskOptions {
        question,
        dry_run,
        verbose,
        quiet,
    };

    match cli.command {
        None => commands::ask::run(ask(None, false), &config, &credentials),
        Some(Commands::Ask { question, dry_run }) => commands::ask::run(ask(question, dry_run), &config, &credentials),
        Some(Commands::Doctor) => commands::doctor::run(&config, &credentials),
        Some(Commands::Config { action }) => commands::config::run(action, &config),
        Some(Commands::Completions { shell }) => commands::completions::run(shell),
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments first
    let cli = Cli::parse();

    // Load configuration (before logging, so log messages in Config::load are silent)
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging with log level from config (or RUST_LOG env var)
    setup_logging(config.log_level).context("Failed to setup logging")?;

    info!("Starting twincrew with config from: {:?}", config.source);

    // Environment is read once here and passed down explicitly
    let credentials = Credentials::load();

    run(cli, config, credentials).context("Command failed")?;

    Ok(())
}
