//! dirtrack CLI Binary
//!
//! Command-line interface for directory change tracking.

use anyhow::Context;
use clap::Parser;
use dirtrack::cli::{exit_code, map_error, Cli, RunContext};
use dirtrack::config::ConfigLoader;
use dirtrack::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("{}", map_error(&e));
            process::exit(exit_code(&e));
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let mut config =
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Initialize logging early
    config.logging = build_logging_config(cli, config.logging);
    init_logging(&config.logging).context("Failed to initialize logging")?;

    if let Some(workers) = cli.hash_workers {
        config.tracker.hash_workers = workers;
        config.validate().context("Invalid --hash-workers")?;
    }

    info!("dirtrack starting");
    let context = RunContext::from_config(config);
    Ok(context.execute(&cli.command)?)
}

/// Apply CLI logging flags over the configured logging section.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, mut config: LoggingConfig) -> LoggingConfig {
    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
        if cli.log_output.is_none() {
            config.output = "file".to_string();
        }
    }
    config
}
