use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ps_cli::commands::{authorize, delete, history, play, stats};
use ps_cli::{Cli, Commands, Config};

/// Load config and ensure the database directory exists.
fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so command output stays clean on stdout
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Some(Commands::Play) => {
            let config = load_config(cli.config.as_deref())?;
            play::run(&mut out, &config)?;
        }
        Some(Commands::History { json }) => {
            let config = load_config(cli.config.as_deref())?;
            history::run(&mut out, *json, &config)?;
        }
        Some(Commands::Stats { json }) => {
            let config = load_config(cli.config.as_deref())?;
            stats::run(&mut out, *json, &config)?;
        }
        Some(Commands::Delete(args)) => {
            let config = load_config(cli.config.as_deref())?;
            delete::run(&mut out, args, &config)?;
        }
        Some(Commands::Authorize) => {
            let config = load_config(cli.config.as_deref())?;
            authorize::run(&mut out, &config)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    out.flush()?;
    Ok(())
}
