//! Waymark - shipment location coordinate cache
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use waymark::cli::{Cli, Commands};
use waymark::config::ConfigManager;
use waymark::WaymarkResult;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> WaymarkResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("waymark=warn"),
        1 => EnvFilter::new("waymark=info"),
        _ => EnvFilter::new("waymark=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = config_manager.load().await?;

    match cli.command {
        Commands::Preload(args) => {
            waymark::cli::commands::preload(args, &config, cli.cache_dir.as_ref()).await
        }
        Commands::Show(args) => {
            waymark::cli::commands::show(args, &config, cli.cache_dir.as_ref()).await
        }
        Commands::Country(args) => waymark::cli::commands::country(args, &config).await,
        Commands::Status => waymark::cli::commands::status(&config, cli.cache_dir.as_ref()).await,
        Commands::Clear(args) => {
            waymark::cli::commands::clear(args, &config, cli.cache_dir.as_ref()).await
        }
        Commands::Config(args) => {
            waymark::cli::commands::config(args, &config, cli.config.as_ref()).await
        }
    }
}
