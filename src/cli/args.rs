//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Waymark - shipment location coordinate cache
///
/// Resolves shipment pickup and delivery addresses to coordinates through a
/// geocoding backend and keeps them in a durable local cache.
#[derive(Parser, Debug)]
#[command(name = "waymark")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "WAYMARK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Cache directory override
    #[arg(long, global = true, env = "WAYMARK_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve missing coordinates for a batch of shipments
    Preload(PreloadArgs),

    /// Show cached coordinates and route for a shipment
    Show(ShowArgs),

    /// Look up the country containing a coordinate
    Country(CountryArgs),

    /// Show cache entry counts and storage location
    Status,

    /// Clear the cache
    Clear(ClearArgs),

    /// Show or inspect configuration
    Config(ConfigArgs),
}

/// Arguments for the preload command
#[derive(Parser, Debug)]
pub struct PreloadArgs {
    /// JSON file containing an array of shipments
    pub file: PathBuf,

    /// Override the concurrent request bound from config
    #[arg(long)]
    pub max_concurrent: Option<usize>,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Shipment identifier
    pub id: String,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the country command
#[derive(Parser, Debug)]
pub struct CountryArgs {
    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,
}

/// Arguments for the clear command
#[derive(Parser, Debug)]
pub struct ClearArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}

/// Output format for show command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
}
