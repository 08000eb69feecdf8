//! Status command - cache entry counts and storage location

use crate::cli::commands::{open_cache, resolve_cache_dir};
use crate::config::Config;
use crate::error::WaymarkResult;
use console::style;
use std::path::PathBuf;

/// Execute the status command
pub async fn execute(config: &Config, cache_dir: Option<&PathBuf>) -> WaymarkResult<()> {
    let dir = resolve_cache_dir(config, cache_dir);
    let cache = open_cache(config, cache_dir, None).await?;
    let stats = cache.stats();

    println!("{}", style("Waymark cache").bold());
    println!("  Location:   {}", dir.display());
    println!("  Pickups:    {}", stats.pickups);
    println!("  Deliveries: {}", stats.deliveries);
    println!("  Routes:     {}", stats.routes);
    println!();
    println!(
        "Geocoder: {} (max {} concurrent request(s))",
        config.geocoder.base_url, config.geocoder.max_concurrent_requests
    );

    Ok(())
}
