//! Preload command - bulk-resolve shipment addresses

use crate::cli::args::PreloadArgs;
use crate::cli::commands::open_cache;
use crate::config::Config;
use crate::error::WaymarkResult;
use crate::model::load_shipments;
use console::style;
use std::path::PathBuf;
use tracing::info;

/// Execute the preload command
pub async fn execute(
    args: PreloadArgs,
    config: &Config,
    cache_dir: Option<&PathBuf>,
) -> WaymarkResult<()> {
    let shipments = load_shipments(&args.file).await?;
    if shipments.is_empty() {
        println!("No shipments in {}.", args.file.display());
        return Ok(());
    }

    let cache = open_cache(config, cache_dir, args.max_concurrent).await?;
    info!("Preloading {} shipments", shipments.len());

    let ran = cache.preload(&shipments).await;
    if !ran {
        // Only possible if something else holds the guard in this process
        println!("A preload is already running, try again later.");
        return Ok(());
    }

    // Completion is observed through cache population
    let mut pickups = 0;
    let mut deliveries = 0;
    for shipment in &shipments {
        if cache.pickup_coordinate(&shipment.id).is_some() {
            pickups += 1;
        }
        if cache.delivery_coordinate(&shipment.id).is_some() {
            deliveries += 1;
        }
    }

    println!(
        "{} {} shipment(s): {} pickup and {} delivery coordinate(s) cached",
        style("✓").green(),
        shipments.len(),
        pickups,
        deliveries
    );

    Ok(())
}
