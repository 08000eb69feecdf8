//! Show command - print cached data for one shipment

use crate::cli::args::{OutputFormat, ShowArgs};
use crate::cli::commands::open_cache;
use crate::config::Config;
use crate::error::{WaymarkError, WaymarkResult};
use crate::model::Coordinate;
use console::style;
use std::path::PathBuf;

/// Execute the show command
pub async fn execute(
    args: ShowArgs,
    config: &Config,
    cache_dir: Option<&PathBuf>,
) -> WaymarkResult<()> {
    let cache = open_cache(config, cache_dir, None).await?;

    let pickup = cache.pickup_coordinate(&args.id);
    let delivery = cache.delivery_coordinate(&args.id);
    let route = cache.route(&args.id);

    if pickup.is_none() && delivery.is_none() && route.is_none() {
        return Err(WaymarkError::NotCached(args.id));
    }

    match args.format {
        OutputFormat::Table => {
            println!("Shipment: {}", args.id);
            print_leg("Pickup", pickup);
            print_leg("Delivery", delivery);
            match route {
                Some(route) => println!("  Route:    {} point(s)", route.len()),
                None => println!("  Route:    {}", style("not cached").dim()),
            }
        }
        OutputFormat::Json => {
            #[derive(serde::Serialize)]
            struct ShowJson {
                id: String,
                pickup: Option<Coordinate>,
                delivery: Option<Coordinate>,
                route: Option<Vec<Coordinate>>,
            }

            let out = ShowJson {
                id: args.id,
                pickup,
                delivery,
                route: route.map(|r| r.points),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}

fn print_leg(label: &str, coordinate: Option<Coordinate>) {
    match coordinate {
        Some(c) => println!("  {:<9} {:.6}, {:.6}", format!("{}:", label), c.latitude, c.longitude),
        None => println!("  {:<9} {}", format!("{}:", label), style("not cached").dim()),
    }
}
