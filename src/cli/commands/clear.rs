//! Clear command - drop cached coordinates and routes

use crate::cli::args::ClearArgs;
use crate::cli::commands::open_cache;
use crate::config::Config;
use crate::error::WaymarkResult;
use console::style;
use std::io::{self, Write};
use std::path::PathBuf;

/// Execute the clear command
pub async fn execute(
    args: ClearArgs,
    config: &Config,
    cache_dir: Option<&PathBuf>,
) -> WaymarkResult<()> {
    let cache = open_cache(config, cache_dir, None).await?;
    let stats = cache.stats();
    let total = stats.pickups + stats.deliveries + stats.routes;

    if total == 0 {
        println!("Cache is already empty.");
        return Ok(());
    }

    if !args.yes {
        print!(
            "This will remove {} cached entr{}. Are you sure? [y/N] ",
            total,
            if total == 1 { "y" } else { "ies" }
        );
        let _ = io::stdout().flush();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Failed to read input, aborting.");
            return Ok(());
        }

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    cache.clear_all().await;
    println!(
        "{} cleared {} entr{}",
        style("✓").green(),
        total,
        if total == 1 { "y" } else { "ies" }
    );

    Ok(())
}
