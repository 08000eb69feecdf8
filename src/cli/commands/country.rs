//! Country command - reverse country lookup for a coordinate

use crate::cli::args::CountryArgs;
use crate::config::Config;
use crate::error::WaymarkResult;
use crate::geocode::{Geocoder, NominatimGeocoder};
use crate::model::Coordinate;
use console::style;

/// Execute the country command
pub async fn execute(args: CountryArgs, config: &Config) -> WaymarkResult<()> {
    let coordinate = Coordinate::new(args.latitude, args.longitude)?;

    let geocoder = NominatimGeocoder::new(
        config.geocoder.base_url.clone(),
        config.geocoder.user_agent.clone(),
    );

    match geocoder.resolve_country(coordinate).await {
        Some(info) => {
            println!("{}", info.name);
            println!(
                "  bounds: {:.4}..{:.4} lat, {:.4}..{:.4} lon",
                info.bounding_box.south,
                info.bounding_box.north,
                info.bounding_box.west,
                info.bounding_box.east
            );
        }
        None => {
            // Unresolvable is "unknown", not an error
            println!("{}", style("No country resolved for this coordinate.").dim());
        }
    }

    Ok(())
}
