//! CLI command implementations

pub mod clear;
pub mod config;
pub mod country;
pub mod preload;
pub mod show;
pub mod status;

pub use clear::execute as clear;
pub use config::execute as config;
pub use country::execute as country;
pub use preload::execute as preload;
pub use show::execute as show;
pub use status::execute as status;

use crate::cache::LocationCache;
use crate::config::{Config, ConfigManager};
use crate::error::WaymarkResult;
use crate::geocode::NominatimGeocoder;
use crate::store::JsonFileStore;
use std::path::PathBuf;
use std::sync::Arc;

/// Resolve the effective cache directory: CLI override, then config, then
/// the default state dir.
pub(crate) fn resolve_cache_dir(config: &Config, override_dir: Option<&PathBuf>) -> PathBuf {
    override_dir
        .cloned()
        .or_else(|| config.cache.dir.clone())
        .unwrap_or_else(ConfigManager::cache_dir)
}

/// Open the location cache with its production collaborators
pub(crate) async fn open_cache(
    config: &Config,
    cache_dir: Option<&PathBuf>,
    max_concurrent: Option<usize>,
) -> WaymarkResult<LocationCache> {
    let dir = resolve_cache_dir(config, cache_dir);
    let store = JsonFileStore::open(dir).await?;
    let geocoder = NominatimGeocoder::new(
        config.geocoder.base_url.clone(),
        config.geocoder.user_agent.clone(),
    );
    let limit = max_concurrent.unwrap_or(config.geocoder.max_concurrent_requests);

    Ok(LocationCache::open(Arc::new(store), Arc::new(geocoder), limit).await)
}
