//! Configuration schema for Waymark
//!
//! Configuration is stored at `~/.config/waymark/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Geocoding backend settings
    pub geocoder: GeocoderConfig,

    /// Cache storage settings
    pub cache: CacheConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Geocoding backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Nominatim-compatible endpoint
    pub base_url: String,

    /// User agent sent with every request (required by Nominatim's policy)
    pub user_agent: String,

    /// Bound on concurrent outbound geocoding calls
    pub max_concurrent_requests: usize,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: format!("waymark/{}", env!("CARGO_PKG_VERSION")),
            max_concurrent_requests: crate::cache::DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

/// Cache storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Override for the cache directory (defaults to the state dir)
    pub dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.geocoder.max_concurrent_requests, 5);
        assert!(config.geocoder.base_url.starts_with("https://"));
        assert!(config.cache.dir.is_none());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [geocoder]
            max_concurrent_requests = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.geocoder.max_concurrent_requests, 2);
        assert_eq!(config.general.log_format, "text");
    }
}
