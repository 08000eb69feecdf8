//! Nominatim-compatible geocoder backend
//!
//! Speaks the Nominatim search/reverse JSON API. Requests run on the
//! blocking pool; every transport or parse failure degrades to `None`.

use crate::geocode::{BoundingBox, CountryInfo, Geocoder};
use crate::model::Coordinate;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Geocoder backed by a Nominatim-compatible HTTP endpoint
#[derive(Clone)]
pub struct NominatimGeocoder {
    agent: ureq::Agent,
    base_url: String,
    user_agent: String,
}

impl NominatimGeocoder {
    /// Create a geocoder against `base_url` (no trailing slash needed).
    ///
    /// Nominatim requires an identifying user agent on every request.
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(10)))
            .build();

        Self {
            agent: config.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_agent: user_agent.into(),
        }
    }

    fn fetch(&self, url: String) -> Option<String> {
        let mut response = self
            .agent
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .call()
            .map_err(|e| debug!("Geocode request failed: {}", e))
            .ok()?;

        response
            .body_mut()
            .read_to_string()
            .map_err(|e| debug!("Geocode response read failed: {}", e))
            .ok()
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, address: &str) -> Option<Coordinate> {
        let this = self.clone();
        let query = address.to_string();
        let url = format!(
            "{}/search?format=json&limit=1&q={}",
            this.base_url,
            urlencode(&query)
        );

        let body = tokio::task::spawn_blocking(move || this.fetch(url))
            .await
            .ok()??;

        let coord = parse_search_response(&body);
        if coord.is_none() {
            debug!("Address did not resolve: {}", query);
        }
        coord
    }

    async fn resolve_country(&self, coordinate: Coordinate) -> Option<CountryInfo> {
        let this = self.clone();
        let url = format!(
            "{}/reverse?format=json&zoom=3&lat={}&lon={}",
            this.base_url, coordinate.latitude, coordinate.longitude
        );

        let body = tokio::task::spawn_blocking(move || this.fetch(url))
            .await
            .ok()??;

        parse_country_response(&body)
    }
}

#[derive(Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}

#[derive(Deserialize)]
struct ReverseResult {
    display_name: String,
    boundingbox: Vec<String>,
}

/// Parse a Nominatim search response into the best-match coordinate.
///
/// Nominatim encodes lat/lon as strings; out-of-range values are rejected.
fn parse_search_response(body: &str) -> Option<Coordinate> {
    let results: Vec<SearchResult> = serde_json::from_str(body).ok()?;
    let first = results.into_iter().next()?;

    let latitude: f64 = first.lat.parse().ok()?;
    let longitude: f64 = first.lon.parse().ok()?;
    Coordinate::new(latitude, longitude).ok()
}

/// Parse a Nominatim reverse response into a country lookup result.
///
/// The bounding box comes as `[south, north, west, east]` strings.
fn parse_country_response(body: &str) -> Option<CountryInfo> {
    let result: ReverseResult = serde_json::from_str(body).ok()?;

    if result.boundingbox.len() != 4 {
        return None;
    }
    let parsed: Vec<f64> = result
        .boundingbox
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();
    if parsed.len() != 4 {
        return None;
    }

    Some(CountryInfo {
        name: result.display_name,
        bounding_box: BoundingBox {
            south: parsed[0],
            north: parsed[1],
            west: parsed[2],
            east: parsed[3],
        },
    })
}

/// Percent-encode a query string component
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
