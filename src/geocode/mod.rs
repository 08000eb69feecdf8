//! Geocoding collaborator abstraction
//!
//! The geocoding service is treated as rate-bounded and unreliable: every
//! failure mode (network, parse, not-found) degrades to absence. Callers
//! must treat a `None` as "unknown", never as an error to surface.

pub mod nominatim;

pub use nominatim::NominatimGeocoder;

use crate::model::Coordinate;
use async_trait::async_trait;

/// A country-level reverse lookup result
#[derive(Debug, Clone, PartialEq)]
pub struct CountryInfo {
    /// Country display name
    pub name: String,

    /// Bounding box of the country
    pub bounding_box: BoundingBox,
}

/// Geographic bounding box in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

/// Abstract address-to-coordinate resolution capability
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a free-text address to a coordinate.
    ///
    /// Returns `None` when the address cannot be resolved, is malformed, or
    /// the call fails. Never returns an error.
    async fn resolve(&self, address: &str) -> Option<Coordinate>;

    /// Reverse-resolve a coordinate to the containing country
    async fn resolve_country(&self, coordinate: Coordinate) -> Option<CountryInfo>;
}
