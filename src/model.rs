//! Core data types: coordinates, routes, and shipment records

use crate::error::{WaymarkError, WaymarkResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A geographic point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> WaymarkResult<Self> {
        let coord = Self {
            latitude,
            longitude,
        };
        if !coord.is_valid() {
            return Err(WaymarkError::CoordinateRange {
                latitude,
                longitude,
            });
        }
        Ok(coord)
    }

    /// Check that latitude is in [-90, 90] and longitude in [-180, 180]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// An ordered sequence of coordinates forming a path.
///
/// Insertion order is the path order: this is a polyline, not a set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Route {
    pub points: Vec<Coordinate>,
}

impl Route {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// A cached coordinate with resolution provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedCoordinate {
    /// The resolved coordinate
    pub coordinate: Coordinate,

    /// When the coordinate was resolved or cached
    pub resolved_at: DateTime<Utc>,
}

impl CachedCoordinate {
    /// Wrap a coordinate with the current timestamp
    pub fn now(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            resolved_at: Utc::now(),
        }
    }
}

/// One shipment record as supplied by the caller.
///
/// Addresses may be empty, meaning no resolution is attempted for that leg.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    /// Opaque identifier, unique per shipment
    pub id: String,

    /// Free-text pickup address
    #[serde(default)]
    pub pickup_address: String,

    /// Free-text delivery address
    #[serde(default)]
    pub delivery_address: String,
}

/// Load a JSON array of shipments from a file
pub async fn load_shipments(path: &Path) -> WaymarkResult<Vec<Shipment>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| WaymarkError::io(format!("reading shipment file {}", path.display()), e))?;

    serde_json::from_str(&content).map_err(|e| WaymarkError::ShipmentFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
