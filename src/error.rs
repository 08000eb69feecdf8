//! Error types for Waymark
//!
//! All fallible modules use `WaymarkResult<T>` as their return type.
//! Cache operations themselves never surface these: store and geocoder
//! failures degrade to "value not available" inside the cache.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Waymark operations
pub type WaymarkResult<T> = Result<T, WaymarkError>;

/// All errors that can occur in Waymark
#[derive(Error, Debug)]
pub enum WaymarkError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Store errors
    #[error("Store read failed for key {key}: {reason}")]
    StoreRead { key: String, reason: String },

    #[error("Store write failed for key {key}: {reason}")]
    StoreWrite { key: String, reason: String },

    // Input errors
    #[error("Invalid shipment file {path}: {reason}")]
    ShipmentFile { path: PathBuf, reason: String },

    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    CoordinateRange { latitude: f64, longitude: f64 },

    #[error("Not cached: {0}")]
    NotCached(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WaymarkError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ShipmentFile { .. } => {
                Some("Expected a JSON array: [{\"id\": \"...\", \"pickup_address\": \"...\", \"delivery_address\": \"...\"}]")
            }
            Self::NotCached(_) => Some("Run: waymark preload <file> to resolve addresses first"),
            Self::CoordinateRange { .. } => {
                Some("Latitude must be in [-90, 90], longitude in [-180, 180]")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = WaymarkError::NotCached("load-42".to_string());
        assert!(err.to_string().contains("load-42"));
    }

    #[test]
    fn error_hint() {
        let err = WaymarkError::CoordinateRange {
            latitude: 120.0,
            longitude: 0.0,
        };
        assert!(err.hint().unwrap().contains("[-90, 90]"));
        assert!(WaymarkError::Internal("x".into()).hint().is_none());
    }
}
