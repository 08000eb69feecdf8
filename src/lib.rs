//! Waymark - shipment location coordinate cache
//!
//! Caches geocoded pickup/delivery coordinates and route polylines for
//! shipment records, persisted across restarts, with a bounded-concurrency
//! bulk preload over an external geocoding backend.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod geocode;
pub mod model;
pub mod store;

pub use cache::LocationCache;
pub use error::{WaymarkError, WaymarkResult};
