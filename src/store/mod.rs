//! Durable key-value persistence
//!
//! The cache serializes each namespace into one blob per key, so a partial
//! write can never corrupt a neighboring namespace. There are no
//! transactional guarantees across keys.

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::WaymarkResult;
use async_trait::async_trait;

/// Abstract durable key-value store.
///
/// Implementations survive process restarts (except [`MemoryStore`], which
/// exists for tests and ephemeral runs). A missing key is `Ok(None)`, not an
/// error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `key`, if any
    async fn get(&self, key: &str) -> WaymarkResult<Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any previous blob
    async fn put(&self, key: &str, value: &[u8]) -> WaymarkResult<()>;

    /// Remove the blob under `key`; removing a missing key is not an error
    async fn remove(&self, key: &str) -> WaymarkResult<()>;
}
