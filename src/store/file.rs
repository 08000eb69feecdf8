//! File-backed key-value store

use crate::error::{WaymarkError, WaymarkResult};
use crate::store::KeyValueStore;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Key-value store writing one `<key>.json` file per key under a directory
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub async fn open(dir: PathBuf) -> WaymarkResult<Self> {
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| WaymarkError::io(format!("creating store dir {}", dir.display()), e))?;
        Ok(Self { dir })
    }

    /// The directory backing this store
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> WaymarkResult<Option<Vec<u8>>> {
        let path = self.key_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read(&path).await.map_err(|e| WaymarkError::StoreRead {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        debug!("Read {} bytes for key {}", content.len(), key);
        Ok(Some(content))
    }

    async fn put(&self, key: &str, value: &[u8]) -> WaymarkResult<()> {
        let path = self.key_path(key);

        fs::write(&path, value)
            .await
            .map_err(|e| WaymarkError::StoreWrite {
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        debug!("Wrote {} bytes for key {}", value.len(), key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> WaymarkResult<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path)
                .await
                .map_err(|e| WaymarkError::StoreWrite {
                    key: key.to_string(),
                    reason: e.to_string(),
                })?;
        }
        Ok(())
    }
}
