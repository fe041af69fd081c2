//! In-memory blob store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{BlobStore, BlobStoreError};

/// Blobs held in a process-local map; lost on exit.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl InMemoryBlobStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `blobs`.
    pub fn with_blobs<K, V>(blobs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            blobs: Mutex::new(
                blobs
                    .into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            ),
        }
    }

    fn lock(&self, key: &str) -> Result<MutexGuard<'_, HashMap<String, String>>, BlobStoreError> {
        self.blobs
            .lock()
            .map_err(|_| BlobStoreError::read(key, "blob map lock poisoned"))
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn read_blob(&self, key: &str) -> Result<Option<String>, BlobStoreError> {
        Ok(self.lock(key)?.get(key).cloned())
    }

    async fn write_blob(&self, key: &str, contents: &str) -> Result<(), BlobStoreError> {
        self.lock(key)?.insert(key.to_owned(), contents.to_owned());
        Ok(())
    }

    async fn remove_blob(&self, key: &str) -> Result<(), BlobStoreError> {
        self.lock(key)?.remove(key);
        Ok(())
    }
}
