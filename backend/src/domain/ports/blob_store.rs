//! Port abstraction for the key-value blob store behind the record store.
use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by blob store adapters.
    pub enum BlobStoreError {
        /// The key is not a valid blob name.
        InvalidKey { key: String } => "invalid blob key: {key}",
        /// Reading the blob failed.
        Read { key: String, message: String } => "blob store read of {key} failed: {message}",
        /// Writing or removing the blob failed.
        Write { key: String, message: String } => "blob store write of {key} failed: {message}",
    }
}

/// Named text blobs, replaced whole on every write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read the blob stored under `key`; `None` when absent.
    async fn read_blob(&self, key: &str) -> Result<Option<String>, BlobStoreError>;

    /// Replace the blob stored under `key`.
    async fn write_blob(&self, key: &str, contents: &str) -> Result<(), BlobStoreError>;

    /// Remove the blob stored under `key`; removing an absent blob succeeds.
    async fn remove_blob(&self, key: &str) -> Result<(), BlobStoreError>;
}

/// Whether `key` is a plain blob name: ASCII letters, digits and `-`.
#[must_use]
pub fn is_valid_blob_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-')
}
