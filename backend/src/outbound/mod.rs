//! Outbound adapters implementing domain ports.
//!
//! - **blob_store**: filesystem and in-memory [`BlobStore`] adapters behind
//!   the record store.
//! - **credentials**: random [`CredentialGenerator`].
//!
//! Adapters are thin translators between domain ports and infrastructure.
//! They contain no business logic.
//!
//! [`BlobStore`]: crate::domain::ports::BlobStore
//! [`CredentialGenerator`]: crate::domain::ports::CredentialGenerator

pub mod blob_store;
pub mod credentials;
