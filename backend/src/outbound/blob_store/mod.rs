//! Blob store adapters.
//!
//! - [`FsBlobStore`]: one `<key>.json` file per blob inside a data directory,
//!   replaced atomically.
//! - [`InMemoryBlobStore`]: process-local map for tests and ephemeral runs.

mod fs;
mod memory;

pub use fs::FsBlobStore;
pub use memory::InMemoryBlobStore;
