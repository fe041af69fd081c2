//! Typed collections on top of the blob store port.
//!
//! Every collection is a JSON array stored whole under its own key and is
//! replaced whole on write. The active session lives under a separate key.
//! A blob that is missing or cannot be parsed reads as empty for views.
//! Write paths load through [`RecordStore::load_for_update`], which refuses
//! to hand out a collection it could not decode so that a save never
//! overwrites records it did not read.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{error, warn};

use super::ports::{BlobStore, BlobStoreError};
use super::{Contribution, Dataset, Error, Member, Session, Syndicate, Training};

/// Key of the blob holding the active session.
pub const SESSION_KEY: &str = "current-session";

/// The four persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Syndicate records.
    Syndicates,
    /// Member records.
    Members,
    /// Contribution records.
    Contributions,
    /// Training records.
    Trainings,
}

impl Collection {
    /// Blob key under which the collection is stored.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Syndicates => "syndicates",
            Self::Members => "members",
            Self::Contributions => "contributions",
            Self::Trainings => "trainings",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A record type persisted as one collection.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection holding records of this type.
    const COLLECTION: Collection;
}

impl Record for Syndicate {
    const COLLECTION: Collection = Collection::Syndicates;
}

impl Record for Member {
    const COLLECTION: Collection = Collection::Members;
}

impl Record for Contribution {
    const COLLECTION: Collection = Collection::Contributions;
}

impl Record for Training {
    const COLLECTION: Collection = Collection::Trainings;
}

fn map_blob_error(error: BlobStoreError) -> Error {
    Error::internal(format!("record store failure: {error}"))
}

/// Collection-level access to persisted records.
#[derive(Clone)]
pub struct RecordStore {
    blobs: Arc<dyn BlobStore>,
}

impl RecordStore {
    /// Wrap a blob store adapter.
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    async fn read_collection<R: Record>(
        &self,
    ) -> Result<Option<Result<Vec<R>, serde_json::Error>>, Error> {
        let raw = self
            .blobs
            .read_blob(R::COLLECTION.key())
            .await
            .map_err(map_blob_error)?;
        Ok(raw.map(|raw| serde_json::from_str(&raw)))
    }

    /// Load every record of `R` in stored order.
    pub async fn load<R: Record>(&self) -> Result<Vec<R>, Error> {
        match self.read_collection().await? {
            None => Ok(Vec::new()),
            Some(Ok(records)) => Ok(records),
            Some(Err(err)) => {
                warn!(
                    collection = R::COLLECTION.key(),
                    error = %err,
                    "unreadable collection treated as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Load every record of `R` ahead of replacing the collection.
    ///
    /// A missing blob is an empty collection, but one that is present and
    /// does not decode is an internal error.
    pub async fn load_for_update<R: Record>(&self) -> Result<Vec<R>, Error> {
        match self.read_collection().await? {
            None => Ok(Vec::new()),
            Some(Ok(records)) => Ok(records),
            Some(Err(err)) => {
                let key = R::COLLECTION.key();
                error!(collection = key, error = %err, "refusing to overwrite unreadable collection");
                Err(Error::internal(format!("{key} collection is unreadable: {err}")))
            }
        }
    }

    /// Replace every record of `R`.
    pub async fn save<R: Record>(&self, records: &[R]) -> Result<(), Error> {
        let key = R::COLLECTION.key();
        let encoded = serde_json::to_string(records)
            .map_err(|err| Error::internal(format!("failed to encode {key}: {err}")))?;
        self.blobs
            .write_blob(key, &encoded)
            .await
            .map_err(map_blob_error)
    }

    /// Load all four collections.
    pub async fn snapshot(&self) -> Result<Dataset, Error> {
        Ok(Dataset {
            syndicates: self.load().await?,
            members: self.load().await?,
            contributions: self.load().await?,
            trainings: self.load().await?,
        })
    }

    /// Session persisted by the last login, if any.
    pub async fn load_session(&self) -> Result<Option<Session>, Error> {
        let Some(raw) = self
            .blobs
            .read_blob(SESSION_KEY)
            .await
            .map_err(map_blob_error)?
        else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                warn!(error = %err, "unreadable session blob ignored");
                Ok(None)
            }
        }
    }

    /// Persist the active session.
    pub async fn save_session(&self, session: &Session) -> Result<(), Error> {
        let encoded = serde_json::to_string(session)
            .map_err(|err| Error::internal(format!("failed to encode session: {err}")))?;
        self.blobs
            .write_blob(SESSION_KEY, &encoded)
            .await
            .map_err(map_blob_error)
    }

    /// Forget the active session.
    pub async fn clear_session(&self) -> Result<(), Error> {
        self.blobs
            .remove_blob(SESSION_KEY)
            .await
            .map_err(map_blob_error)
    }
}
