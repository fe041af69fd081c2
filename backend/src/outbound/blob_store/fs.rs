//! Filesystem blob store confined to a single directory.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};

use crate::domain::ports::{BlobStore, BlobStoreError, is_valid_blob_key};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Blob store writing `<key>.json` files under a data directory.
///
/// Every write goes to a hidden temporary file first and is renamed over the
/// target, so readers never observe a partial blob.
#[derive(Clone)]
pub struct FsBlobStore {
    root: Utf8PathBuf,
    dir: Arc<Dir>,
}

impl FsBlobStore {
    /// Open `root`, creating it when missing.
    pub fn open(root: &Utf8Path) -> Result<Self, BlobStoreError> {
        let open_error = |err: io::Error| BlobStoreError::read(root.as_str(), err.to_string());
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(open_error)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(open_error)?;
        Ok(Self {
            root: root.to_path_buf(),
            dir: Arc::new(dir),
        })
    }

    /// Directory holding the blobs.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn file_name(key: &str) -> Result<String, BlobStoreError> {
        if is_valid_blob_key(key) {
            Ok(format!("{key}.json"))
        } else {
            Err(BlobStoreError::invalid_key(key))
        }
    }

    async fn blocking<T, F>(&self, key: &str, op: F) -> Result<T, BlobStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Dir) -> Result<T, BlobStoreError> + Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || op(&dir))
            .await
            .map_err(|err| BlobStoreError::write(key, format!("blob task failed: {err}")))?
    }
}

fn write_atomic(dir: &Dir, key: &str, file_name: &str, contents: &str) -> Result<(), BlobStoreError> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_name = format!(".{file_name}.tmp.{}.{counter}", std::process::id());
    let write_error = |err: io::Error| BlobStoreError::write(key, err.to_string());

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let written = dir.open_with(&tmp_name, &options).and_then(|mut file| {
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    });
    if let Err(err) = written {
        drop(dir.remove_file(&tmp_name));
        return Err(write_error(err));
    }

    if let Err(err) = dir.rename(&tmp_name, dir, file_name) {
        drop(dir.remove_file(&tmp_name));
        return Err(write_error(err));
    }
    // Directory sync is best effort.
    drop(dir.open(".").and_then(|parent| parent.sync_all()));
    Ok(())
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn read_blob(&self, key: &str) -> Result<Option<String>, BlobStoreError> {
        let file_name = Self::file_name(key)?;
        let owned_key = key.to_owned();
        self.blocking(key, move |dir| match dir.read_to_string(&file_name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(BlobStoreError::read(owned_key, err.to_string())),
        })
        .await
    }

    async fn write_blob(&self, key: &str, contents: &str) -> Result<(), BlobStoreError> {
        let file_name = Self::file_name(key)?;
        let owned_key = key.to_owned();
        let contents = contents.to_owned();
        self.blocking(key, move |dir| {
            write_atomic(dir, &owned_key, &file_name, &contents)
        })
        .await
    }

    async fn remove_blob(&self, key: &str) -> Result<(), BlobStoreError> {
        let file_name = Self::file_name(key)?;
        let owned_key = key.to_owned();
        self.blocking(key, move |dir| match dir.remove_file(&file_name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(BlobStoreError::write(owned_key, err.to_string())),
        })
        .await
    }
}
