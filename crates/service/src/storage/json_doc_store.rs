use std::{marker::PhantomData, path::PathBuf, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::Mutex};

use crate::errors::ServiceError;

/// Whole-document JSON file store.
///
/// The entire value of type `T` is the durable state: every operation loads
/// the full document from disk, works on it in memory, and writes the full
/// document back. One async mutex serializes all access, reads included, so
/// two operations can never interleave inside a load-mutate-save window.
/// Persisting goes through a temp file renamed over the target, so a write
/// that fails partway leaves the previous document on disk.
///
/// Single-process only; a second process on the same file is not coordinated.
pub struct JsonDocStore<T> {
    file_path: PathBuf,
    lock: Mutex<()>,
    _doc: PhantomData<fn() -> T>,
}

impl<T> JsonDocStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Open the store at `path`. Creates parent directories and seeds the
    /// file with an empty document if it does not exist yet.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        if fs::metadata(&file_path).await.is_err() {
            let empty = serde_json::to_vec(&T::default())
                .map_err(|e| ServiceError::Storage(e.to_string()))?;
            fs::write(&file_path, empty)
                .await
                .map_err(|e| ServiceError::Storage(e.to_string()))?;
        }

        Ok(Arc::new(Self { file_path, lock: Mutex::new(()), _doc: PhantomData }))
    }

    /// Read the current document.
    pub async fn read(&self) -> Result<T, ServiceError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    /// Run `f` against the current document and persist the result. The
    /// lock is held across the whole load-mutate-save sequence; an error
    /// from `f` aborts the update without touching the file.
    pub async fn update<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut T) -> Result<R, ServiceError>,
    {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;
        let out = f(&mut doc)?;
        self.save(&doc).await?;
        Ok(out)
    }

    async fn load(&self) -> Result<T, ServiceError> {
        let bytes = fs::read(&self.file_path)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        if bytes.is_empty() {
            return Ok(T::default());
        }
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::Corrupt(e.to_string()))
    }

    async fn save(&self, doc: &T) -> Result<(), ServiceError> {
        let data = serde_json::to_vec(doc).map_err(|e| ServiceError::Storage(e.to_string()))?;
        let tmp = self.file_path.with_extension("json.tmp");
        fs::write(&tmp, data)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        fs::rename(&tmp, &self.file_path)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(())
    }
}
