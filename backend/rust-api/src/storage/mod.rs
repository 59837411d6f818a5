use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::Document;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to read data file: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write data file: {0}")]
    Write(#[source] std::io::Error),

    #[error("data file is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Capability seam over the persisted document. Implementations read and
/// write the document wholesale; there is no finer-grained access.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn load(&self) -> Result<Document, StorageError>;
    async fn save(&self, doc: &Document) -> Result<(), StorageError>;
}

/// Cloneable handle over a [`Storage`] that serializes every
/// read-modify-write cycle behind one async mutex. Two racing mutations can
/// therefore never interleave and silently drop one writer's update.
#[derive(Clone)]
pub struct Database {
    storage: Arc<dyn Storage>,
    write_lock: Arc<Mutex<()>>,
}

impl Database {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Load a snapshot of the document. Reads don't take the write lock; the
    /// store always holds a complete last-written document.
    pub async fn read(&self) -> Result<Document, StorageError> {
        self.storage.load().await
    }

    /// Run one read-modify-write cycle under the write lock. The mutated
    /// document is persisted only when `mutate` returns `Ok`; a rejected
    /// mutation leaves the stored document untouched.
    pub async fn update<R, E, F>(&self, mutate: F) -> Result<R, E>
    where
        F: FnOnce(&mut Document) -> Result<R, E> + Send,
        R: Send,
        E: From<StorageError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.storage.load().await?;
        let out = mutate(&mut doc)?;
        self.storage.save(&doc).await?;
        Ok(out)
    }
}
