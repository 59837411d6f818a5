use async_trait::async_trait;
use std::sync::Mutex;

use super::{Storage, StorageError};
use crate::models::Document;

/// In-memory store used by tests and useful for local experiments. Same
/// whole-document semantics as the file store, no disk involved.
#[derive(Default)]
pub struct MemoryStore {
    doc: Mutex<Document>,
}

impl MemoryStore {
    pub fn with_document(doc: Document) -> Self {
        Self {
            doc: Mutex::new(doc),
        }
    }
}

#[async_trait]
impl Storage for MemoryStore {
    async fn load(&self) -> Result<Document, StorageError> {
        Ok(self.doc.lock().expect("memory store poisoned").clone())
    }

    async fn save(&self, doc: &Document) -> Result<(), StorageError> {
        *self.doc.lock().expect("memory store poisoned") = doc.clone();
        Ok(())
    }
}
