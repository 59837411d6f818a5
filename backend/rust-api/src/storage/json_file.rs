use async_trait::async_trait;
use std::path::PathBuf;

use super::{Storage, StorageError};
use crate::models::Document;

/// Flat-file JSON store. The whole document lives in one file that is read
/// and rewritten per operation; a missing file loads as the empty document
/// and comes into existence on the first write.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Storage for JsonFileStore {
    async fn load(&self) -> Result<Document, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Document::default());
            }
            Err(e) => return Err(StorageError::Read(e)),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn save(&self, doc: &Document) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(doc)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(StorageError::Write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScoreEntry;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("commons-db-{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn missing_file_loads_empty_document() {
        let store = JsonFileStore::new(temp_path());
        let doc = store.load().await.unwrap();
        assert!(doc.game_scores.is_empty());
        assert!(doc.questions.is_empty());
    }

    #[tokio::test]
    async fn document_round_trips_through_disk() {
        let path = temp_path();
        let store = JsonFileStore::new(&path);

        let mut doc = Document::default();
        doc.game_scores.push(ScoreEntry {
            id: "s1".into(),
            name: "Player".into(),
            score: 150.0,
            game: "number".into(),
            submitted_at: chrono::Utc::now(),
        });

        store.save(&doc).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.game_scores.len(), 1);
        assert_eq!(loaded.game_scores[0].score, 150.0);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn timestamps_persist_as_epoch_millis() {
        let path = temp_path();
        let store = JsonFileStore::new(&path);

        let mut doc = Document::default();
        doc.game_scores.push(ScoreEntry {
            id: "s1".into(),
            name: "Player".into(),
            score: 1.0,
            game: "number".into(),
            submitted_at: chrono::DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
        });
        store.save(&doc).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&tokio::fs::read(&path).await.unwrap()).unwrap();
        assert_eq!(raw["game_scores"][0]["t"], 1_700_000_000_000i64);

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
