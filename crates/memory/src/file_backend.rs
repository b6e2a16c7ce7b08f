//! File-based store: the durable `memory.json` document.
//!
//! The whole document is loaded into memory on creation and rewritten on
//! every mutation (add, clear). Only the newest `retention` records are
//! kept. The file is other tools' history view too, so its shape follows
//! [`MemoryDocument`] exactly.
//!
//! Storage location: `~/.switchyard/memory.json` unless configured.

use async_trait::async_trait;
use switchyard_core::conversation::{ConversationMetadata, ConversationRecord, MemoryDocument};
use switchyard_core::error::MemoryError;
use switchyard_core::memory::{ContextStore, MemoryStatistics};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use crate::context::{DEFAULT_RETENTION, compute_statistics, enforce_retention, render_context};

/// A JSON-document-backed conversation store.
///
/// Writers hold the document's write lock across append, truncate and
/// flush, so concurrent queries never interleave file writes.
pub struct JsonFileStore {
    path: PathBuf,
    retention: usize,
    document: Arc<RwLock<MemoryDocument>>,
}

impl JsonFileStore {
    /// Open the store at `path`, keeping the default 50 records.
    ///
    /// A missing, unreadable or malformed file starts an empty history.
    pub fn new(path: PathBuf) -> Self {
        Self::with_retention(path, DEFAULT_RETENTION)
    }

    pub fn with_retention(path: PathBuf, retention: usize) -> Self {
        let retention = retention.max(1);
        let mut document = Self::load_from_disk(&path);
        enforce_retention(&mut document.conversations, retention);
        debug!(
            path = %path.display(),
            count = document.conversations.len(),
            "Memory file loaded"
        );
        Self {
            path,
            retention,
            document: Arc::new(RwLock::new(document)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_disk(path: &Path) -> MemoryDocument {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return MemoryDocument::default(); // File doesn't exist yet: start empty
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read memory file, starting empty");
                return MemoryDocument::default();
            }
        };

        match Self::parse(&content) {
            Ok(document) => {
                info!(path = %path.display(), "Memory loaded");
                document
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring corrupted memory file");
                MemoryDocument::default()
            }
        }
    }

    fn parse(content: &str) -> Result<MemoryDocument, MemoryError> {
        if content.trim().is_empty() {
            return Ok(MemoryDocument::default());
        }
        serde_json::from_str(content).map_err(|e| MemoryError::Corrupted(e.to_string()))
    }

    /// Write the document next to the target and rename it into place.
    fn flush(&self, document: &MemoryDocument) -> Result<(), MemoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                MemoryError::Storage(format!("Failed to create memory directory: {e}"))
            })?;
        }

        let content = serde_json::to_string_pretty(document).map_err(|e| {
            MemoryError::Storage(format!("Failed to serialize memory: {e}"))
        })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, content).map_err(|e| {
            MemoryError::Storage(format!("Failed to write memory file: {e}"))
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            MemoryError::Storage(format!("Failed to replace memory file: {e}"))
        })?;

        Ok(())
    }

    fn flush_or_log(&self, document: &MemoryDocument) {
        match self.flush(document) {
            Ok(()) => debug!(path = %self.path.display(), "Memory saved"),
            Err(e) => error!(path = %self.path.display(), error = %e, "Error saving memory"),
        }
    }
}

#[async_trait]
impl ContextStore for JsonFileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn get_context(&self, query: &str) -> String {
        render_context(&self.document.read().await.conversations, query)
    }

    async fn add_conversation(
        &self,
        query: &str,
        response: &str,
        route: &str,
        metadata: ConversationMetadata,
    ) {
        let mut document = self.document.write().await;
        document
            .conversations
            .push(ConversationRecord::new(query, response, route, metadata));
        enforce_retention(&mut document.conversations, self.retention);
        self.flush_or_log(&document);
    }

    async fn conversations(&self) -> Vec<ConversationRecord> {
        self.document.read().await.conversations.clone()
    }

    async fn statistics(&self) -> MemoryStatistics {
        compute_statistics(&self.document.read().await.conversations)
    }

    async fn clear(&self) {
        let mut document = self.document.write().await;
        *document = MemoryDocument::default();
        self.flush_or_log(&document);
        info!(path = %self.path.display(), "Memory cleared");
    }

    async fn len(&self) -> usize {
        self.document.read().await.conversations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> (JsonFileStore, PathBuf) {
        let path = dir.path().join("memory.json");
        (JsonFileStore::new(path.clone()), path)
    }

    fn read_document(path: &Path) -> MemoryDocument {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn add_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let (store, path) = store_in(&dir);

        store
            .add_conversation(
                "square root of 16",
                "Square root of 16 = 4.0",
                "math",
                ConversationMetadata { has_math: true, ..Default::default() },
            )
            .await;

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["conversations"][0]["query"], "square root of 16");
        assert_eq!(raw["conversations"][0]["metadata"]["has_math"], true);
        assert!(raw["conversations"][0]["metadata"]["target_language"].is_null());
        assert!(raw["user_preferences"].as_object().unwrap().is_empty());
        assert!(raw["session_context"].as_object().unwrap().is_empty());

        let reloaded = JsonFileStore::new(path);
        assert_eq!(reloaded.len().await, 1);
        assert_eq!(reloaded.conversations().await[0].route, "math");
    }

    #[tokio::test]
    async fn persisted_log_keeps_fifty_newest_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let (store, path) = store_in(&dir);

        for i in 0..57 {
            store
                .add_conversation(&format!("query {i}"), "r", "default", ConversationMetadata::default())
                .await;
        }

        let document = read_document(&path);
        assert_eq!(document.conversations.len(), 50);
        let queries: Vec<_> = document.conversations.iter().map(|c| c.query.clone()).collect();
        let expected: Vec<_> = (7..57).map(|i| format!("query {i}")).collect();
        assert_eq!(queries, expected);
    }

    #[tokio::test]
    async fn file_is_pretty_printed_with_two_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let (store, path) = store_in(&dir);
        store
            .add_conversation("hi", "hello", "default", ConversationMetadata::default())
            .await;
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("{\n  \"conversations\""));
        assert!(!dir.path().join("memory.json.tmp").exists());
    }

    #[tokio::test]
    async fn handles_missing_file_gracefully() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("memory.json"));
        assert!(store.is_empty().await);

        // Parent directory is created on first write
        store
            .add_conversation("hi", "hello", "default", ConversationMetadata::default())
            .await;
        assert!(dir.path().join("nested").join("memory.json").exists());
    }

    #[tokio::test]
    async fn corrupted_file_loads_as_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.json");
        std::fs::write(&path, "{\"conversations\": [ {\"query\": ").unwrap();

        let store = JsonFileStore::new(path.clone());
        assert!(store.is_empty().await);

        // The next write replaces the broken file with a valid one
        store
            .add_conversation("fresh", "start", "default", ConversationMetadata::default())
            .await;
        assert_eq!(read_document(&path).conversations.len(), 1);
    }

    #[tokio::test]
    async fn loads_files_written_by_other_tools() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.json");
        std::fs::write(
            &path,
            r#"{
  "conversations": [
    {"timestamp": "2025-03-01T09:15:00.123456", "query": "Write a poem about summer",
     "response": "Sun...", "route": "write",
     "metadata": {"has_math": false, "has_story": true, "has_translation": false, "target_language": null}}
  ],
  "user_preferences": {"tone": "casual"},
  "session_context": {}
}"#,
        )
        .unwrap();

        let store = JsonFileStore::new(path.clone());
        assert_eq!(store.len().await, 1);
        assert!(store.get_context("summer").await.contains("Write a poem about summer"));

        // Auxiliary maps survive a rewrite
        store
            .add_conversation("again", "ok", "default", ConversationMetadata::default())
            .await;
        let document = read_document(&path);
        assert_eq!(document.user_preferences["tone"], "casual");
        assert_eq!(document.conversations.len(), 2);
    }

    #[tokio::test]
    async fn write_failure_keeps_in_memory_record() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "plain file").unwrap();

        let store = JsonFileStore::new(blocker.join("memory.json"));
        store
            .add_conversation("hi", "hello", "default", ConversationMetadata::default())
            .await;

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get_context("hi").await, "Previous: hi -> hello...");
    }

    #[tokio::test]
    async fn clear_persists() {
        let dir = tempfile::tempdir().unwrap();
        let (store, path) = store_in(&dir);
        store
            .add_conversation("one", "1", "math", ConversationMetadata::default())
            .await;
        store.clear().await;

        assert!(read_document(&path).conversations.is_empty());
        assert!(JsonFileStore::new(path).is_empty().await);
    }

    #[tokio::test]
    async fn concurrent_writers_do_not_lose_records() {
        let dir = tempfile::tempdir().unwrap();
        let (store, path) = store_in(&dir);
        let store = Arc::new(store);

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .add_conversation(&format!("q{i}"), "r", "default", ConversationMetadata::default())
                    .await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len().await, 20);
        assert_eq!(read_document(&path).conversations.len(), 20);
    }
}
