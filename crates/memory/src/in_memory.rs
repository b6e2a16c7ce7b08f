//! In-memory store: useful for testing and ephemeral sessions.

use async_trait::async_trait;
use switchyard_core::conversation::{ConversationMetadata, ConversationRecord, MemoryDocument};
use switchyard_core::memory::{ContextStore, MemoryStatistics};
use std::sync::Arc;
use tokio::sync::RwLock;
use crate::context::{DEFAULT_RETENTION, compute_statistics, enforce_retention, render_context};

/// A store that keeps the bounded log in process memory only.
pub struct InMemoryStore {
    document: Arc<RwLock<MemoryDocument>>,
    retention: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_retention(DEFAULT_RETENTION)
    }

    pub fn with_retention(retention: usize) -> Self {
        Self {
            document: Arc::new(RwLock::new(MemoryDocument::default())),
            retention: retention.max(1),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContextStore for InMemoryStore {
    fn name(&self) -> &str { "in_memory" }

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
    }

    async fn conversations(&self) -> Vec<ConversationRecord> {
        self.document.read().await.conversations.clone()
    }

    async fn statistics(&self) -> MemoryStatistics {
        compute_statistics(&self.document.read().await.conversations)
    }

    async fn clear(&self) {
        *self.document.write().await = MemoryDocument::default();
    }

    async fn len(&self) -> usize {
        self.document.read().await.conversations.len()
    }
}
