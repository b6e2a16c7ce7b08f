//! ContextStore trait: the rolling conversation log behind context retrieval.
//!
//! The store answers "what did we talk about before that looks like this
//! query?" with deliberately naive keyword overlap, and records every
//! completed query. Persistence problems are the store's own business:
//! every operation here degrades to a log line instead of an error, so a
//! broken disk never aborts a query.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::conversation::{ConversationMetadata, ConversationRecord};

/// Aggregate numbers over the stored conversations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStatistics {
    pub total_conversations: usize,

    /// Route name → number of records with that route
    pub route_distribution: BTreeMap<String, usize>,

    /// Mean response length in characters (0.0 when empty)
    pub average_response_length: f64,

    /// Timestamp of the newest record
    pub last_interaction: Option<String>,
}

/// The core ContextStore trait.
///
/// Implementations: JSON file (durable), in-memory (tests, ephemeral sessions).
#[async_trait]
pub trait ContextStore: Send + Sync {
    /// The backend name (e.g., "file", "in_memory").
    fn name(&self) -> &str;

    /// Render prior conversations relevant to `query`, or an empty string.
    async fn get_context(&self, query: &str) -> String;

    /// Append a record for a completed query and persist the bounded log.
    async fn add_conversation(
        &self,
        query: &str,
        response: &str,
        route: &str,
        metadata: ConversationMetadata,
    );

    /// Snapshot of all held records, oldest first.
    async fn conversations(&self) -> Vec<ConversationRecord>;

    /// Summary statistics over the held records.
    async fn statistics(&self) -> MemoryStatistics;

    /// Drop every record and auxiliary mapping.
    async fn clear(&self);

    /// Number of records held.
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
