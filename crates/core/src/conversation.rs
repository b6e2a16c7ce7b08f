//! Conversation records and the on-disk memory document.
//!
//! The JSON shape here is shared with anything that reads the history file
//! directly, so field names and nesting must not change.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Which handlers contributed to a stored answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMetadata {
    #[serde(default)]
    pub has_math: bool,

    #[serde(default)]
    pub has_story: bool,

    #[serde(default)]
    pub has_translation: bool,

    /// Target language tag, present only when translation ran.
    #[serde(default)]
    pub target_language: Option<String>,
}

/// One completed query. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    /// Local ISO-8601 timestamp with microseconds, e.g. `2026-10-19T14:03:12.123456`
    pub timestamp: String,

    pub query: String,

    pub response: String,

    /// Route name (`math`, `write`, `translate`, `multi`, `default`).
    /// Kept as a string so older files with unknown routes still load.
    pub route: String,

    #[serde(default)]
    pub metadata: ConversationMetadata,
}

impl ConversationRecord {
    /// Create a record stamped with the current local time.
    pub fn new(
        query: impl Into<String>,
        response: impl Into<String>,
        route: impl Into<String>,
        metadata: ConversationMetadata,
    ) -> Self {
        Self {
            timestamp: now_iso8601(),
            query: query.into(),
            response: response.into(),
            route: route.into(),
            metadata,
        }
    }
}

/// Current local time as a naive ISO-8601 string with microsecond precision.
pub fn now_iso8601() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// The complete persisted memory file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryDocument {
    #[serde(default)]
    pub conversations: Vec<ConversationRecord>,

    /// Reserved; round-tripped but not populated.
    #[serde(default)]
    pub user_preferences: serde_json::Map<String, serde_json::Value>,

    /// Reserved; round-tripped but not populated.
    #[serde(default)]
    pub session_context: serde_json::Map<String, serde_json::Value>,
}
