//! Retrieval and bookkeeping shared by every store.
//!
//! Relevance is token-substring overlap: a past conversation is relevant
//! when any whitespace-separated token of the new query (lower-cased)
//! occurs anywhere inside the past query (lower-cased). It is crude on
//! purpose and must stay that way, because stored prompts were built
//! against exactly this recall.

use std::collections::BTreeMap;
use switchyard_core::conversation::ConversationRecord;
use switchyard_core::memory::MemoryStatistics;

/// How many of the newest records are considered for context.
pub const CONTEXT_WINDOW: usize = 10;

/// How much of a past response is quoted in the context line.
pub const RESPONSE_PREVIEW_CHARS: usize = 100;

/// How many records are kept by default.
pub const DEFAULT_RETENTION: usize = 50;

/// Render the context block for `query` from the newest records.
pub fn render_context(records: &[ConversationRecord], query: &str) -> String {
    let query_lower = query.to_lowercase();
    let tokens: Vec<&str> = query_lower.split_whitespace().collect();
    if tokens.is_empty() {
        return String::new();
    }

    let start = records.len().saturating_sub(CONTEXT_WINDOW);
    records[start..]
        .iter()
        .filter(|record| {
            let past = record.query.to_lowercase();
            tokens.iter().any(|token| past.contains(token))
        })
        .map(|record| {
            let preview: String = record.response.chars().take(RESPONSE_PREVIEW_CHARS).collect();
            format!("Previous: {} -> {}...", record.query, preview)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop the oldest records so at most `retention` remain.
pub fn enforce_retention(records: &mut Vec<ConversationRecord>, retention: usize) {
    if records.len() > retention {
        let excess = records.len() - retention;
        records.drain(..excess);
    }
}

pub fn compute_statistics(records: &[ConversationRecord]) -> MemoryStatistics {
    if records.is_empty() {
        return MemoryStatistics::default();
    }

    let mut route_distribution = BTreeMap::new();
    for record in records {
        *route_distribution.entry(record.route.clone()).or_insert(0) += 1;
    }

    let total_chars: usize = records.iter().map(|r| r.response.chars().count()).sum();

    MemoryStatistics {
        total_conversations: records.len(),
        route_distribution,
        average_response_length: total_chars as f64 / records.len() as f64,
        last_interaction: records.last().map(|r| r.timestamp.clone()),
    }
}
