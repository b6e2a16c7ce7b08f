//! `switchyard history|stats|clear`: Conversation log commands.

use switchyard_core::conversation::ConversationRecord;

use super::CommandResult;

/// How much of a response the history view shows per entry.
const PREVIEW_CHARS: usize = 80;

pub async fn history(limit: usize) -> CommandResult {
    let config = super::load_config()?;
    let store = super::build_store(&config);
    let records = store.conversations().await;

    println!("📜 Conversation History");
    println!("=======================");

    if records.is_empty() {
        println!("  No conversations yet.");
        return Ok(());
    }

    let start = records.len().saturating_sub(limit);
    for (i, record) in records[start..].iter().enumerate() {
        print_record(start + i + 1, record);
    }
    println!("\n  Showing {} of {}", records.len() - start, records.len());

    Ok(())
}

fn print_record(index: usize, record: &ConversationRecord) {
    let mut preview: String = record.response.chars().take(PREVIEW_CHARS).collect();
    if record.response.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    println!("\n  {index:>3}. [{}] {}", record.route, record.timestamp);
    println!("       Q: {}", record.query);
    println!("       A: {}", preview.replace('\n', " "));
    if let Some(language) = &record.metadata.target_language {
        println!("       Language: {language}");
    }
}

pub async fn stats() -> CommandResult {
    let config = super::load_config()?;
    let store = super::build_store(&config);
    let stats = store.statistics().await;

    println!("🧠 Memory Statistics");
    println!("====================");
    println!("  Backend:        {}", store.name());
    if config.memory.backend != "none" {
        println!("  File:           {}", config.memory.resolved_path().display());
    }
    println!("  Retention:      {}", config.memory.retention);
    println!("  Conversations:  {}", stats.total_conversations);

    if stats.total_conversations == 0 {
        return Ok(());
    }

    println!("  Avg response:   {:.1} chars", stats.average_response_length);
    if let Some(last) = &stats.last_interaction {
        println!("  Last activity:  {last}");
    }
    println!("  Routes:");
    for (route, count) in &stats.route_distribution {
        println!("    {route:<10} {count}");
    }

    Ok(())
}

pub async fn clear(confirm: bool) -> CommandResult {
    if !confirm {
        println!("⚠️  This will delete ALL remembered conversations permanently.");
        println!("   Run with --confirm to proceed:");
        println!("   switchyard clear --confirm");
        return Ok(());
    }

    let config = super::load_config()?;
    let store = super::build_store(&config);
    let count = store.len().await;
    store.clear().await;

    println!("🗑️  Cleared {count} conversations.");

    Ok(())
}
