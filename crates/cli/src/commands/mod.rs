//! Subcommand implementations and the wiring they share.

pub mod ask;
pub mod chat;
pub mod memory;
pub mod onboard;
pub mod routes;
pub mod status;

use std::sync::Arc;
use switchyard_config::AppConfig;
use switchyard_core::memory::ContextStore;
use switchyard_core::{Error, Result};
use switchyard_memory::{InMemoryStore, JsonFileStore};
use switchyard_providers::{TextGenerator, build_provider};
use switchyard_workflow::Orchestrator;

pub type CommandResult = std::result::Result<(), Box<dyn std::error::Error>>;

pub fn load_config() -> Result<AppConfig> {
    AppConfig::load().map_err(|e| Error::Config {
        message: e.to_string(),
    })
}

/// The conversation store selected by `memory.backend`.
pub fn build_store(config: &AppConfig) -> Arc<dyn ContextStore> {
    match config.memory.backend.as_str() {
        "none" => Arc::new(InMemoryStore::with_retention(config.memory.retention)),
        _ => Arc::new(JsonFileStore::with_retention(
            config.memory.resolved_path(),
            config.memory.retention,
        )),
    }
}

/// A generator bound to the default provider and its model.
pub fn build_generator(config: &AppConfig) -> TextGenerator {
    let provider = build_provider(config);

    let mut generation = config.clone();
    if let Some(model) = config
        .providers
        .get(&config.default_provider)
        .and_then(|p| p.default_model.clone())
    {
        generation.default_model = model;
    }

    TextGenerator::from_config(provider, &generation)
}

pub fn build_orchestrator(config: &AppConfig) -> Result<Orchestrator> {
    let orchestrator =
        Orchestrator::from_config(config, build_generator(config), build_store(config))?;
    Ok(orchestrator)
}
