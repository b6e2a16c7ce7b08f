//! `switchyard status`: Show configuration and memory status.

use switchyard_config::AppConfig;

use super::CommandResult;

pub async fn run(check: bool) -> CommandResult {
    let config = super::load_config()?;
    let store = super::build_store(&config);

    println!("🔀 Switchyard Status");
    println!("====================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Provider:     {}", config.default_provider);
    println!("  Model:        {}", config.default_model);
    println!("  Temperature:  {}", config.default_temperature);
    println!("  API key:      {}", if config.has_api_key() { "set" } else { "not set" });
    println!("  Timeout:      {}s", config.routing.generation_timeout_secs);
    println!("  Memory:       {} ({} conversations)", config.memory.backend, store.len().await);
    if config.memory.backend != "none" {
        println!("  Memory file:  {}", config.memory.resolved_path().display());
    }
    if let Some(file) = &config.logging.file {
        println!("  Log file:     {file}");
    }

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `switchyard onboard` first");
    }

    if check {
        let provider = switchyard_providers::build_provider(&config);
        match provider.health_check().await {
            Ok(true) => println!("  ✅ Backend '{}' reachable", provider.name()),
            Ok(false) => println!("  ⚠️  Backend '{}' responded but is not healthy", provider.name()),
            Err(e) => println!("  ❌ Backend '{}' unreachable: {e}", provider.name()),
        }
    }

    Ok(())
}
