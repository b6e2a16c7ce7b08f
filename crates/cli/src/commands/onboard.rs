//! `switchyard onboard`: First-time setup.

use switchyard_config::AppConfig;

use super::CommandResult;

pub async fn run() -> CommandResult {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("🔀 Switchyard — First-Time Setup");
    println!("================================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Start a local Ollama server with the `mistral` model,");
        println!("      or set default_provider and an API key in {}", config_path.display());
        println!("   2. Run: switchyard ask \"What is 5+5 and write a story about it\"\n");
    }

    println!("🎉 Setup complete! Run `switchyard chat` to start.\n");

    Ok(())
}
