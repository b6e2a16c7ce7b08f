//! Provider selection: resolves `default_provider` to a live backend.

use std::sync::Arc;
use switchyard_config::AppConfig;
use switchyard_core::provider::Provider;
use tracing::debug;
use crate::openai_compat::OpenAiCompatProvider;

/// Build the backend named by `config.default_provider`.
///
/// A `[providers.<name>]` table overrides the key and URL; otherwise the
/// top-level `api_key` and the well-known URL for that name are used.
pub fn build_provider(config: &AppConfig) -> Arc<dyn Provider> {
    let name = config.default_provider.as_str();
    let section = config.providers.get(name);

    let api_key = section
        .and_then(|p| p.api_key.clone())
        .or_else(|| config.api_key.clone())
        .unwrap_or_default();
    let base_url = section
        .and_then(|p| p.api_url.clone())
        .unwrap_or_else(|| default_base_url(name));

    debug!(provider = name, base_url = %base_url, "Provider selected");
    Arc::new(OpenAiCompatProvider::new(name, &base_url, &api_key))
}

/// Get the default base URL for well-known providers.
fn default_base_url(provider_name: &str) -> String {
    match provider_name {
        "ollama" => "http://localhost:11434/v1".into(),
        "openai" => "https://api.openai.com/v1".into(),
        "openrouter" => "https://openrouter.ai/api/v1".into(),
        "groq" => "https://api.groq.com/openai/v1".into(),
        "together" => "https://api.together.xyz/v1".into(),
        "vllm" => "http://localhost:8000/v1".into(),
        "llamacpp" | "llama.cpp" => "http://localhost:8080/v1".into(),
        _ => format!("https://{provider_name}.api.example.com/v1"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchyard_config::ProviderConfig;

    #[test]
    fn default_base_urls() {
        assert!(default_base_url("ollama").contains("localhost:11434"));
        assert!(default_base_url("openai").contains("api.openai.com"));
    }

    #[test]
    fn default_config_selects_ollama() {
        let provider = build_provider(&AppConfig::default());
        assert_eq!(provider.name(), "ollama");
    }

    #[test]
    fn unlisted_provider_is_still_built() {
        let config = AppConfig {
            default_provider: "groq".into(),
            ..AppConfig::default()
        };
        assert_eq!(build_provider(&config).name(), "groq");
    }

    #[test]
    fn provider_section_is_honoured() {
        let mut config = AppConfig {
            default_provider: "vllm".into(),
            ..AppConfig::default()
        };
        config.providers.insert(
            "vllm".into(),
            ProviderConfig {
                api_key: None,
                api_url: Some("http://gpu-box:8000/v1".into()),
                default_model: None,
            },
        );
        assert_eq!(build_provider(&config).name(), "vllm");
    }
}
