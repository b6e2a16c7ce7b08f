//! `TextGenerator`: the "prompt in, text out" capability used by handlers.
//!
//! Wraps a [`Provider`] with the configured model and sampling settings,
//! and bounds every call with a timeout so a hung backend cannot hang the
//! whole query.

use std::sync::Arc;
use std::time::Duration;
use switchyard_core::error::ProviderError;
use switchyard_core::provider::{Provider, ProviderRequest};
use tracing::{debug, warn};

/// A provider bound to one model, ready to turn prompts into text.
#[derive(Clone)]
pub struct TextGenerator {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    timeout: Duration,
}

impl TextGenerator {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.7,
            max_tokens: None,
            timeout: Duration::from_secs(120),
        }
    }

    /// Build a generator using the default model, sampling and timeout settings.
    pub fn from_config(provider: Arc<dyn Provider>, config: &switchyard_config::AppConfig) -> Self {
        Self::new(provider, &config.default_model)
            .with_temperature(config.default_temperature)
            .with_max_tokens(config.default_max_tokens)
            .with_timeout(Duration::from_secs(config.routing.generation_timeout_secs))
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `prompt` as a single user message and return the reply text.
    pub async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let mut request = ProviderRequest::prompt(&self.model, prompt);
        request.temperature = self.temperature;
        request.max_tokens = self.max_tokens;

        debug!(
            provider = %self.provider.name(),
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "Generating"
        );

        let response = match tokio::time::timeout(self.timeout, self.provider.complete(request)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    provider = %self.provider.name(),
                    timeout_secs = self.timeout.as_secs(),
                    "Generation timed out"
                );
                return Err(ProviderError::Timeout(format!(
                    "Provider '{}' timed out after {}s",
                    self.provider.name(),
                    self.timeout.as_secs()
                )));
            }
        };

        let text = response.message.content;
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse(self.provider.name().to_string()));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use switchyard_core::message::Message;
    use switchyard_core::provider::ProviderResponse;

    /// Echoes a fixed reply and remembers the last request.
    struct CannedProvider {
        reply: String,
        last_request: Mutex<Option<ProviderRequest>>,
    }

    impl CannedProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.into(),
                last_request: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl Provider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
            *self.last_request.lock().unwrap() = Some(request);
            Ok(ProviderResponse {
                message: Message::assistant(&self.reply),
                usage: None,
                model: "canned-model".into(),
            })
        }
    }

    /// Never answers.
    struct StalledProvider;

    #[async_trait]
    impl Provider for StalledProvider {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn generate_returns_reply_and_applies_settings() {
        let provider = Arc::new(CannedProvider::new("Hola"));
        let generator = TextGenerator::new(provider.clone(), "mistral")
            .with_temperature(0.2)
            .with_max_tokens(64);

        let text = generator.generate("Translate hello").await.unwrap();
        assert_eq!(text, "Hola");

        let request = provider.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.model, "mistral");
        assert_eq!(request.max_tokens, Some(64));
        assert!((request.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(request.messages[0].content, "Translate hello");
    }

    #[tokio::test]
    async fn blank_reply_is_an_error() {
        let generator = TextGenerator::new(Arc::new(CannedProvider::new("  \n")), "mistral");
        let err = generator.generate("anything").await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_provider_times_out() {
        let generator = TextGenerator::new(Arc::new(StalledProvider), "mistral")
            .with_timeout(Duration::from_secs(5));
        let err = generator.generate("hello?").await.unwrap_err();
        assert!(matches!(err, ProviderError::Timeout(_)));
        assert!(err.to_string().contains("5s"));
    }

    #[test]
    fn from_config_uses_routing_timeout() {
        let mut config = switchyard_config::AppConfig::default();
        config.routing.generation_timeout_secs = 7;
        let generator = TextGenerator::from_config(Arc::new(CannedProvider::new("x")), &config);
        assert_eq!(generator.timeout, Duration::from_secs(7));
        assert_eq!(generator.model(), "mistral");
        assert_eq!(generator.provider_name(), "canned");
    }
}
