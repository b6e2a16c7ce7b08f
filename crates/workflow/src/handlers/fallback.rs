//! General response handler for queries with no recognised intent.

use async_trait::async_trait;
use switchyard_providers::TextGenerator;
use tracing::{error, info};

use super::Handler;
use crate::state::QueryState;

pub struct FallbackHandler;

#[async_trait]
impl Handler for FallbackHandler {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn handle(&self, state: &mut QueryState, generator: &TextGenerator) {
        info!(query = %state.input, "Default node processing");

        let prompt = format!(
            "Previous context: {}\n\nPlease provide a helpful response to: {}",
            state.memory_context, state.input
        );

        state.default_result = match generator.generate(&prompt).await {
            Ok(text) => {
                info!(chars = text.chars().count(), "Default response generated");
                text
            }
            Err(e) => {
                error!(error = %e, "Default node error");
                format!("Error generating response: {e}")
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{FailingProvider, ScriptedProvider, generator_for};
    use std::sync::Arc;

    #[tokio::test]
    async fn answers_with_context() {
        let provider = Arc::new(ScriptedProvider::new(&["Hi!"]));
        let mut state = QueryState::new("hello there");
        state.memory_context = "Previous: hello -> Hello...".into();

        FallbackHandler.handle(&mut state, &generator_for(provider.clone())).await;

        assert_eq!(state.default_result, "Hi!");
        assert_eq!(
            provider.prompts()[0],
            "Previous context: Previous: hello -> Hello...\n\nPlease provide a helpful response to: hello there"
        );
    }

    #[tokio::test]
    async fn backend_failure_becomes_error_text() {
        let mut state = QueryState::new("hello there");
        FallbackHandler
            .handle(&mut state, &generator_for(Arc::new(FailingProvider)))
            .await;
        assert_eq!(
            state.default_result,
            "Error generating response: Network error: connection refused"
        );
    }
}
