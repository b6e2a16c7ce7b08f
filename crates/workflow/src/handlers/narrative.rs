//! Creative writing handler.

use async_trait::async_trait;
use switchyard_providers::TextGenerator;
use tracing::{debug, error, info};

use super::Handler;
use crate::state::QueryState;

pub struct NarrativeHandler;

impl NarrativeHandler {
    /// Build the prompt. A prior arithmetic result is woven into the story.
    pub fn prompt(state: &QueryState) -> String {
        if state.math_result.is_empty() {
            format!(
                "Previous context: {}\n\nCreate engaging creative content based on this request: {}",
                state.memory_context, state.input
            )
        } else {
            format!(
                "Previous context: {}\n\n\
                 Write a creative story that incorporates this math result: {}\n\n\
                 Original request: {}\n\n\
                 Please create an engaging story that naturally includes the mathematical calculation.",
                state.memory_context, state.math_result, state.input
            )
        }
    }
}

#[async_trait]
impl Handler for NarrativeHandler {
    fn name(&self) -> &'static str {
        "narrative"
    }

    async fn handle(&self, state: &mut QueryState, generator: &TextGenerator) {
        info!(query = %state.input, "Writer node processing");

        let prompt = Self::prompt(state);
        debug!(with_math = !state.math_result.is_empty(), "Story prompt built");

        state.story = match generator.generate(&prompt).await {
            Ok(story) => {
                info!(chars = story.chars().count(), "Story created");
                story
            }
            Err(e) => {
                error!(error = %e, "Writer error");
                format!("Error creating story: {e}")
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
    async fn free_creative_content() {
        let provider = Arc::new(ScriptedProvider::new(&["Once upon a time..."]));
        let mut state = QueryState::new("Write a poem about summer");

        NarrativeHandler.handle(&mut state, &generator_for(provider.clone())).await;

        assert_eq!(state.story, "Once upon a time...");
        assert_eq!(
            provider.prompts()[0],
            "Previous context: \n\nCreate engaging creative content based on this request: Write a poem about summer"
        );
    }

    #[tokio::test]
    async fn math_result_is_woven_in() {
        let provider = Arc::new(ScriptedProvider::always("Forty-five dragons..."));
        let mut state = QueryState::new("Calculate 15 * 3 and write a story about it");
        state.math_result = "15 * 3 = 45".into();

        NarrativeHandler.handle(&mut state, &generator_for(provider.clone())).await;

        let prompt = &provider.prompts()[0];
        assert!(prompt.contains("incorporates this math result: 15 * 3 = 45"));
        assert!(prompt.contains("Original request: Calculate 15 * 3 and write a story about it"));
    }

    #[tokio::test]
    async fn backend_failure_becomes_error_text() {
        let mut state = QueryState::new("tell me a story");
        NarrativeHandler
            .handle(&mut state, &generator_for(Arc::new(FailingProvider)))
            .await;
        assert_eq!(state.story, "Error creating story: Network error: connection refused");
    }
}
