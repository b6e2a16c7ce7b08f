//! Translation handler.
//!
//! Translates whatever earlier handlers produced. With nothing upstream it
//! falls back to a quoted phrase (`translate "..."`) or the whole query.

use async_trait::async_trait;
use regex_lite::Regex;
use switchyard_core::error::ClassifierError;
use switchyard_providers::TextGenerator;
use tracing::{error, info};

use super::Handler;
use crate::classifier::compile_pattern;
use crate::state::QueryState;

/// Recognised target languages, scanned in this order.
pub const LANGUAGES: [(&str, &str); 10] = [
    ("spanish", "Spanish"),
    ("french", "French"),
    ("german", "German"),
    ("italian", "Italian"),
    ("portuguese", "Portuguese"),
    ("chinese", "Chinese"),
    ("japanese", "Japanese"),
    ("korean", "Korean"),
    ("hindi", "Hindi"),
    ("arabic", "Arabic"),
];

pub const DEFAULT_LANGUAGE: &str = "Spanish";

pub struct TranslationHandler {
    languages: Vec<(Regex, &'static str)>,
    quoted: Regex,
}

impl TranslationHandler {
    pub fn new() -> Result<Self, ClassifierError> {
        let languages = LANGUAGES
            .iter()
            .map(|(key, name)| {
                compile_pattern("language", &format!(r"\b(to|in)\s+{key}\b")).map(|re| (re, *name))
            })
            .collect::<Result<Vec<_>, ClassifierError>>()?;
        let quoted = compile_pattern("translation", r#"translate\s+"([^"]+)""#)?;
        Ok(Self { languages, quoted })
    }

    /// First language in table order named as `to X` / `in X`, else Spanish.
    pub fn target_language(&self, query: &str) -> &'static str {
        let lowered = query.to_lowercase();
        self.languages
            .iter()
            .find(|(re, _)| re.is_match(&lowered))
            .map_or(DEFAULT_LANGUAGE, |(_, name)| *name)
    }

    /// The text to translate for this state.
    pub fn content(&self, state: &QueryState) -> String {
        let mut content = String::new();
        if !state.math_result.is_empty() {
            content.push_str(&format!("Math: {}\n", state.math_result));
        }
        if !state.story.is_empty() {
            content.push_str(&format!("Story: {}\n", state.story));
        }
        if !content.is_empty() {
            return content;
        }

        self.quoted
            .captures(&state.input)
            .and_then(|caps| caps.get(1))
            .map_or_else(|| state.input.clone(), |m| m.as_str().to_string())
    }
}

#[async_trait]
impl Handler for TranslationHandler {
    fn name(&self) -> &'static str {
        "translation"
    }

    async fn handle(&self, state: &mut QueryState, generator: &TextGenerator) {
        info!(query = %state.input, "Translator node processing");

        let language = self.target_language(&state.input);
        let prompt = format!(
            "Previous context: {}\n\nPlease translate the following content to {}:\n\n{}\n\nProvide a natural, accurate translation.",
            state.memory_context,
            language,
            self.content(state)
        );

        state.translation = match generator.generate(&prompt).await {
            Ok(text) => {
                info!(language, chars = text.chars().count(), "Translation completed");
                text
            }
            Err(e) => {
                error!(error = %e, "Translation error");
                format!("Error translating: {e}")
            }
        };
        state.target_language = Some(language.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{FailingProvider, ScriptedProvider, generator_for};
    use std::sync::Arc;

    fn handler() -> TranslationHandler {
        TranslationHandler::new().unwrap()
    }

    #[test]
    fn detects_target_language() {
        let h = handler();
        assert_eq!(h.target_language("translate hello to French"), "French");
        assert_eq!(h.target_language("say it in JAPANESE please"), "Japanese");
        assert_eq!(h.target_language("translate hello"), "Spanish");
        // "frenchman" is not a language mention
        assert_eq!(h.target_language("translate this to frenchman"), "Spanish");
    }

    #[test]
    fn table_order_breaks_ties() {
        // german appears first in the query, but french is earlier in the table
        assert_eq!(handler().target_language("to german or to french"), "French");
    }

    #[test]
    fn content_prefers_upstream_results() {
        let mut state = QueryState::new("Calculate 15 * 3 and translate the result to Spanish");
        state.math_result = "15 * 3 = 45".into();
        state.story = "A tale.".into();
        assert_eq!(handler().content(&state), "Math: 15 * 3 = 45\nStory: A tale.\n");
    }

    #[test]
    fn content_uses_quoted_phrase() {
        let state = QueryState::new(r#"translate "hello" to French"#);
        assert_eq!(handler().content(&state), "hello");
    }

    #[test]
    fn content_falls_back_to_query() {
        let state = QueryState::new("how do you say good night in italian");
        assert_eq!(handler().content(&state), "how do you say good night in italian");
    }

    #[tokio::test]
    async fn translates_quoted_phrase() {
        let provider = Arc::new(ScriptedProvider::new(&["bonjour"]));
        let mut state = QueryState::new(r#"translate "hello" to French"#);

        handler().handle(&mut state, &generator_for(provider.clone())).await;

        assert_eq!(state.translation, "bonjour");
        assert_eq!(state.target_language.as_deref(), Some("French"));
        assert_eq!(
            provider.prompts()[0],
            "Previous context: \n\nPlease translate the following content to French:\n\nhello\n\nProvide a natural, accurate translation."
        );
    }

    #[tokio::test]
    async fn backend_failure_keeps_language() {
        let mut state = QueryState::new("translate goodbye to german");
        handler()
            .handle(&mut state, &generator_for(Arc::new(FailingProvider)))
            .await;
        assert_eq!(state.translation, "Error translating: Network error: connection refused");
        assert_eq!(state.target_language.as_deref(), Some("German"));
    }
}
