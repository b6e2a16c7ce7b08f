//! Per-query working state and the outcome handed back to callers.

use serde::Serialize;
use switchyard_core::conversation::ConversationMetadata;
use switchyard_core::route::{Intent, Route};

use crate::orchestrator::Node;

/// Everything one query accumulates on its way through the workflow.
///
/// Owned by a single [`crate::Orchestrator::process`] call and dropped
/// once the conversation record is committed. Empty strings mean "not
/// produced".
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    pub input: String,
    pub route: Route,
    pub sub_routes: Vec<Intent>,
    pub math_result: String,
    pub story: String,
    pub translation: String,
    pub target_language: Option<String>,
    pub default_result: String,
    pub memory_context: String,
    pub final_output: String,
    pub path: Vec<Node>,
}

impl QueryState {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Default::default()
        }
    }

    /// Whether `intent` is one of the pending sub-routes of a multi query.
    pub fn wants(&self, intent: Intent) -> bool {
        self.route == Route::Multi && self.sub_routes.contains(&intent)
    }

    pub fn metadata(&self) -> ConversationMetadata {
        ConversationMetadata {
            has_math: !self.math_result.is_empty(),
            has_story: !self.story.is_empty(),
            has_translation: !self.translation.is_empty(),
            target_language: self.target_language.clone(),
        }
    }
}

/// The result of [`crate::Orchestrator::process`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutcome {
    pub query: String,
    pub route: Route,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_routes: Vec<Intent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub math_result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_result: Option<String>,
    pub memory_context: String,
    pub final_output: String,
    pub path: Vec<Node>,
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

impl From<QueryState> for QueryOutcome {
    fn from(state: QueryState) -> Self {
        Self {
            query: state.input,
            route: state.route,
            sub_routes: state.sub_routes,
            math_result: non_empty(state.math_result),
            story: non_empty(state.story),
            translation: non_empty(state.translation),
            target_language: state.target_language,
            default_result: non_empty(state.default_result),
            memory_context: state.memory_context,
            final_output: state.final_output,
            path: state.path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_blank() {
        let state = QueryState::new("hello");
        assert_eq!(state.input, "hello");
        assert_eq!(state.route, Route::Default);
        assert!(state.sub_routes.is_empty());
        assert!(state.math_result.is_empty());
        assert!(state.target_language.is_none());
        assert!(state.path.is_empty());
    }

    #[test]
    fn wants_only_applies_to_multi() {
        let mut state = QueryState::new("q");
        state.route = Route::Math;
        state.sub_routes = vec![Intent::Write];
        assert!(!state.wants(Intent::Write));

        state.route = Route::Multi;
        assert!(state.wants(Intent::Write));
        assert!(!state.wants(Intent::Translate));
    }

    #[test]
    fn metadata_reflects_populated_fields() {
        let mut state = QueryState::new("q");
        state.math_result = "2 + 2 = 4".into();
        state.translation = "dos más dos".into();
        state.target_language = Some("Spanish".into());

        let metadata = state.metadata();
        assert!(metadata.has_math);
        assert!(!metadata.has_story);
        assert!(metadata.has_translation);
        assert_eq!(metadata.target_language.as_deref(), Some("Spanish"));
    }

    #[test]
    fn outcome_omits_unproduced_results() {
        let mut state = QueryState::new("2 + 2");
        state.route = Route::Math;
        state.math_result = "2 + 2 = 4".into();
        state.final_output = "2 + 2 = 4".into();

        let json = serde_json::to_value(QueryOutcome::from(state)).unwrap();
        assert_eq!(json["route"], "math");
        assert_eq!(json["math_result"], "2 + 2 = 4");
        assert!(json.get("story").is_none());
        assert!(json.get("sub_routes").is_none());
    }
}
