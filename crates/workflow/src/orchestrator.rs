//! The query workflow state machine.
//!
//! Transitions are plain functions of the [`QueryState`]; the
//! [`Orchestrator`] only runs the node it lands on. The topology is fixed
//! and every handler runs at most once per query:
//!
//! - `Start → Router` always.
//! - `Router →` the handler for the route (for `multi`, the first
//!   sub-route in priority order; `default` goes to `Fallback`).
//! - `Arithmetic →` `Narrative` or `Translation` while a multi query still
//!   wants them, else `Final`.
//! - `Narrative →` `Translation` while a multi query still wants it, else
//!   `Final`.
//! - `Translation`, `Fallback → Final → End`.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use switchyard_config::AppConfig;
use switchyard_core::error::ClassifierError;
use switchyard_core::memory::ContextStore;
use switchyard_core::route::{Intent, Route};
use switchyard_providers::TextGenerator;
use tracing::{debug, info};

use crate::classifier::IntentClassifier;
use crate::handlers::{
    ArithmeticHandler, FallbackHandler, Handler, NarrativeHandler, TranslationHandler,
};
use crate::state::{QueryOutcome, QueryState};

/// A state of the query workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Start,
    Router,
    Arithmetic,
    Narrative,
    Translation,
    Fallback,
    Final,
    End,
}

impl Node {
    pub fn as_str(&self) -> &'static str {
        match self {
            Node::Start => "start",
            Node::Router => "router",
            Node::Arithmetic => "arithmetic",
            Node::Narrative => "narrative",
            Node::Translation => "translation",
            Node::Fallback => "fallback",
            Node::Final => "final",
            Node::End => "end",
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn handler_node(intent: Intent) -> Node {
    match intent {
        Intent::Math => Node::Arithmetic,
        Intent::Write => Node::Narrative,
        Intent::Translate => Node::Translation,
    }
}

/// Where the router sends a classified query.
pub fn after_router(route: Route, sub_routes: &[Intent]) -> Node {
    match route {
        Route::Math => Node::Arithmetic,
        Route::Write => Node::Narrative,
        Route::Translate => Node::Translation,
        Route::Multi => Intent::ALL
            .iter()
            .find(|intent| sub_routes.contains(*intent))
            .map_or(Node::Fallback, |intent| handler_node(*intent)),
        Route::Default => Node::Fallback,
    }
}

/// Where to go once `node` has run.
pub fn after_handler(node: Node, state: &QueryState) -> Node {
    let wants_story = state.wants(Intent::Write) && state.story.is_empty();
    let wants_translation = state.wants(Intent::Translate) && state.translation.is_empty();

    match node {
        Node::Arithmetic if wants_story => Node::Narrative,
        Node::Arithmetic | Node::Narrative if wants_translation => Node::Translation,
        _ => Node::Final,
    }
}

/// Combine handler results into the final answer.
pub fn aggregate(state: &QueryState) -> String {
    let language = state.target_language.as_deref().unwrap_or("Unknown");

    match state.route {
        Route::Multi => {
            let mut parts = Vec::new();
            if state.sub_routes.contains(&Intent::Math) && !state.math_result.is_empty() {
                parts.push(format!("MATH CALCULATION:\n{}", state.math_result));
            }
            if state.sub_routes.contains(&Intent::Write) && !state.story.is_empty() {
                parts.push(format!("CREATIVE STORY:\n{}", state.story));
            }
            if state.sub_routes.contains(&Intent::Translate) && !state.translation.is_empty() {
                parts.push(format!("TRANSLATION ({language}):\n{}", state.translation));
            }
            parts.join("\n\n")
        }
        Route::Math => or_placeholder(&state.math_result, "No math result available"),
        Route::Write => or_placeholder(&state.story, "No story available"),
        Route::Translate => format!(
            "Translation to {language}:\n{}",
            or_placeholder(&state.translation, "No translation available")
        ),
        Route::Default => or_placeholder(&state.default_result, "No response available"),
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// Runs queries through the workflow and records them in the store.
pub struct Orchestrator {
    classifier: IntentClassifier,
    generator: TextGenerator,
    store: Arc<dyn ContextStore>,
    arithmetic: ArithmeticHandler,
    narrative: NarrativeHandler,
    translation: TranslationHandler,
    fallback: FallbackHandler,
}

impl Orchestrator {
    pub fn new(
        generator: TextGenerator,
        store: Arc<dyn ContextStore>,
        classifier: IntentClassifier,
    ) -> Result<Self, ClassifierError> {
        Ok(Self {
            classifier,
            generator,
            store,
            arithmetic: ArithmeticHandler::new()?,
            narrative: NarrativeHandler,
            translation: TranslationHandler::new()?,
            fallback: FallbackHandler,
        })
    }

    /// Build with the classifier patterns from `config.routing`.
    pub fn from_config(
        config: &AppConfig,
        generator: TextGenerator,
        store: Arc<dyn ContextStore>,
    ) -> Result<Self, ClassifierError> {
        Self::new(generator, store, IntentClassifier::from_config(&config.routing)?)
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn store(&self) -> &Arc<dyn ContextStore> {
        &self.store
    }

    /// Run one query to completion.
    ///
    /// Never fails: handler errors surface as text in the outcome, and
    /// storage errors are logged by the store.
    pub async fn process(&self, query: &str) -> QueryOutcome {
        let mut state = QueryState::new(query);
        let mut node = Node::Start;

        loop {
            state.path.push(node);
            node = match node {
                Node::Start => Node::Router,
                Node::Router => {
                    self.route(&mut state).await;
                    after_router(state.route, &state.sub_routes)
                }
                Node::Final => {
                    self.finish(&mut state).await;
                    Node::End
                }
                Node::End => break,
                other => {
                    if let Some(handler) = self.handler(other) {
                        debug!(handler = handler.name(), "Dispatching");
                        handler.handle(&mut state, &self.generator).await;
                    }
                    after_handler(other, &state)
                }
            };
        }

        debug!(path = ?state.path, "Workflow finished");
        state.into()
    }

    fn handler(&self, node: Node) -> Option<&dyn Handler> {
        match node {
            Node::Arithmetic => Some(&self.arithmetic),
            Node::Narrative => Some(&self.narrative),
            Node::Translation => Some(&self.translation),
            Node::Fallback => Some(&self.fallback),
            _ => None,
        }
    }

    async fn route(&self, state: &mut QueryState) {
        info!(query = %state.input, "Router processing");

        let classification = self.classifier.classify(&state.input);
        state.route = classification.route;
        state.sub_routes = classification.sub_routes;
        state.memory_context = self.store.get_context(&state.input).await;

        debug!(
            context_chars = state.memory_context.chars().count(),
            sub_routes = ?state.sub_routes,
            "Context retrieved"
        );
        info!(route = %state.route, "Router detected route");
    }

    async fn finish(&self, state: &mut QueryState) {
        info!(route = %state.route, "Final node processing route");

        state.final_output = aggregate(state);
        self.store
            .add_conversation(
                &state.input,
                &state.final_output,
                state.route.as_str(),
                state.metadata(),
            )
            .await;

        info!(chars = state.final_output.chars().count(), "Final output generated");
    }
}
