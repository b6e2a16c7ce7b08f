//! Query workflow: classify, dispatch to handlers, aggregate, remember.
//!
//! ```text
//! Start ─▶ Router ─┬─▶ Arithmetic ─┬─▶ Narrative ─┬─▶ Translation ─┐
//!                  │               │              │               │
//!                  │               └──────────────┴───────────────┤
//!                  ├─▶ Narrative / Translation (single route)     ├─▶ Final ─▶ End
//!                  └─▶ Fallback ──────────────────────────────────┘
//! ```
//!
//! The [`Orchestrator`] owns one [`QueryState`] per call to
//! [`Orchestrator::process`] and walks the fixed state machine above.

pub mod classifier;
pub mod handlers;
pub mod orchestrator;
pub mod state;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use classifier::{Classification, IntentClassifier};
pub use orchestrator::{Node, Orchestrator};
pub use state::{QueryOutcome, QueryState};
