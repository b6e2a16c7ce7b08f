//! Intent handlers.
//!
//! Each handler reads the [`QueryState`], fills exactly one result field,
//! and never fails: backend and calculation errors become error text in
//! that same field.

pub mod arithmetic;
pub mod fallback;
pub mod narrative;
pub mod translation;

use async_trait::async_trait;
use switchyard_providers::TextGenerator;

use crate::state::QueryState;

pub use arithmetic::ArithmeticHandler;
pub use fallback::FallbackHandler;
pub use narrative::NarrativeHandler;
pub use translation::TranslationHandler;

#[async_trait]
pub trait Handler: Send + Sync {
    fn name(&self) -> &'static str;

    async fn handle(&self, state: &mut QueryState, generator: &TextGenerator);
}
