//! Text-generation backends for Switchyard.
//!
//! All providers implement the `switchyard_core::Provider` trait.
//! [`build_provider`] picks the configured backend, and
//! [`TextGenerator`] narrows it to the "prompt in, text out" call the
//! workflow handlers need.

pub mod generator;
pub mod openai_compat;
pub mod router;

pub use generator::TextGenerator;
pub use openai_compat::OpenAiCompatProvider;
pub use router::build_provider;
