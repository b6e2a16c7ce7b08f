//! # Switchyard Core
//!
//! Domain types, traits, and error definitions for the Switchyard intent
//! router. This crate has **no framework dependencies**: it defines the
//! domain model that the other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every collaborator of the routing engine is a trait here:
//! - [`Provider`]: the text-generation backend
//! - [`ContextStore`]: the rolling conversation log used for retrieval
//!
//! Implementations live in `switchyard-providers` and `switchyard-memory`,
//! which keeps the workflow crate testable with mocks.

pub mod error;
pub mod message;
pub mod provider;
pub mod route;
pub mod conversation;
pub mod memory;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use message::{Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use route::{Intent, Route};
pub use conversation::{ConversationMetadata, ConversationRecord, MemoryDocument};
pub use memory::{ContextStore, MemoryStatistics};
