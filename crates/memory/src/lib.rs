//! Context store implementations for Switchyard.

pub mod context;
pub mod in_memory;
pub mod file_backend;

pub use context::{CONTEXT_WINDOW, DEFAULT_RETENTION, RESPONSE_PREVIEW_CHARS};
pub use in_memory::InMemoryStore;
pub use file_backend::JsonFileStore;
