//! Roomie Agent - reasoning-service client.
//!
//! Client infrastructure for the external text-generation capability used
//! by the compatibility engine:
//! - Trait-based reasoning backends (`ReasoningBackend`)
//! - OpenAI-compatible HTTP client with JSON-mode output
//! - Mock backend for deterministic tests
//!
//! Backends are single-shot: one `complete` call issues exactly one request
//! and returns one result or one failure. Callers own any fallback policy.

pub mod backend;

// Re-export main types for convenience
pub use backend::traits::{
    CompletionRequest, CompletionResponse, FinishReason, Message, MessageRole, ModelCapabilities,
    ReasoningBackend, ReasoningError, Usage,
};
pub use backend::{MockBackend, OpenAiBackend};
