//! Reasoning backend abstraction layer.
//!
//! Provides a trait-based interface for external text-generation services:
//! - OpenAI-compatible (OpenAI API, vLLM, Ollama, etc.)
//! - Mock backend for testing

pub mod mock;
pub mod openai;
pub mod traits;

pub use mock::MockBackend;
pub use openai::OpenAiBackend;
pub use traits::{
    CompletionRequest, CompletionResponse, ModelCapabilities, ReasoningBackend, ReasoningError,
};
