//! Mock reasoning backend for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use super::traits::*;

/// Mock backend for testing.
///
/// Supports a fixed response, a queue of scripted responses, and failure
/// injection, plus a call counter so tests can assert cache-hit behavior.
pub struct MockBackend {
    model_id: String,
    available: AtomicBool,
    fail_all: AtomicBool,
    capabilities: ModelCapabilities,
    response_content: String,
    scripted: Mutex<VecDeque<String>>,
    call_count: AtomicU32,
}

impl MockBackend {
    /// Create a new mock backend.
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            available: AtomicBool::new(true),
            fail_all: AtomicBool::new(false),
            capabilities: ModelCapabilities {
                supports_json_mode: true,
                ..Default::default()
            },
            response_content: "{}".to_string(),
            scripted: Mutex::new(VecDeque::new()),
            call_count: AtomicU32::new(0),
        }
    }

    /// Set the fixed response content.
    pub fn with_response(mut self, content: impl Into<String>) -> Self {
        self.response_content = content.into();
        self
    }

    /// Queue a scripted response, consumed in order before the fixed one.
    pub fn push_response(&self, content: impl Into<String>) {
        self.scripted
            .lock()
            .expect("scripted queue poisoned")
            .push_back(content.into());
    }

    /// Make every `complete` call fail with a request error.
    pub fn with_failure(self) -> Self {
        self.set_failing(true);
        self
    }

    /// Toggle failure injection at runtime.
    pub fn set_failing(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Set availability.
    pub fn with_available(self, available: bool) -> Self {
        self.available.store(available, Ordering::SeqCst);
        self
    }

    /// Get the number of times `complete` was called.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count.
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new("mock-model")
    }
}

#[async_trait]
impl ReasoningBackend for MockBackend {
    fn id(&self) -> &str {
        &self.model_id
    }

    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ReasoningError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if !self.available.load(Ordering::SeqCst) {
            return Err(ReasoningError::Unavailable(
                "Mock backend disabled".to_string(),
            ));
        }

        if self.fail_all.load(Ordering::SeqCst) {
            return Err(ReasoningError::RequestFailed(
                "Mock backend failure injected".to_string(),
            ));
        }

        let content = self
            .scripted
            .lock()
            .expect("scripted queue poisoned")
            .pop_front()
            .unwrap_or_else(|| self.response_content.clone());

        // Rough token estimate, 4 chars per token
        let prompt_tokens: u32 = request
            .messages
            .iter()
            .map(|m| m.content.len() as u32 / 4)
            .sum();
        let completion_tokens = content.len() as u32 / 4;

        Ok(CompletionResponse {
            content,
            finish_reason: FinishReason::Stop,
            usage: Usage {
                prompt_tokens,
                completion_tokens,
            },
        })
    }

    fn capabilities(&self) -> &ModelCapabilities {
        &self.capabilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend() {
        let backend = MockBackend::new("test-model").with_response("{\"ok\": true}");

        assert!(backend.is_available().await);
        assert_eq!(backend.call_count(), 0);

        let response = backend.complete(CompletionRequest::user("hi")).await.unwrap();

        assert_eq!(response.content, "{\"ok\": true}");
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_scripted_responses_consumed_in_order() {
        let backend = MockBackend::default().with_response("fallback");
        backend.push_response("first");
        backend.push_response("second");

        let r1 = backend.complete(CompletionRequest::user("a")).await.unwrap();
        let r2 = backend.complete(CompletionRequest::user("b")).await.unwrap();
        let r3 = backend.complete(CompletionRequest::user("c")).await.unwrap();

        assert_eq!(r1.content, "first");
        assert_eq!(r2.content, "second");
        assert_eq!(r3.content, "fallback");
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let backend = MockBackend::default().with_failure();

        let result = backend.complete(CompletionRequest::user("hi")).await;
        assert!(matches!(result, Err(ReasoningError::RequestFailed(_))));
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_unavailable() {
        let backend = MockBackend::new("test-model").with_available(false);

        assert!(!backend.is_available().await);

        let result = backend.complete(CompletionRequest::user("hi")).await;
        assert!(matches!(result, Err(ReasoningError::Unavailable(_))));
    }
}
