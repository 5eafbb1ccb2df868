//! Mock provider for testing.

use super::{CompletionProvider, CompletionRequest, ProviderError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Queue-backed provider: each call pops the next canned outcome and
/// records the request so tests can assert on composed prompts and call
/// counts.
#[derive(Default)]
pub struct MockProvider {
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    calls: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    pub fn returning(text: &str) -> Self {
        let mock = Self::default();
        mock.push_ok(text);
        mock
    }

    pub fn failing(error: ProviderError) -> Self {
        let mock = Self::default();
        mock.replies.lock().unwrap().push_back(Err(error));
        mock
    }

    pub fn push_ok(&self, text: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(text.to_string()));
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ProviderError::NotConfigured(
                    "mock provider has no queued reply".to_string(),
                ))
            })
    }
}
