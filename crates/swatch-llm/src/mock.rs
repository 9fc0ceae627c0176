//! Test-only mock LLM provider.

use std::sync::{Arc, Mutex};

use crate::provider::{LlmProvider, Message};

type EmbedFn = dyn Fn(&str) -> Vec<f32> + Send + Sync;

#[derive(Clone)]
pub struct MockProvider {
    responses: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<Vec<Vec<Message>>>>,
    pub default_response: String,
    embed_fn: Arc<EmbedFn>,
    pub supports_embeddings: bool,
    pub fail_chat: bool,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            default_response: "mock response".into(),
            embed_fn: Arc::new(|_| vec![0.0; 8]),
            supports_embeddings: true,
            fail_chat: false,
        }
    }
}

impl std::fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProvider")
            .field("default_response", &self.default_response)
            .field("fail_chat", &self.fail_chat)
            .finish_non_exhaustive()
    }
}

impl MockProvider {
    #[must_use]
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_chat: true,
            ..Self::default()
        }
    }

    /// Replace the embedding function, e.g. with a deterministic
    /// content-sensitive one for retrieval tests.
    #[must_use]
    pub fn with_embedder(mut self, f: impl Fn(&str) -> Vec<f32> + Send + Sync + 'static) -> Self {
        self.embed_fn = Arc::new(f);
        self
    }

    /// Messages from the most recent `chat` call, if any.
    #[must_use]
    pub fn last_messages(&self) -> Option<Vec<Message>> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl LlmProvider for MockProvider {
    async fn chat(&self, messages: &[Message]) -> Result<String, crate::LlmError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        if self.fail_chat {
            return Err(crate::LlmError::Other("mock LLM error".into()));
        }
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(self.default_response.clone())
        } else {
            Ok(responses.remove(0))
        }
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, crate::LlmError> {
        if self.supports_embeddings {
            Ok((self.embed_fn)(text))
        } else {
            Err(crate::LlmError::EmbedUnsupported { provider: "mock" })
        }
    }

    fn supports_embeddings(&self) -> bool {
        self.supports_embeddings
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "mock"
    }
}
