//! Retrieval-augmented chat chain with sliding-window conversation memory.
//!
//! Each question is embedded, the nearest chunks are fetched from the
//! store, and the rendered prompt is sent after the system prompt and
//! prior exchanges. Raw questions (not the rendered prompts) go into
//! memory so history stays compact.

use std::collections::VecDeque;
use std::sync::Arc;

use swatch_ingest::Chunk;
use swatch_llm::provider::{LlmProvider, Message, Role};
use swatch_store::{VectorStore, VectorStoreError};

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("LLM error: {0}")]
    Llm(#[from] swatch_llm::LlmError),
    #[error("vector store error: {0}")]
    Store(#[from] VectorStoreError),
}

#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub collection: String,
    pub namespace: String,
    pub top_k: u64,
    pub history_turns: usize,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            collection: "swatch_components".into(),
            namespace: "design-system".into(),
            top_k: 3,
            history_turns: 20,
        }
    }
}

/// One retrieved chunk with its similarity score.
#[derive(Debug, Clone)]
pub struct RetrievedChunk {
    pub chunk: Chunk,
    pub score: f32,
}

#[derive(Debug)]
pub struct ChainResponse {
    pub answer: String,
    /// Chunks used as context, best match first.
    pub sources: Vec<RetrievedChunk>,
}

pub struct ChatChain<P: LlmProvider> {
    provider: Arc<P>,
    store: Arc<dyn VectorStore>,
    config: ChainConfig,
    history: VecDeque<Message>,
}

impl<P: LlmProvider> ChatChain<P> {
    #[must_use]
    pub fn new(provider: Arc<P>, store: Arc<dyn VectorStore>, config: ChainConfig) -> Self {
        Self {
            provider,
            store,
            config,
            history: VecDeque::new(),
        }
    }

    /// Answer one question against the indexed component corpus.
    ///
    /// # Errors
    ///
    /// Returns an error if embedding, retrieval, or the chat call fails.
    /// Failed questions leave conversation memory untouched.
    pub async fn ask(&mut self, question: &str) -> Result<ChainResponse, ChainError> {
        let vector = self.provider.embed(question).await?;
        let hits = self
            .store
            .search(
                &self.config.collection,
                vector,
                self.config.top_k,
                &self.config.namespace,
            )
            .await?;

        let sources: Vec<RetrievedChunk> = hits
            .iter()
            .filter_map(|hit| {
                Chunk::from_payload(&hit.payload).map(|chunk| RetrievedChunk {
                    chunk,
                    score: hit.score,
                })
            })
            .collect();

        let context = sources
            .iter()
            .map(|s| s.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let rendered = crate::prompt::render(&context, question);

        let mut messages: Vec<Message> = Vec::with_capacity(self.history.len() + 2);
        messages.push(Message::new(Role::System, crate::prompt::SYSTEM_PROMPT));
        messages.extend(self.history.iter().cloned());
        messages.push(Message::new(Role::User, rendered));

        let answer = self.provider.chat(&messages).await?;
        tracing::debug!(sources = sources.len(), "chain answered");

        self.remember(question, &answer);
        Ok(ChainResponse { answer, sources })
    }

    fn remember(&mut self, question: &str, answer: &str) {
        self.history.push_back(Message::new(Role::User, question));
        self.history.push_back(Message::new(Role::Assistant, answer));

        let cap = self.config.history_turns.saturating_mul(2);
        while self.history.len() > cap {
            self.history.pop_front();
        }
    }

    /// Forget the conversation so far.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use swatch_llm::mock::MockProvider;
    use swatch_store::{InMemoryVectorStore, VectorPoint};

    const COLLECTION: &str = "swatch_components";
    const NAMESPACE: &str = "design-system";

    fn chunk(content: &str, source: &str) -> Chunk {
        Chunk {
            content: content.into(),
            metadata: BTreeMap::from([("source".to_string(), source.to_string())]),
        }
    }

    async fn seeded_store() -> Arc<InMemoryVectorStore> {
        let store = Arc::new(InMemoryVectorStore::new());
        store.ensure_collection(COLLECTION, 2).await.unwrap();
        store
            .upsert(
                COLLECTION,
                vec![
                    VectorPoint {
                        id: "button".into(),
                        vector: vec![1.0, 0.0],
                        payload: chunk("export const Button = () => null;", "Button.tsx")
                            .into_payload(NAMESPACE),
                    },
                    VectorPoint {
                        id: "card".into(),
                        vector: vec![0.0, 1.0],
                        payload: chunk("export const Card = () => null;", "Card.tsx")
                            .into_payload(NAMESPACE),
                    },
                ],
            )
            .await
            .unwrap();
        store
    }

    fn keyword_embedder(text: &str) -> Vec<f32> {
        let t = text.to_lowercase();
        vec![
            if t.contains("button") { 1.0 } else { 0.0 },
            if t.contains("card") { 1.0 } else { 0.0 },
        ]
    }

    fn chain(provider: MockProvider, store: Arc<InMemoryVectorStore>) -> ChatChain<MockProvider> {
        ChatChain::new(Arc::new(provider), store, ChainConfig::default())
    }

    #[tokio::test]
    async fn retrieves_matching_source() {
        let store = seeded_store().await;
        let provider = MockProvider::with_responses(vec!["Button renders a button.".into()])
            .with_embedder(keyword_embedder);
        let mut chain = chain(provider, store);

        let response = chain.ask("What props does Button accept?").await.unwrap();
        assert_eq!(response.answer, "Button renders a button.");
        assert_eq!(
            response.sources[0].chunk.metadata.get("source").unwrap(),
            "Button.tsx"
        );
    }

    #[tokio::test]
    async fn system_prompt_leads_every_call() {
        let store = seeded_store().await;
        let provider = Arc::new(MockProvider::default().with_embedder(keyword_embedder));
        let mut chain =
            ChatChain::new(provider.clone(), store, ChainConfig::default());

        chain.ask("Tell me about Button").await.unwrap();
        let first = provider.last_messages().unwrap();
        assert_eq!(first[0].role, Role::System);
        assert_eq!(first[0].content, crate::prompt::SYSTEM_PROMPT);
        assert!(first.last().unwrap().content.contains("Tell me about Button"));

        chain.ask("And Card?").await.unwrap();
        let second = provider.last_messages().unwrap();
        // system prompt, two history messages, new user prompt
        assert_eq!(second.len(), 4);
        assert_eq!(second[0].role, Role::System);
        assert_eq!(second[1].content, "Tell me about Button");
    }

    #[tokio::test]
    async fn memory_records_raw_exchanges() {
        let store = seeded_store().await;
        let provider = MockProvider::default().with_embedder(keyword_embedder);
        let mut chain = chain(provider, store);

        chain.ask("Tell me about Button").await.unwrap();
        chain.ask("And Card?").await.unwrap();
        assert_eq!(chain.history_len(), 4);

        chain.reset();
        assert_eq!(chain.history_len(), 0);
    }

    #[tokio::test]
    async fn memory_window_slides() {
        let store = seeded_store().await;
        let provider = MockProvider::default().with_embedder(keyword_embedder);
        let config = ChainConfig {
            history_turns: 1,
            ..ChainConfig::default()
        };
        let mut chain = ChatChain::new(Arc::new(provider), store, config);

        chain.ask("first").await.unwrap();
        chain.ask("second").await.unwrap();
        chain.ask("third").await.unwrap();
        assert_eq!(chain.history_len(), 2);
    }

    #[tokio::test]
    async fn empty_index_still_answers() {
        let store = Arc::new(InMemoryVectorStore::new());
        store.ensure_collection(COLLECTION, 2).await.unwrap();
        let provider = MockProvider::default().with_embedder(keyword_embedder);
        let mut chain = chain(provider, store);

        let response = chain.ask("Anything indexed?").await.unwrap();
        assert!(response.sources.is_empty());
        assert_eq!(response.answer, "mock response");
    }

    #[tokio::test]
    async fn failed_chat_leaves_memory_untouched() {
        let store = seeded_store().await;
        let provider = MockProvider::failing().with_embedder(keyword_embedder);
        let mut chain = chain(provider, store);

        assert!(chain.ask("Button?").await.is_err());
        assert_eq!(chain.history_len(), 0);
    }
}
