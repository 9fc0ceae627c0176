//! Document and chunk types shared across the pipeline.

use std::collections::{BTreeMap, HashMap};

/// Metadata key holding the originating file path, relative to the root.
pub const SOURCE_KEY: &str = "source";

/// Payload key holding the chunk text in the vector index.
pub const CONTENT_FIELD: &str = "content";

/// One successfully loaded component source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub content: String,
    pub metadata: BTreeMap<String, String>,
}

impl SourceDocument {
    #[must_use]
    pub fn new(content: String, source: String) -> Self {
        Self {
            content,
            metadata: BTreeMap::from([(SOURCE_KEY.to_string(), source)]),
        }
    }
}

/// A bounded slice of a source document, the unit of embedding and retrieval.
/// Metadata is inherited from the parent document unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub content: String,
    pub metadata: BTreeMap<String, String>,
}

impl Chunk {
    /// Flatten the chunk into an index payload: the content, the namespace
    /// tag, and every metadata entry as a top-level string field.
    #[must_use]
    pub fn into_payload(self, namespace: &str) -> HashMap<String, serde_json::Value> {
        let mut payload: HashMap<String, serde_json::Value> = self
            .metadata
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect();
        payload.insert(
            CONTENT_FIELD.to_string(),
            serde_json::Value::String(self.content),
        );
        payload.insert(
            swatch_store::vector_store::NAMESPACE_FIELD.to_string(),
            serde_json::Value::String(namespace.to_string()),
        );
        payload
    }

    /// Rebuild a chunk from an index payload. Returns `None` when the
    /// payload has no content field.
    #[must_use]
    pub fn from_payload(payload: &HashMap<String, serde_json::Value>) -> Option<Self> {
        let content = payload.get(CONTENT_FIELD)?.as_str()?.to_string();
        let metadata = payload
            .iter()
            .filter(|(k, _)| {
                k.as_str() != CONTENT_FIELD
                    && k.as_str() != swatch_store::vector_store::NAMESPACE_FIELD
            })
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect();
        Some(Self { content, metadata })
    }
}
