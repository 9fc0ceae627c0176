use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

#[derive(Debug, thiserror::Error)]
pub enum VectorStoreError {
    #[error("connection error: {0}")]
    Connection(String),
    #[error("collection error: {0}")]
    Collection(String),
    #[error("upsert error: {0}")]
    Upsert(String),
    #[error("search error: {0}")]
    Search(String),
    #[error("delete error: {0}")]
    Delete(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// One embedded chunk ready for the index. The payload carries the chunk
/// content, its metadata map, and the namespace tag.
#[derive(Debug, Clone)]
pub struct VectorPoint {
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct ScoredVectorPoint {
    pub id: String,
    pub score: f32,
    pub payload: HashMap<String, serde_json::Value>,
}

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Payload key every backend uses to partition points by namespace.
pub const NAMESPACE_FIELD: &str = "namespace";

/// Object-safe store abstraction over a cosine-similarity vector index.
///
/// All operations are scoped to a named collection; points within a
/// collection are further partitioned by the `namespace` payload field.
pub trait VectorStore: Send + Sync {
    /// Create the collection with the given dimensionality if absent.
    /// Idempotent.
    fn ensure_collection(
        &self,
        collection: &str,
        vector_size: u64,
    ) -> BoxFuture<'_, Result<(), VectorStoreError>>;

    fn collection_exists(&self, collection: &str) -> BoxFuture<'_, Result<bool, VectorStoreError>>;

    fn upsert(
        &self,
        collection: &str,
        points: Vec<VectorPoint>,
    ) -> BoxFuture<'_, Result<(), VectorStoreError>>;

    /// Top-`limit` nearest neighbors within one namespace.
    fn search(
        &self,
        collection: &str,
        vector: Vec<f32>,
        limit: u64,
        namespace: &str,
    ) -> BoxFuture<'_, Result<Vec<ScoredVectorPoint>, VectorStoreError>>;

    /// Remove every point in the namespace. Used by replace-mode rebuilds.
    fn clear_namespace(
        &self,
        collection: &str,
        namespace: &str,
    ) -> BoxFuture<'_, Result<(), VectorStoreError>>;
}
