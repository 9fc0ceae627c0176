//! Pluggable vector index: a namespace-aware store trait with Qdrant and
//! in-memory backends.

pub mod memory;
pub mod qdrant;
pub mod vector_store;

pub use memory::InMemoryVectorStore;
pub use qdrant::QdrantVectorStore;
pub use vector_store::{ScoredVectorPoint, VectorPoint, VectorStore, VectorStoreError};
