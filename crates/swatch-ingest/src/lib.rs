//! Ingestion pipeline: discover component sources, load them tolerantly,
//! annotate with structural metadata, chunk, embed, and index.

pub mod chunker;
pub mod discovery;
pub mod document;
pub mod error;
pub mod extract;
pub mod indexer;
pub mod loader;

pub use document::{Chunk, SourceDocument};
pub use error::{IngestError, Result};
pub use indexer::{IndexReport, Indexer, IndexerConfig, RebuildMode};
