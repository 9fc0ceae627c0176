//! Error types for the ingestion pipeline.

use std::num::TryFromIntError;
use std::path::PathBuf;

/// Errors that can occur while building the component index.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The configured components root does not exist.
    #[error("components root does not exist: {0}")]
    MissingRoot(PathBuf),

    /// The walk found no files matching the extension allow-list.
    #[error("no .ts or .tsx files found under {0}")]
    NoFilesFound(PathBuf),

    /// Every discovered file was skipped during loading.
    #[error("no documents could be loaded; check that files are readable")]
    NoDocumentsLoaded,

    /// Chunking produced nothing to index.
    #[error("no chunks were produced from the loaded documents")]
    NoChunksProduced,

    /// IO error reading source files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Embedding provider error.
    #[error("LLM error: {0}")]
    Llm(#[from] swatch_llm::LlmError),

    /// Vector index error.
    #[error("vector store error: {0}")]
    Store(#[from] swatch_store::VectorStoreError),

    /// Integer conversion error.
    #[error("integer conversion failed: {0}")]
    IntConversion(#[from] TryFromIntError),
}

/// Result type alias using `IngestError`.
pub type Result<T> = std::result::Result<T, IngestError>;
