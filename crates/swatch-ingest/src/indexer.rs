//! Index build orchestrator: discover → load → annotate → chunk → embed → upsert.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::chunker::{ChunkerConfig, split_document};
use crate::discovery::discover_files;
use crate::document::{Chunk, SOURCE_KEY};
use crate::error::{IngestError, Result};
use crate::extract::extract_component_info;
use crate::loader::load_documents;
use swatch_llm::provider::LlmProvider;
use swatch_store::{VectorPoint, VectorStore};

const UPSERT_BATCH: usize = 64;

/// How a rebuild treats vectors already present in the namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebuildMode {
    /// Clear the namespace, then insert with fresh ids.
    #[default]
    Replace,
    /// Write stable ids derived from source path and chunk ordinal, so
    /// re-ingestion overwrites rather than duplicates.
    Upsert,
}

/// Indexer configuration.
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    pub collection: String,
    pub namespace: String,
    pub rebuild_mode: RebuildMode,
    pub chunker: ChunkerConfig,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            collection: "swatch_components".into(),
            namespace: "design-system".into(),
            rebuild_mode: RebuildMode::default(),
            chunker: ChunkerConfig::default(),
        }
    }
}

/// Summary of one ingestion run.
#[derive(Debug, Default)]
pub struct IndexReport {
    pub files_found: usize,
    pub documents_loaded: usize,
    pub files_skipped: usize,
    pub chunks_indexed: usize,
    pub duration_ms: u64,
}

/// Orchestrates a full index build over the components root.
pub struct Indexer<P: LlmProvider> {
    store: Arc<dyn VectorStore>,
    provider: Arc<P>,
    config: IndexerConfig,
}

impl<P: LlmProvider> Indexer<P> {
    #[must_use]
    pub fn new(store: Arc<dyn VectorStore>, provider: Arc<P>, config: IndexerConfig) -> Self {
        Self {
            store,
            provider,
            config,
        }
    }

    /// Run a full rebuild of the namespace from the components root.
    ///
    /// Per-file load failures are skipped with warnings; an empty result at
    /// any stage aborts the run with the matching pipeline error.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery comes up empty, every file is
    /// skipped, chunking produces nothing, or an embedding or index
    /// call fails.
    pub async fn rebuild(&self, root: &Path) -> Result<IndexReport> {
        let start = std::time::Instant::now();
        let mut report = IndexReport::default();

        let files = discover_files(root)?;
        report.files_found = files.len();

        let outcome = load_documents(root, &files).await;
        report.files_skipped = outcome.skipped;
        if outcome.documents.is_empty() {
            return Err(IngestError::NoDocumentsLoaded);
        }

        let mut documents = outcome.documents;
        for doc in &mut documents {
            doc.metadata.extend(extract_component_info(&doc.content));
        }
        report.documents_loaded = documents.len();

        let mut chunks: Vec<(Chunk, usize)> = Vec::new();
        for doc in &documents {
            let split = split_document(doc, &self.config.chunker);
            chunks.extend(split.into_iter().enumerate().map(|(i, c)| (c, i)));
        }
        if chunks.is_empty() {
            return Err(IngestError::NoChunksProduced);
        }

        // Probe the embedding dimension so the collection always matches
        // the configured embedding model.
        let probe = self.provider.embed("dimension probe").await?;
        let vector_size = u64::try_from(probe.len())?;
        self.store
            .ensure_collection(&self.config.collection, vector_size)
            .await?;

        if self.config.rebuild_mode == RebuildMode::Replace {
            self.store
                .clear_namespace(&self.config.collection, &self.config.namespace)
                .await?;
        }

        let total = chunks.len();
        tracing::info!(total, namespace = %self.config.namespace, "indexing started");

        let mut batch: Vec<VectorPoint> = Vec::with_capacity(UPSERT_BATCH);
        for (i, (chunk, ordinal)) in chunks.into_iter().enumerate() {
            let vector = self.provider.embed(&chunk.content).await?;
            let id = self.point_id(&chunk, ordinal);
            let payload = chunk.into_payload(&self.config.namespace);
            batch.push(VectorPoint { id, vector, payload });

            if batch.len() == UPSERT_BATCH {
                self.store
                    .upsert(&self.config.collection, std::mem::take(&mut batch))
                    .await?;
            }

            report.chunks_indexed += 1;
            tracing::debug!("embedded chunk {}/{total}", i + 1);
        }
        if !batch.is_empty() {
            self.store.upsert(&self.config.collection, batch).await?;
        }

        report.duration_ms = start.elapsed().as_millis().try_into().unwrap_or(u64::MAX);
        tracing::info!(
            chunks = report.chunks_indexed,
            skipped = report.files_skipped,
            duration_ms = report.duration_ms,
            "indexing finished"
        );
        Ok(report)
    }

    fn point_id(&self, chunk: &Chunk, ordinal: usize) -> String {
        match self.config.rebuild_mode {
            RebuildMode::Replace => uuid::Uuid::new_v4().to_string(),
            RebuildMode::Upsert => {
                let source = chunk.metadata.get(SOURCE_KEY).map_or("", String::as_str);
                let name = format!("{}/{source}#{ordinal}", self.config.namespace);
                uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
            }
        }
    }
}
