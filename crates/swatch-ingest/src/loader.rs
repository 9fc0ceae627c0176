//! Encoding-tolerant document loading.
//!
//! Component sources are expected to be UTF-8, but legacy files in the
//! monorepo are occasionally EUC-KR encoded. The loader tries strict UTF-8
//! first and falls back to exactly one legacy decode; files that survive
//! neither are skipped with a warning rather than aborting the run.

use std::path::{Path, PathBuf};

use crate::document::SourceDocument;

/// Result of a loading pass: the documents plus a count of skipped files.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub documents: Vec<SourceDocument>,
    pub skipped: usize,
}

fn decode(bytes: &[u8]) -> Option<String> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Some(text.to_string());
    }
    let (text, _, had_errors) = encoding_rs::EUC_KR.decode(bytes);
    if had_errors {
        None
    } else {
        Some(text.into_owned())
    }
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

/// Load each discovered file into a [`SourceDocument`].
///
/// Per-file failures (unreadable, undecodable, empty after trimming) are
/// non-fatal: the file is skipped and a warning is logged.
pub async fn load_documents(root: &Path, files: &[PathBuf]) -> LoadOutcome {
    let mut outcome = LoadOutcome::default();

    for path in files {
        let rel = relative_path(root, path);

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(file = %rel, "skipping unreadable file: {e}");
                outcome.skipped += 1;
                continue;
            }
        };

        let Some(content) = decode(&bytes) else {
            tracing::warn!(file = %rel, "skipping file: not valid UTF-8 or EUC-KR");
            outcome.skipped += 1;
            continue;
        };

        if content.trim().is_empty() {
            tracing::warn!(file = %rel, "skipping empty file");
            outcome.skipped += 1;
            continue;
        }

        outcome.documents.push(SourceDocument::new(content, rel));
    }

    tracing::info!(
        loaded = outcome.documents.len(),
        skipped = outcome.skipped,
        "document loading finished"
    );
    outcome
}
