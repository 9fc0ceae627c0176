use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use swatch_ingest::RebuildMode;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub components: ComponentsConfig,
    pub llm: LlmConfig,
    pub index: IndexConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ComponentsConfig {
    /// Root directory scanned for `.ts`/`.tsx` component sources.
    pub root: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub embedding_model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Environment variable holding the API key. The key itself never
    /// appears in the config file.
    pub api_key_env: String,
}

/// Which vector index implementation backs the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Qdrant,
    Memory,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub backend: Backend,
    pub qdrant_url: String,
    pub collection: String,
    pub namespace: String,
    pub rebuild_mode: RebuildMode,
    pub max_chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Chunks retrieved per question.
    pub top_k: u64,
    /// Question/answer exchanges kept in conversation memory.
    pub history_turns: usize,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./packages/ui/src"),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            embedding_model: "text-embedding-3-large".into(),
            max_tokens: 1024,
            temperature: 0.2,
            api_key_env: "OPENAI_API_KEY".into(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Qdrant,
            qdrant_url: "http://localhost:6334".into(),
            collection: "swatch_components".into(),
            namespace: "design-system".into(),
            rebuild_mode: RebuildMode::default(),
            max_chunk_size: 2000,
            chunk_overlap: 200,
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            history_turns: 20,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            components: ComponentsConfig::default(),
            llm: LlmConfig::default(),
            index: IndexConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist; missing
    /// sections and fields also fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("SWATCH_COMPONENTS_ROOT") {
            self.components.root = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("SWATCH_LLM_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Ok(v) = std::env::var("SWATCH_LLM_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("SWATCH_LLM_EMBEDDING_MODEL") {
            self.llm.embedding_model = v;
        }
        if let Ok(v) = std::env::var("SWATCH_INDEX_BACKEND") {
            match v.as_str() {
                "qdrant" => self.index.backend = Backend::Qdrant,
                "memory" => self.index.backend = Backend::Memory,
                other => tracing::warn!(backend = %other, "unknown SWATCH_INDEX_BACKEND, keeping configured value"),
            }
        }
        if let Ok(v) = std::env::var("SWATCH_QDRANT_URL") {
            self.index.qdrant_url = v;
        }
        if let Ok(v) = std::env::var("SWATCH_INDEX_NAMESPACE") {
            self.index.namespace = v;
        }
    }

    /// Reject configurations that cannot produce a working pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending field.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.components.root.exists(),
            "components.root does not exist: {}",
            self.components.root.display()
        );
        anyhow::ensure!(
            self.index.max_chunk_size > 0,
            "index.max_chunk_size must be at least 1"
        );
        anyhow::ensure!(
            self.index.chunk_overlap < self.index.max_chunk_size,
            "index.chunk_overlap must be smaller than index.max_chunk_size"
        );
        anyhow::ensure!(self.chat.top_k > 0, "chat.top_k must be at least 1");
        anyhow::ensure!(
            !self.llm.api_key_env.is_empty(),
            "llm.api_key_env must not be empty"
        );
        Ok(())
    }
}
