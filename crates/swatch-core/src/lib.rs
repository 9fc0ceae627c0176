//! Application core: configuration, the prompt template, and the
//! retrieval-augmented chat chain.

pub mod chain;
pub mod config;
pub mod prompt;

pub use chain::{ChainConfig, ChainError, ChainResponse, ChatChain, RetrievedChunk};
pub use config::{Backend, Config};
