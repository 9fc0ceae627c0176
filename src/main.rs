use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use swatch_core::chain::{ChainConfig, ChainResponse, ChatChain};
use swatch_core::config::{Backend, Config};
use swatch_ingest::chunker::ChunkerConfig;
use swatch_ingest::{IndexReport, Indexer, IndexerConfig};
use swatch_llm::openai::OpenAiProvider;
use swatch_store::{InMemoryVectorStore, QdrantVectorStore, VectorStore};

#[derive(Parser)]
#[command(name = "swatch", version, about = "Chat assistant for design-system component code")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, default_value = "swatch.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rebuild the component index and exit.
    Index,
    /// Rebuild the component index, then start an interactive session.
    Chat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    config.validate()?;

    let api_key = std::env::var(&config.llm.api_key_env)
        .with_context(|| format!("{} environment variable is not set", config.llm.api_key_env))?;
    let provider = Arc::new(OpenAiProvider::new(
        api_key,
        config.llm.base_url.clone(),
        config.llm.model.clone(),
        config.llm.max_tokens,
        config.llm.temperature,
        Some(config.llm.embedding_model.clone()),
    ));

    let store = create_store(&config)?;
    let indexer = Indexer::new(store.clone(), provider.clone(), indexer_config(&config));

    match cli.command {
        Command::Index => {
            let report = indexer.rebuild(&config.components.root).await?;
            print_report(&report);
            Ok(())
        }
        Command::Chat => {
            let report = indexer.rebuild(&config.components.root).await?;
            print_report(&report);
            run_chat(&config, provider, store, &indexer).await
        }
    }
}

fn init_subscriber() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn create_store(config: &Config) -> anyhow::Result<Arc<dyn VectorStore>> {
    match config.index.backend {
        Backend::Qdrant => {
            let store = QdrantVectorStore::new(&config.index.qdrant_url)
                .context("failed to connect to Qdrant")?;
            Ok(Arc::new(store))
        }
        Backend::Memory => Ok(Arc::new(InMemoryVectorStore::new())),
    }
}

fn indexer_config(config: &Config) -> IndexerConfig {
    IndexerConfig {
        collection: config.index.collection.clone(),
        namespace: config.index.namespace.clone(),
        rebuild_mode: config.index.rebuild_mode,
        chunker: ChunkerConfig {
            max_size: config.index.max_chunk_size,
            overlap: config.index.chunk_overlap,
        },
    }
}

fn chain_config(config: &Config) -> ChainConfig {
    ChainConfig {
        collection: config.index.collection.clone(),
        namespace: config.index.namespace.clone(),
        top_k: config.chat.top_k,
        history_turns: config.chat.history_turns,
    }
}

async fn run_chat(
    config: &Config,
    provider: Arc<OpenAiProvider>,
    store: Arc<dyn VectorStore>,
    indexer: &Indexer<OpenAiProvider>,
) -> anyhow::Result<()> {
    let mut chain = ChatChain::new(provider, store, chain_config(config));

    println!("swatch v{}", env!("CARGO_PKG_VERSION"));
    println!("Ask about design-system components. Commands: /reload, /reset, /quit");

    loop {
        let Some(line) = read_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "/quit" | "/exit" => break,
            "/reset" => {
                chain.reset();
                println!("conversation cleared");
            }
            "/reload" => match indexer.rebuild(&config.components.root).await {
                Ok(report) => print_report(&report),
                Err(e) => eprintln!("reload failed: {e:#}"),
            },
            question => match chain.ask(question).await {
                Ok(response) => print_response(&response),
                Err(e) => eprintln!("error: {e}"),
            },
        }
    }

    println!("bye");
    Ok(())
}

async fn read_line() -> anyhow::Result<Option<String>> {
    tokio::task::spawn_blocking(|| {
        print!("you> ");
        std::io::stdout().flush()?;
        let mut buf = String::new();
        let n = std::io::stdin().read_line(&mut buf)?;
        anyhow::Ok(if n == 0 { None } else { Some(buf) })
    })
    .await?
}

fn print_report(report: &IndexReport) {
    println!(
        "indexed {} chunk(s) from {} of {} file(s) ({} skipped) in {}ms",
        report.chunks_indexed,
        report.documents_loaded,
        report.files_found,
        report.files_skipped,
        report.duration_ms
    );
}

fn print_response(response: &ChainResponse) {
    println!("\n{}\n", response.answer);
    if response.sources.is_empty() {
        return;
    }
    println!("sources:");
    for source in &response.sources {
        let path = source
            .chunk
            .metadata
            .get("source")
            .map_or("<unknown>", String::as_str);
        println!("  {path} (score {:.3})", source.score);
        if let Some(props) = source.chunk.metadata.get("props_interface") {
            println!("    {props}");
        }
    }
    println!();
}
