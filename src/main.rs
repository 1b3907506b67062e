use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use doc_store::{DocStore, OllamaChat, OllamaEmbedder, SearchHit, StoreConfig};
use llm_service::{LlmConfig, OllamaService};
use tracing_subscriber::EnvFilter;

/// Local notes search: ingest documents into Qdrant and query them via
/// Ollama embeddings.
#[derive(Parser)]
#[command(name = "notes-rag", version, about)]
struct Cli {
    /// Qdrant gRPC endpoint.
    #[arg(long, env = "QDRANT_URL", default_value = "http://localhost:6334", global = true)]
    qdrant_url: String,

    /// Target collection name.
    #[arg(long, env = "QDRANT_COLLECTION", default_value = "notes", global = true)]
    collection: String,

    /// Ollama endpoint.
    #[arg(long, env = "OLLAMA_URL", default_value = "http://localhost:11434", global = true)]
    ollama_url: String,

    /// Embedding model name. Must match between ingestion and search.
    #[arg(long, env = "EMBED_MODEL", default_value = "nomic-embed-text", global = true)]
    embed_model: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rebuild the index from a directory of .txt, .md and .pdf files.
    Ingest {
        /// Directory containing the documents.
        #[arg(long, env = "DATA_DIR", default_value = "data")]
        data_dir: PathBuf,

        /// Maximum chunk size in characters.
        #[arg(long, default_value_t = 800)]
        max_chars: usize,

        /// Characters of overlap between consecutive chunks.
        #[arg(long, default_value_t = 200)]
        overlap: usize,
    },
    /// Run one query and print the most similar chunks.
    Search {
        query: String,

        /// Number of results.
        #[arg(short, long, default_value_t = 5)]
        n_results: u64,
    },
    /// Answer a question from the indexed documents via the chat model.
    Ask {
        question: String,

        /// Number of context chunks to ground the answer on.
        #[arg(short, long, default_value_t = 5)]
        n_context: u64,

        /// Chat model name.
        #[arg(long, env = "CHAT_MODEL", default_value = "llama3.2")]
        chat_model: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file when present.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    tracing::debug!(
        "qdrant={} collection='{}' ollama={} embed_model={}",
        cli.qdrant_url,
        cli.collection,
        cli.ollama_url,
        cli.embed_model
    );

    let mut cfg = StoreConfig::new_default(&cli.qdrant_url, &cli.collection);

    let embed_svc = Arc::new(OllamaService::new(LlmConfig::new(
        &cli.embed_model,
        &cli.ollama_url,
    ))?);
    let embedder = OllamaEmbedder::new(embed_svc);

    match cli.command {
        Command::Ingest {
            data_dir,
            max_chars,
            overlap,
        } => {
            cfg.max_chars = max_chars;
            cfg.overlap = overlap;
            let store = DocStore::new(cfg)?;
            let report = store.ingest_dir(&data_dir, &embedder).await?;
            println!(
                "Indexed {} chunks from {} files into '{}'.",
                report.chunks, report.files, cli.collection
            );
        }
        Command::Search { query, n_results } => {
            let store = DocStore::new(cfg)?;
            let hits = store.search(&query, n_results, &embedder).await?;
            print_hits(&hits);
        }
        Command::Ask {
            question,
            n_context,
            chat_model,
        } => {
            let store = DocStore::new(cfg)?;
            let chat_svc = Arc::new(OllamaService::new(LlmConfig::new(
                &chat_model,
                &cli.ollama_url,
            ))?);
            let chat = OllamaChat::new(chat_svc);
            let (answer, used) = store.answer(&question, n_context, &embedder, &chat).await?;
            println!("{answer}");
            println!();
            println!("({} context chunks used)", used.len());
        }
    }

    Ok(())
}

fn print_hits(hits: &[SearchHit]) {
    for hit in hits {
        println!("{}", "-".repeat(40));
        println!("Source: {} (chunk {})", hit.source, hit.chunk_index);
        match hit.distance {
            Some(d) => println!("Distance: {d:.4}"),
            None => println!("Distance: unknown"),
        }
        let snippet: String = hit.text.chars().take(200).collect();
        println!("{snippet}");
    }
}
