//! Local-document ingestion and retrieval over Qdrant.
//!
//! This crate provides a clean API to:
//! - Discover `.txt`, `.md` and `.pdf` files under a root, split them into
//!   overlapping character chunks, and rebuild a Qdrant collection from them
//! - Retrieve the top-K most similar chunks for a textual query
//! - Optionally compose a context-grounded answer via a chat model
//!
//! The design is flat (no deep nesting) and splits responsibilities into
//! focused modules. Embedding and generation are delegated to providers; see
//! [`EmbeddingsProvider`] and [`ChatProvider`].

mod answer;
mod chunker;
mod config;
mod discovery;
mod embed;
mod errors;
mod ingest;
mod loader;
mod qdrant_facade;
mod record;
mod retrieve;

pub use answer::{UNKNOWN_ANSWER, build_prompt};
pub use chunker::split_into_chunks;
pub use config::{DistanceKind, StoreConfig};
pub use embed::{ChatProvider, EmbeddingsProvider, OllamaChat, OllamaEmbedder};
pub use errors::StoreError;
pub use loader::DocumentKind;
pub use record::{ChunkRecord, Document, IngestReport, SearchHit};

use std::path::Path;
use tracing::trace;

/// High-level facade that wires configuration and the Qdrant client.
///
/// This is the single entry point recommended for application code. The same
/// config drives ingestion and retrieval, so the two flows can never disagree
/// on the collection they talk to.
pub struct DocStore {
    cfg: StoreConfig,
    client: qdrant_facade::QdrantFacade,
}

impl DocStore {
    /// Constructs a new store from the given configuration.
    ///
    /// # Errors
    /// Returns `StoreError::Config` if validation fails and
    /// `StoreError::Qdrant` if the client cannot be initialized.
    pub fn new(cfg: StoreConfig) -> Result<Self, StoreError> {
        trace!("DocStore::new collection={}", cfg.collection);
        cfg.validate()?;
        let client = qdrant_facade::QdrantFacade::new(&cfg)?;
        Ok(Self { cfg, client })
    }

    /// Rebuilds the index from every supported file under `root`.
    ///
    /// Any pre-existing collection content is discarded, but only once the
    /// rebuild actually proceeds: a run that finds no documents fails with
    /// `StoreError::NoDocuments` and leaves the index untouched.
    ///
    /// # Errors
    /// Returns discovery, loader, embedding, or Qdrant failures.
    pub async fn ingest_dir(
        &self,
        root: impl AsRef<Path>,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<IngestReport, StoreError> {
        trace!("DocStore::ingest_dir root={:?}", root.as_ref());
        ingest::ingest_dir(&self.cfg, root.as_ref(), provider, &self.client).await
    }

    /// Returns up to `n_results` chunks most similar to `query`, best first.
    ///
    /// # Errors
    /// Returns `StoreError::CollectionMissing` if ingestion has never run,
    /// and embedding or Qdrant failures otherwise.
    pub async fn search(
        &self,
        query: &str,
        n_results: u64,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<Vec<SearchHit>, StoreError> {
        trace!("DocStore::search n_results={}", n_results);
        retrieve::search(&self.cfg, &self.client, query, n_results, provider).await
    }

    /// Answers `question` from the indexed documents.
    ///
    /// Retrieves `n_context_chunks` chunks, assembles a context-grounded
    /// prompt, and delegates generation to `chat`. Returns the answer text
    /// together with the chunks used.
    ///
    /// # Errors
    /// Returns retrieval errors or chat model failures.
    pub async fn answer(
        &self,
        question: &str,
        n_context_chunks: u64,
        embedder: &dyn EmbeddingsProvider,
        chat: &dyn ChatProvider,
    ) -> Result<(String, Vec<SearchHit>), StoreError> {
        trace!("DocStore::answer n_context_chunks={}", n_context_chunks);
        answer::answer_question(
            &self.cfg,
            &self.client,
            question,
            n_context_chunks,
            embedder,
            chat,
        )
        .await
    }
}
