//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for doc-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O or filesystem errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// PDF parsing failures.
    #[error("pdf error: {0}")]
    Pdf(String),

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The data root contained no supported documents.
    #[error("no .txt, .md or .pdf files found under '{0}'")]
    NoDocuments(String),

    /// Query before any ingestion has created the collection.
    #[error("collection '{0}' does not exist; run ingestion first")]
    CollectionMissing(String),

    /// Mismatch in vector dimensionality across chunks.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Qdrant client errors (wrapped).
    #[error("qdrant error: {0}")]
    Qdrant(String),

    /// Embedding or chat model failures.
    #[error("llm error: {0}")]
    Llm(#[from] llm_service::LlmError),
}
