//! Core data models used by the library.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A discovered source document.
///
/// Ephemeral: produced by discovery, consumed immediately by the chunker,
/// never persisted as a whole.
#[derive(Clone, Debug)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
}

/// One chunk as stored in the index.
///
/// Chunks are immutable once created and stored flat; `source` plus
/// `chunk_index` is the only back-reference to the owning document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Globally unique id, generated at ingestion time.
    pub id: String,
    /// The chunk text (always non-empty).
    pub text: String,
    /// Path of the owning document.
    pub source: String,
    /// 0-based position among chunks derived from the same document.
    pub chunk_index: i64,
}

/// A single retrieval hit.
///
/// `distance` is lower-is-better; `None` when the store reports nothing
/// usable rather than a numeric placeholder with false precision.
#[derive(Clone, Debug, Serialize)]
pub struct SearchHit {
    pub text: String,
    /// Owning document path, or `"unknown"` when the payload lacks it.
    pub source: String,
    /// Chunk position, or `-1` when the payload lacks it.
    pub chunk_index: i64,
    pub distance: Option<f32>,
}

/// Counters reported after an ingestion run. Observational only.
#[derive(Clone, Copy, Debug, Default)]
pub struct IngestReport {
    pub files: usize,
    pub chunks: usize,
}
