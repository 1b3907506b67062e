//! Runtime and collection configuration.

use crate::errors::StoreError;

/// Distance function used for the vector space.
#[derive(Clone, Copy, Debug)]
pub enum DistanceKind {
    /// Cosine distance (recommended for most embeddings).
    Cosine,
    /// Dot product (useful for normalized vectors).
    Dot,
    /// Euclidean distance (L2).
    Euclid,
}

/// Configuration shared by ingestion and retrieval.
///
/// Both operations receive the same explicit struct, so the index location and
/// collection name are never coupled through hidden process-wide state. The
/// chunking parameters live here because chunk boundaries must match between
/// ingestion-time splitting and any future re-chunking expectations.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Qdrant gRPC endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    /// Distance function (Cosine by default).
    pub distance: DistanceKind,
    /// Upsert batch size (typical range: 128..512).
    pub upsert_batch: usize,
    /// Maximum chunk size in characters.
    pub max_chars: usize,
    /// Characters shared between consecutive chunks.
    pub overlap: usize,
}

impl StoreConfig {
    /// Creates a sane default config for a given collection name and Qdrant endpoint.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: collection.into(),
            distance: DistanceKind::Cosine,
            upsert_batch: 256,
            max_chars: 800,
            overlap: 200,
        }
    }

    /// Validates config values.
    ///
    /// `overlap >= max_chars` is rejected here rather than in the splitter:
    /// the splitter terminates on any parameters, but such a window config
    /// degenerates into near-zero forward progress.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(StoreError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(StoreError::Config("collection is empty".into()));
        }
        if self.upsert_batch == 0 {
            return Err(StoreError::Config("upsert_batch must be > 0".into()));
        }
        if self.max_chars == 0 {
            return Err(StoreError::Config("max_chars must be > 0".into()));
        }
        if self.overlap >= self.max_chars {
            return Err(StoreError::Config(format!(
                "overlap ({}) must be smaller than max_chars ({})",
                self.overlap, self.max_chars
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = StoreConfig::new_default("http://localhost:6334", "notes");
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.max_chars, 800);
        assert_eq!(cfg.overlap, 200);
    }

    #[test]
    fn rejects_overlap_not_smaller_than_window() {
        let mut cfg = StoreConfig::new_default("http://localhost:6334", "notes");
        cfg.max_chars = 100;
        cfg.overlap = 100;
        assert!(matches!(cfg.validate(), Err(StoreError::Config(_))));
    }

    #[test]
    fn rejects_empty_collection() {
        let cfg = StoreConfig::new_default("http://localhost:6334", "  ");
        assert!(matches!(cfg.validate(), Err(StoreError::Config(_))));
    }
}
