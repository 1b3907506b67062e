//! End-to-end ingestion pipeline: discover → chunk → embed → rebuild
//! collection → upsert into Qdrant.
//!
//! Ingestion is always a full rebuild. The existing collection is dropped
//! only once a rebuild actually proceeds: discovery and chunking happen
//! first, so a run that finds nothing leaves any prior index untouched.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use qdrant_client::Payload;
use qdrant_client::qdrant::PointStruct;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::chunker::split_into_chunks;
use crate::config::StoreConfig;
use crate::discovery::find_documents;
use crate::embed::EmbeddingsProvider;
use crate::errors::StoreError;
use crate::qdrant_facade::QdrantFacade;
use crate::record::{ChunkRecord, Document, IngestReport};

/// Rebuilds the index from every supported file under `root`.
///
/// Files are processed strictly one at a time in traversal order; chunks are
/// embedded one at a time and upserted in batches of `cfg.upsert_batch`.
///
/// # Errors
/// - `StoreError::NoDocuments` if no supported files exist under `root`
///   (no index mutation in that case)
/// - loader, embedding, or Qdrant failures otherwise
pub(crate) async fn ingest_dir(
    cfg: &StoreConfig,
    root: &Path,
    provider: &dyn EmbeddingsProvider,
    client: &QdrantFacade,
) -> Result<IngestReport, StoreError> {
    // Materialize the lazy walk so files and chunks can be counted; the
    // first loader failure aborts the run here.
    let docs: Vec<Document> = find_documents(root)?.collect::<Result<_, _>>()?;
    if docs.is_empty() {
        return Err(StoreError::NoDocuments(root.display().to_string()));
    }
    info!("Found {} files under {:?}", docs.len(), root);

    let records = build_chunk_records(&docs, cfg);
    if records.is_empty() {
        return Err(StoreError::Config(
            "documents contained no extractable text".into(),
        ));
    }
    debug!("Built {} chunk records", records.len());

    // Vector dimensionality comes from the provider itself.
    let first = provider.embed(&records[0].text).await?;
    let dim = first.len();
    debug!("Vector size determined: {}", dim);

    client.reset_collection(dim).await?;

    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
        )
        .unwrap()
        .progress_chars("##-"),
    );

    let batch_size = cfg.upsert_batch.max(1);
    for batch in records.chunks(batch_size) {
        let mut points = Vec::with_capacity(batch.len());
        for rec in batch {
            let vector = provider.embed(&rec.text).await?;
            if vector.len() != dim {
                return Err(StoreError::VectorSizeMismatch {
                    got: vector.len(),
                    want: dim,
                });
            }
            points.push(point_from_record(rec, vector)?);
            pb.inc(1);
        }
        client.upsert_points(points).await?;
    }
    pb.finish_and_clear();

    info!(
        "Ingested {} chunks from {} files into '{}'",
        records.len(),
        docs.len(),
        cfg.collection
    );
    Ok(IngestReport {
        files: docs.len(),
        chunks: records.len(),
    })
}

/// Splits every document and assigns ids and positions.
///
/// Each chunk gets a fresh v4 uuid and a 0-based index contiguous within its
/// document. Empty or whitespace-only documents contribute nothing.
pub(crate) fn build_chunk_records(docs: &[Document], cfg: &StoreConfig) -> Vec<ChunkRecord> {
    let mut records = Vec::new();
    for doc in docs {
        let source = doc.path.display().to_string();
        let chunks = split_into_chunks(&doc.text, cfg.max_chars, cfg.overlap);
        for (chunk_index, text) in chunks.into_iter().enumerate() {
            records.push(ChunkRecord {
                id: Uuid::new_v4().to_string(),
                text,
                source: source.clone(),
                chunk_index: chunk_index as i64,
            });
        }
    }
    records
}

/// Builds one Qdrant point: chunk id, vector, and the compact payload.
fn point_from_record(rec: &ChunkRecord, vector: Vec<f32>) -> Result<PointStruct, StoreError> {
    let payload: Payload = json!({
        "text": rec.text,
        "source": rec.source,
        "chunk_index": rec.chunk_index,
    })
    .try_into()
    .map_err(|e| StoreError::Qdrant(format!("payload convert: {e}")))?;

    Ok(PointStruct::new(rec.id.clone(), vector, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;

    fn doc(path: &str, text: &str) -> Document {
        Document {
            path: PathBuf::from(path),
            text: text.to_string(),
        }
    }

    fn cfg_with(max_chars: usize, overlap: usize) -> StoreConfig {
        let mut cfg = StoreConfig::new_default("http://localhost:6334", "notes");
        cfg.max_chars = max_chars;
        cfg.overlap = overlap;
        cfg
    }

    #[test]
    fn chunk_indices_are_contiguous_per_document() {
        let text: String = ('a'..='z').cycle().take(100).collect();
        let docs = vec![doc("a.txt", &text), doc("b.txt", &text)];
        let records = build_chunk_records(&docs, &cfg_with(30, 5));

        for source in ["a.txt", "b.txt"] {
            let indices: Vec<i64> = records
                .iter()
                .filter(|r| r.source == source)
                .map(|r| r.chunk_index)
                .collect();
            let expected: Vec<i64> = (0..indices.len() as i64).collect();
            assert_eq!(indices, expected);
        }
    }

    #[test]
    fn chunk_ids_are_pairwise_distinct() {
        let text: String = ('a'..='z').cycle().take(500).collect();
        let docs = vec![doc("a.txt", &text), doc("b.txt", &text)];
        let records = build_chunk_records(&docs, &cfg_with(40, 10));
        let ids: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn whitespace_documents_contribute_no_chunks() {
        let docs = vec![doc("empty.txt", "   \n\t "), doc("real.txt", "content")];
        let records = build_chunk_records(&docs, &cfg_with(800, 200));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source, "real.txt");
        assert_eq!(records[0].chunk_index, 0);
    }

    #[test]
    fn every_record_has_non_empty_text() {
        let docs = vec![doc("a.md", "  some markdown body  ")];
        let records = build_chunk_records(&docs, &cfg_with(10, 2));
        assert!(!records.is_empty());
        for r in &records {
            assert!(!r.text.is_empty());
        }
    }
}
