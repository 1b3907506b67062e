//! Retrieval: embed the query, search Qdrant, normalize hits.

use crate::config::{DistanceKind, StoreConfig};
use crate::embed::EmbeddingsProvider;
use crate::errors::StoreError;
use crate::qdrant_facade::QdrantFacade;
use crate::record::SearchHit;

use tracing::{debug, trace};

/// Embeds `query` and returns up to `n_results` most similar chunks,
/// best match first.
///
/// # Errors
/// - `StoreError::CollectionMissing` if ingestion has never created the
///   collection (never an empty success)
/// - embedding or Qdrant failures otherwise
pub(crate) async fn search(
    cfg: &StoreConfig,
    client: &QdrantFacade,
    query: &str,
    n_results: u64,
    provider: &dyn EmbeddingsProvider,
) -> Result<Vec<SearchHit>, StoreError> {
    trace!("retrieve::search n_results={}", n_results);

    if !client.collection_exists().await? {
        return Err(StoreError::CollectionMissing(cfg.collection.clone()));
    }

    let qv = provider.embed(query).await?;
    let scored = client.search(qv, n_results).await?;
    let hits = hits_from_scored(cfg.distance, scored);

    debug!("retrieve::search hits={}", hits.len());
    Ok(hits)
}

/// Normalizes the store's scored results into a flat hit list.
///
/// One hit per scored point: fewer matches than requested yield fewer hits,
/// never padding.
pub(crate) fn hits_from_scored(
    distance: DistanceKind,
    scored: Vec<(f32, serde_json::Value)>,
) -> Vec<SearchHit> {
    scored
        .into_iter()
        .map(|(score, payload)| hit_from_payload(distance, score, &payload))
        .collect()
}

/// Normalizes one scored Qdrant payload into a flat [`SearchHit`].
///
/// Missing payload fields get explicit defaults: `source` → `"unknown"`,
/// `chunk_index` → `-1`.
pub(crate) fn hit_from_payload(
    distance: DistanceKind,
    score: f32,
    payload: &serde_json::Value,
) -> SearchHit {
    let text = payload
        .get("text")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    let source = payload
        .get("source")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown")
        .to_string();
    let chunk_index = payload
        .get("chunk_index")
        .and_then(|v| v.as_i64())
        .unwrap_or(-1);

    SearchHit {
        text,
        source,
        chunk_index,
        distance: score_to_distance(distance, score),
    }
}

/// Maps Qdrant's similarity score to a lower-is-better distance.
///
/// Cosine and dot scores are higher-is-better and get flipped; Euclid scores
/// already are distances. Non-finite scores yield `None` instead of a
/// numeric placeholder.
fn score_to_distance(kind: DistanceKind, score: f32) -> Option<f32> {
    if !score.is_finite() {
        return None;
    }
    match kind {
        DistanceKind::Cosine => Some(1.0 - score),
        DistanceKind::Dot => Some(-score),
        DistanceKind::Euclid => Some(score),
    }
}
