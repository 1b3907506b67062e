//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! This facade concentrates all Qdrant interactions behind a minimal API,
//! hiding away the verbose builder pattern and keeping the rest of the
//! library decoupled from `qdrant-client`.

use crate::config::{DistanceKind, StoreConfig};
use crate::errors::StoreError;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    Value as QValue, VectorParamsBuilder, value,
};
use tracing::{debug, info};

/// A facade over the Qdrant client.
///
/// Encapsulates the underlying client, the target collection name, and the
/// distance function used in the vector space.
pub struct QdrantFacade {
    client: Qdrant,
    collection: String,
    distance: DistanceKind,
}

impl QdrantFacade {
    /// Creates a new facade from the given configuration.
    ///
    /// Uses the builder-based API of `qdrant-client` and supports optional
    /// API key authentication.
    ///
    /// # Errors
    /// Returns `StoreError::Qdrant` if the client cannot be constructed.
    pub fn new(cfg: &StoreConfig) -> Result<Self, StoreError> {
        let mut builder = Qdrant::from_url(&cfg.qdrant_url);
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        Ok(Self {
            client,
            collection: cfg.collection.clone(),
            distance: cfg.distance,
        })
    }

    /// Checks whether the target collection exists.
    ///
    /// # Errors
    /// Returns `StoreError::Qdrant` on transport failures.
    pub async fn collection_exists(&self) -> Result<bool, StoreError> {
        self.client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))
    }

    /// Drops the collection (if present) and creates a new one with the
    /// given vector size and the configured distance.
    ///
    /// This guarantees a clean index: ingestion is always a full rebuild.
    ///
    /// # Errors
    /// Returns `StoreError::Qdrant` on transport/server failures when creating.
    pub async fn reset_collection(&self, dim: usize) -> Result<(), StoreError> {
        info!(
            "Resetting collection '{}' (size={} distance={:?})",
            self.collection, dim, self.distance
        );

        // Best-effort delete: ignore errors (e.g., not found) to keep idempotency.
        let _ = self.client.delete_collection(&self.collection).await;

        let distance = match self.distance {
            DistanceKind::Cosine => Distance::Cosine,
            DistanceKind::Dot => Distance::Dot,
            DistanceKind::Euclid => Distance::Euclid,
        };

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(dim as u64, distance)),
            )
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        info!("Collection '{}' created", self.collection);
        Ok(())
    }

    /// Upserts a batch of points into the collection.
    ///
    /// # Errors
    /// Returns `StoreError::Qdrant` on transport/server failures.
    pub async fn upsert_points(&self, points: Vec<PointStruct>) -> Result<(), StoreError> {
        if points.is_empty() {
            debug!("No points provided for upsert");
            return Ok(());
        }

        debug!(
            "Upserting {} points into collection '{}'",
            points.len(),
            self.collection
        );

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points))
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        Ok(())
    }

    /// Performs a similarity search and returns `(score, payload)` tuples,
    /// best match first.
    ///
    /// # Errors
    /// Returns `StoreError::Qdrant` if the search fails.
    pub async fn search(
        &self,
        vector: Vec<f32>,
        top_k: u64,
    ) -> Result<Vec<(f32, serde_json::Value)>, StoreError> {
        debug!("Searching '{}' with top_k={}", self.collection, top_k);

        let builder = SearchPointsBuilder::new(&self.collection, vector, top_k).with_payload(true);

        let res = self
            .client
            .search_points(builder)
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        let mut out = Vec::with_capacity(res.result.len());
        for r in res.result.into_iter() {
            let score = r.score;
            let payload_json = qpayload_to_json(r.payload);
            out.push((score, payload_json));
        }

        debug!("Search completed: {} hits returned", out.len());
        Ok(out)
    }
}

/// Converts a Qdrant payload (`HashMap<String, qdrant::Value>`) into JSON.
///
/// Unsupported nested objects/arrays are mapped to `Null`.
fn qpayload_to_json(mut p: std::collections::HashMap<String, QValue>) -> serde_json::Value {
    use value::Kind as K;
    let mut m = serde_json::Map::new();
    for (k, v) in p.drain() {
        let j = match v.kind {
            Some(K::StringValue(s)) => serde_json::Value::String(s),
            Some(K::IntegerValue(i)) => serde_json::Value::Number(i.into()),
            Some(K::DoubleValue(f)) => serde_json::json!(f),
            Some(K::BoolValue(b)) => serde_json::Value::Bool(b),
            None => serde_json::Value::Null,
            // For unsupported nested types, fallback to Null for safety.
            _ => serde_json::Value::Null,
        };
        m.insert(k, j);
    }
    serde_json::Value::Object(m)
}
