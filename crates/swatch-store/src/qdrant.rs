//! Qdrant-backed implementation of [`VectorStore`].

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    Condition, CreateCollectionBuilder, CreateFieldIndexCollectionBuilder, DeletePointsBuilder,
    Distance, FieldType, Filter, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder,
};

use crate::vector_store::{ScoredVectorPoint, VectorPoint, VectorStore, VectorStoreError};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub struct QdrantVectorStore {
    client: Qdrant,
}

impl std::fmt::Debug for QdrantVectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QdrantVectorStore").finish_non_exhaustive()
    }
}

impl QdrantVectorStore {
    /// Connect to a Qdrant instance at the given URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be constructed.
    pub fn new(url: &str) -> Result<Self, VectorStoreError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| VectorStoreError::Connection(e.to_string()))?;
        Ok(Self { client })
    }
}

fn to_qdrant_payload(
    payload: HashMap<String, serde_json::Value>,
) -> Result<HashMap<String, qdrant_client::qdrant::Value>, VectorStoreError> {
    serde_json::from_value(serde_json::Value::Object(payload.into_iter().collect()))
        .map_err(|e| VectorStoreError::Serialization(e.to_string()))
}

fn from_qdrant_payload(
    payload: &HashMap<String, qdrant_client::qdrant::Value>,
) -> Result<HashMap<String, serde_json::Value>, VectorStoreError> {
    payload
        .iter()
        .map(|(k, v)| {
            serde_json::to_value(v)
                .map(|json| (k.clone(), json))
                .map_err(|e| VectorStoreError::Serialization(e.to_string()))
        })
        .collect()
}

fn namespace_filter(namespace: &str) -> Filter {
    Filter::must(vec![Condition::matches(
        crate::vector_store::NAMESPACE_FIELD,
        namespace.to_string(),
    )])
}

impl VectorStore for QdrantVectorStore {
    fn ensure_collection(
        &self,
        collection: &str,
        vector_size: u64,
    ) -> BoxFuture<'_, Result<(), VectorStoreError>> {
        let collection = collection.to_owned();
        Box::pin(async move {
            let exists = self
                .client
                .collection_exists(&collection)
                .await
                .map_err(|e| VectorStoreError::Collection(e.to_string()))?;
            if exists {
                return Ok(());
            }

            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&collection)
                        .vectors_config(VectorParamsBuilder::new(vector_size, Distance::Cosine)),
                )
                .await
                .map_err(|e| VectorStoreError::Collection(e.to_string()))?;

            self.client
                .create_field_index(CreateFieldIndexCollectionBuilder::new(
                    &collection,
                    crate::vector_store::NAMESPACE_FIELD,
                    FieldType::Keyword,
                ))
                .await
                .map_err(|e| VectorStoreError::Collection(e.to_string()))?;

            tracing::info!(collection = %collection, vector_size, "created Qdrant collection");
            Ok(())
        })
    }

    fn collection_exists(&self, collection: &str) -> BoxFuture<'_, Result<bool, VectorStoreError>> {
        let collection = collection.to_owned();
        Box::pin(async move {
            self.client
                .collection_exists(&collection)
                .await
                .map_err(|e| VectorStoreError::Collection(e.to_string()))
        })
    }

    fn upsert(
        &self,
        collection: &str,
        points: Vec<VectorPoint>,
    ) -> BoxFuture<'_, Result<(), VectorStoreError>> {
        let collection = collection.to_owned();
        Box::pin(async move {
            let mut qdrant_points = Vec::with_capacity(points.len());
            for p in points {
                let payload = to_qdrant_payload(p.payload)?;
                qdrant_points.push(PointStruct::new(p.id, p.vector, payload));
            }

            self.client
                .upsert_points(UpsertPointsBuilder::new(&collection, qdrant_points))
                .await
                .map_err(|e| VectorStoreError::Upsert(e.to_string()))?;
            Ok(())
        })
    }

    fn search(
        &self,
        collection: &str,
        vector: Vec<f32>,
        limit: u64,
        namespace: &str,
    ) -> BoxFuture<'_, Result<Vec<ScoredVectorPoint>, VectorStoreError>> {
        let collection = collection.to_owned();
        let namespace = namespace.to_owned();
        Box::pin(async move {
            let builder = SearchPointsBuilder::new(&collection, vector, limit)
                .with_payload(true)
                .filter(namespace_filter(&namespace));

            let results = self
                .client
                .search_points(builder)
                .await
                .map_err(|e| VectorStoreError::Search(e.to_string()))?;

            results
                .result
                .into_iter()
                .map(|point| {
                    let payload = from_qdrant_payload(&point.payload)?;
                    let id = point
                        .id
                        .and_then(|id| id.point_id_options)
                        .map(|id| match id {
                            qdrant_client::qdrant::point_id::PointIdOptions::Num(n) => {
                                n.to_string()
                            }
                            qdrant_client::qdrant::point_id::PointIdOptions::Uuid(u) => u,
                        })
                        .unwrap_or_default();
                    Ok(ScoredVectorPoint {
                        id,
                        score: point.score,
                        payload,
                    })
                })
                .collect()
        })
    }

    fn clear_namespace(
        &self,
        collection: &str,
        namespace: &str,
    ) -> BoxFuture<'_, Result<(), VectorStoreError>> {
        let collection = collection.to_owned();
        let namespace = namespace.to_owned();
        Box::pin(async move {
            self.client
                .delete_points(
                    DeletePointsBuilder::new(&collection).points(namespace_filter(&namespace)),
                )
                .await
                .map_err(|e| VectorStoreError::Delete(e.to_string()))?;
            tracing::info!(collection = %collection, namespace = %namespace, "cleared namespace");
            Ok(())
        })
    }
}
