//! MongoDB-backed implementation of the document store adapter.

use crate::config::Config;
use crate::schemas::Lead;
use crate::store::types::{
    Collection, DEFAULT_LIST_LIMIT, StoreError, id_to_string, normalize_id, stamp_timestamps,
};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::Document;
use mongodb::options::FindOptions;
use mongodb::{Client, Database};
use serde::Serialize;

/// Explicitly owned handle to the MongoDB database backing this service.
///
/// Construct once near process start and share it through an `Arc`; the
/// driver's client is safe for concurrent use.
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect to the database named by the given configuration.
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.database_url)
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        tracing::debug!(
            url = %config.database_url,
            database = %config.database_name,
            "Initialized MongoDB client"
        );

        Ok(Self {
            database: client.database(&config.database_name),
        })
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.database.collection(collection.name())
    }

    /// Write a record as a new document in the given collection.
    ///
    /// The record is serialized to BSON, stamped with `created_at` and
    /// `updated_at`, and inserted as-is. Returns the store-assigned identifier
    /// rendered as a string. No retry on failure.
    pub async fn create(
        &self,
        collection: Collection,
        record: &impl Serialize,
    ) -> Result<String, StoreError> {
        let mut document = mongodb::bson::to_document(record)?;
        stamp_timestamps(&mut document);

        let result = self
            .collection(collection)
            .insert_one(document)
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?;

        Ok(id_to_string(&result.inserted_id))
    }

    /// List documents matching `filter` (all documents when `None`), up to
    /// `limit` (50 when `None`), in store-native order.
    ///
    /// Each returned document has its `_id` normalized to a string.
    pub async fn list(
        &self,
        collection: Collection,
        filter: Option<Document>,
        limit: Option<u32>,
    ) -> Result<Vec<Document>, StoreError> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);
        let options = FindOptions::builder().limit(i64::from(limit)).build();

        let mut cursor = self
            .collection(collection)
            .find(filter.unwrap_or_default())
            .with_options(options)
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?;

        let mut records = Vec::new();
        while let Some(mut document) = cursor
            .try_next()
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?
        {
            normalize_id(&mut document);
            records.push(document);
        }
        Ok(records)
    }
}

/// Typed persistence operations consumed by the HTTP surface.
///
/// The trait seam lets handler tests substitute a recording stub for the real
/// store.
#[async_trait]
pub trait StoreApi: Send + Sync {
    /// Persist a validated lead, returning its store-assigned identifier.
    async fn create_lead(&self, lead: Lead) -> Result<String, StoreError>;

    /// Sample the service-area collection, returning each match's `name`.
    async fn service_area_names(&self, limit: u32) -> Result<Vec<String>, StoreError>;
}

#[async_trait]
impl StoreApi for MongoStore {
    async fn create_lead(&self, lead: Lead) -> Result<String, StoreError> {
        self.create(Collection::Lead, &lead).await
    }

    async fn service_area_names(&self, limit: u32) -> Result<Vec<String>, StoreError> {
        let records = self
            .list(Collection::ServiceArea, None, Some(limit))
            .await?;

        Ok(records
            .iter()
            .filter_map(|record| record.get_str("name").ok())
            .map(str::to_string)
            .collect())
    }
}
