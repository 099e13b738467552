//! MongoDB implementation of the metadata store.

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Client, Collection};
use tracing::{debug, info};

use vstream_models::VideoMetadata;

use crate::error::{DbError, DbResult};
use crate::store::MetadataStore;

/// Configuration for the MongoDB client.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// Connection URI
    pub uri: String,
    /// Database name
    pub database: String,
    /// Collection holding video metadata documents
    pub collection: String,
}

impl MongoConfig {
    /// Create config from environment variables.
    pub fn from_env() -> DbResult<Self> {
        Ok(Self {
            uri: std::env::var("MONGO_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: std::env::var("MONGO_DATABASE")
                .unwrap_or_else(|_| "videoStreaming".to_string()),
            collection: std::env::var("MONGO_COLLECTION")
                .unwrap_or_else(|_| "videos".to_string()),
        })
    }
}

/// MongoDB-backed metadata store.
#[derive(Clone)]
pub struct MongoMetadataStore {
    collection: Collection<VideoMetadata>,
}

impl MongoMetadataStore {
    /// Create a new store from configuration.
    pub async fn new(config: MongoConfig) -> DbResult<Self> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(|e| DbError::ConnectFailed(e.to_string()))?;

        let collection = client
            .database(&config.database)
            .collection::<VideoMetadata>(&config.collection);

        info!(
            "Connected to MongoDB database={} collection={}",
            config.database, config.collection
        );

        Ok(Self { collection })
    }

    /// Create from environment variables.
    pub async fn from_env() -> DbResult<Self> {
        let config = MongoConfig::from_env()?;
        Self::new(config).await
    }
}

#[async_trait]
impl MetadataStore for MongoMetadataStore {
    async fn find_one(&self, filename: &str) -> DbResult<Option<VideoMetadata>> {
        debug!("Looking up video metadata for {}", filename);

        self.collection
            .find_one(doc! { "filename": filename })
            .projection(doc! { "_id": 0 })
            .await
            .map_err(|e| DbError::QueryFailed(e.to_string()))
    }

    async fn find_all(&self) -> DbResult<Vec<VideoMetadata>> {
        debug!("Scanning video metadata collection");

        // The internal _id never leaves the store.
        let cursor = self
            .collection
            .find(doc! {})
            .projection(doc! { "_id": 0 })
            .await
            .map_err(|e| DbError::QueryFailed(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| DbError::DecodeFailed(e.to_string()))
    }
}
