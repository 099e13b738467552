//! Application state.

use std::sync::Arc;

use vstream_db::{MetadataStore, MongoMetadataStore};
use vstream_storage::{ObjectStore, S3ObjectStore};

use crate::config::ApiConfig;

/// Shared application state.
///
/// Store handles are built once at startup and shared read-only by every
/// request; handlers see them as trait objects so tests can substitute
/// in-memory fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub metadata: Arc<dyn MetadataStore>,
    pub storage: Arc<dyn ObjectStore>,
}

impl AppState {
    /// Create application state backed by MongoDB and S3.
    pub async fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let metadata = MongoMetadataStore::from_env().await?;
        let storage = S3ObjectStore::from_env()?;

        Ok(Self {
            config,
            metadata: Arc::new(metadata),
            storage: Arc::new(storage),
        })
    }

    /// Create application state from explicit store handles.
    pub fn with_stores(
        config: ApiConfig,
        metadata: Arc<dyn MetadataStore>,
        storage: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            config,
            metadata,
            storage,
        }
    }
}
