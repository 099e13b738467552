//! Metadata store trait.

use async_trait::async_trait;

use vstream_models::VideoMetadata;

use crate::error::DbResult;

/// Read-only access to video metadata documents.
///
/// Implementations are long-lived, shared handles; every request uses the
/// same instance and nothing here mutates the underlying store.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Look up a single video by filename.
    async fn find_one(&self, filename: &str) -> DbResult<Option<VideoMetadata>>;

    /// Fetch metadata for all videos. Full scan, no pagination.
    async fn find_all(&self) -> DbResult<Vec<VideoMetadata>>;
}
