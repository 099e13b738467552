//! Object store trait.

use std::time::Duration;

use async_trait::async_trait;

use vstream_models::ByteRange;

use crate::error::StorageResult;

/// Read-only access to video objects.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch a byte range of an object.
    ///
    /// An open-ended range (`end == None`) is passed through to the store
    /// unchanged. Returns the fetched bytes together with the total length
    /// of the backing object (not the length of the returned slice).
    async fn get_range(&self, key: &str, range: ByteRange) -> StorageResult<(Vec<u8>, u64)>;

    /// Generate a time-limited presigned URL granting direct read access
    /// to one object.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> StorageResult<String>;
}
