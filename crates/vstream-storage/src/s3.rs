//! S3 implementation of the object store.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use tracing::debug;

use vstream_models::ByteRange;

use crate::error::{StorageError, StorageResult};
use crate::store::ObjectStore;

/// Configuration for the S3 client.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Access key ID
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
    /// Region
    pub region: String,
    /// Bucket name
    pub bucket_name: String,
    /// Optional custom endpoint (S3-compatible stores)
    pub endpoint_url: Option<String>,
}

impl S3Config {
    /// Create config from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        Ok(Self {
            access_key_id: std::env::var("AWS_ACCESS_KEY")
                .map_err(|_| StorageError::config_error("AWS_ACCESS_KEY not set"))?,
            secret_access_key: std::env::var("AWS_SECRET_KEY")
                .map_err(|_| StorageError::config_error("AWS_SECRET_KEY not set"))?,
            region: std::env::var("AWS_REGION")
                .map_err(|_| StorageError::config_error("AWS_REGION not set"))?,
            bucket_name: std::env::var("AWS_BUCKET_NAME")
                .map_err(|_| StorageError::config_error("AWS_BUCKET_NAME not set"))?,
            endpoint_url: std::env::var("AWS_ENDPOINT_URL").ok(),
        })
    }
}

/// S3-backed object store.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Create a new store from configuration.
    pub fn new(config: S3Config) -> StorageResult<Self> {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "vstream",
        );

        let mut builder = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region))
            .credentials_provider(credentials);

        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        let client = Client::from_conf(builder.build());

        Ok(Self {
            client,
            bucket: config.bucket_name,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        let config = S3Config::from_env()?;
        Self::new(config)
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_range(&self, key: &str, range: ByteRange) -> StorageResult<(Vec<u8>, u64)> {
        debug!("Fetching {} range {}", key, range);

        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .range(range.to_header_value())
            .send()
            .await
            .map_err(|e| {
                if e.to_string().contains("NoSuchKey") {
                    StorageError::not_found(key)
                } else {
                    StorageError::DownloadFailed(e.to_string())
                }
            })?;

        // A ranged GET reports the slice length in Content-Length; the full
        // object length lives after the '/' in Content-Range.
        let total_length = response
            .content_range()
            .and_then(|cr| cr.rsplit('/').next())
            .and_then(|t| t.parse::<u64>().ok())
            .or_else(|| response.content_length().map(|l| l as u64))
            .unwrap_or(0);

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?
            .into_bytes()
            .to_vec();

        Ok((bytes, total_length))
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        let presign_config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::PresignFailed(e.to_string()))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presign_config)
            .await
            .map_err(|e| StorageError::PresignFailed(e.to_string()))?;

        Ok(presigned.uri().to_string())
    }
}
