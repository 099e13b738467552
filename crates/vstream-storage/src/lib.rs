//! S3 object storage client.
//!
//! This crate provides:
//! - The `ObjectStore` trait the API handlers depend on
//! - An S3 implementation with ranged GETs and presigned URL generation

pub mod error;
pub mod s3;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use s3::{S3Config, S3ObjectStore};
pub use store::ObjectStore;
