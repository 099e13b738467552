//! MongoDB metadata store.
//!
//! This crate provides:
//! - The `MetadataStore` trait the API handlers depend on
//! - A MongoDB-backed implementation (lookup by filename, full scan)

pub mod error;
pub mod mongo;
pub mod store;

pub use error::{DbError, DbResult};
pub use mongo::{MongoConfig, MongoMetadataStore};
pub use store::MetadataStore;
