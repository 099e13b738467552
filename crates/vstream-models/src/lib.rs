//! Shared data models for the VStream backend.
//!
//! This crate provides Serde-serializable types for:
//! - Video metadata documents
//! - Byte-range requests

pub mod range;
pub mod video;

// Re-export common types
pub use range::ByteRange;
pub use video::VideoMetadata;
