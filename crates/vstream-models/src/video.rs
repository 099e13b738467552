//! Video metadata models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata document for a single video.
///
/// Only `filename` is required and typed; everything else the ingestion
/// pipeline stored alongside it (title, duration, ...) is carried as an
/// opaque map and passed through to clients unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Unique identifier; maps 1:1 to the object key `videos/{filename}`.
    pub filename: String,
    /// Descriptive fields the backend never inspects.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl VideoMetadata {
    /// Create a metadata record with no descriptive fields.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Object-store key backing this video.
    pub fn object_key(&self) -> String {
        format!("videos/{}", self.filename)
    }
}
