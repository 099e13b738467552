//! Byte-range request model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An inclusive byte span of an object, per HTTP range-request semantics.
///
/// `end == None` means "to the end of the object". Bounds are not validated
/// against the object length here; the object store clamps or rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteRange {
    /// First byte offset, inclusive.
    pub start: u64,
    /// Last byte offset, inclusive; `None` for an open-ended range.
    pub end: Option<u64>,
}

impl ByteRange {
    pub fn new(start: u64, end: Option<u64>) -> Self {
        Self { start, end }
    }

    /// Render as an HTTP `Range` request value, e.g. `bytes=0-499` or
    /// `bytes=500-` for an open-ended range.
    pub fn to_header_value(&self) -> String {
        match self.end {
            Some(end) => format!("bytes={}-{}", self.start, end),
            None => format!("bytes={}-", self.start),
        }
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}-{}", self.start, end),
            None => write!(f, "{}-", self.start),
        }
    }
}
