//! `Range` header parsing.

use thiserror::Error;

use vstream_models::ByteRange;

/// A `Range` header that names a bytes range but carries bounds that do not
/// parse as integers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid Range header: {0}")]
pub struct MalformedRange(pub String);

/// Parse an HTTP `Range` header value into a byte range.
///
/// Only the single-range form `bytes=<start>-<end?>` is recognized:
/// - a missing header, or one without `bytes=`, means no range was requested
/// - `start` is mandatory once `bytes=` is present
/// - a missing `end` means an open-ended range (`bytes=500-`)
///
/// `start <= end` is not checked here; callers validate before fetching.
pub fn parse_range_header(value: Option<&str>) -> Result<Option<ByteRange>, MalformedRange> {
    let Some(value) = value else {
        return Ok(None);
    };

    let Some((_, spec)) = value.split_once("bytes=") else {
        return Ok(None);
    };

    let mut parts = spec.splitn(2, '-');
    let start_str = parts.next().unwrap_or_default().trim();
    let end_str = parts.next().unwrap_or_default().trim();

    let start: u64 = start_str
        .parse()
        .map_err(|_| MalformedRange(value.to_string()))?;

    let end: Option<u64> = if end_str.is_empty() {
        None
    } else {
        Some(
            end_str
                .parse()
                .map_err(|_| MalformedRange(value.to_string()))?,
        )
    };

    Ok(Some(ByteRange::new(start, end)))
}
