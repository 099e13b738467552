//! Video API handlers.
//!
//! Two read-only endpoints: a full metadata listing and the streaming
//! endpoint, which either serves a byte range straight from object storage
//! (206) or hands the client a presigned URL to follow (200).

use std::time::Duration;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{debug, warn};

use vstream_models::VideoMetadata;

use crate::error::{ApiError, ApiResult};
use crate::range::parse_range_header;
use crate::state::AppState;

/// Presigned URLs stay valid for 10 hours.
const PRESIGN_TTL: Duration = Duration::from_secs(36_000);

/// Response for the presigned-URL fallback path.
#[derive(Serialize)]
pub struct PresignedUrlResponse {
    pub presigned_url: String,
}

/// List metadata for all videos.
///
/// GET /api/videos
pub async fn list_videos(State(state): State<AppState>) -> ApiResult<Json<Vec<VideoMetadata>>> {
    let videos = state
        .metadata
        .find_all()
        .await
        .map_err(|e| ApiError::List(e.to_string()))?;

    Ok(Json(videos))
}

/// Fetch or stream one video.
///
/// GET /api/video/{filename}
///
/// With a `Range` header the requested bytes are fetched from object
/// storage and returned as 206 partial content. Without one the response
/// is 200 with a presigned URL the client follows directly; the backend
/// never proxies whole files.
pub async fn stream_video(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let range_header = headers
        .get(header::RANGE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    // The metadata lookup is the authoritative existence gate, even though
    // a missing object would also fail the fetch below.
    let metadata = state
        .metadata
        .find_one(&filename)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or(ApiError::VideoNotFound)?;

    let key = metadata.object_key();

    // Presign eagerly, before any range handling: a presign failure is a
    // 500 on the range path too.
    let presigned_url = state
        .storage
        .presign_get(&key, PRESIGN_TTL)
        .await
        .map_err(|e| {
            warn!("Presign failed for {}: {}", key, e);
            ApiError::presign(e.to_string())
        })?;

    let range = parse_range_header(range_header.as_deref())
        .map_err(|e| ApiError::range_fetch(e.to_string()))?;

    let Some(range) = range else {
        debug!("No range requested for {}, returning presigned URL", key);
        return Ok(Json(PresignedUrlResponse { presigned_url }).into_response());
    };

    if let Some(end) = range.end {
        if range.start > end {
            return Err(ApiError::range_fetch(format!(
                "invalid range {}-{}",
                range.start, end
            )));
        }
    }

    let (bytes, total_length) = state
        .storage
        .get_range(&key, range)
        .await
        .map_err(|e| ApiError::range_fetch(e.to_string()))?;

    debug!(
        "Serving {} bytes of {} ({} total)",
        bytes.len(),
        key,
        total_length
    );

    // The upper bound echoes the request: an open-ended range renders with
    // no end value rather than substituting total_length - 1.
    let end_text = range.end.map(|e| e.to_string()).unwrap_or_default();

    Response::builder()
        .status(StatusCode::PARTIAL_CONTENT)
        .header(header::CONTENT_TYPE, "video/mp4")
        .header(header::ACCEPT_RANGES, "bytes")
        .header(
            header::CONTENT_RANGE,
            format!("bytes {}-{}/{}", range.start, end_text, total_length),
        )
        .body(Body::from(bytes))
        .map_err(|e| ApiError::internal(format!("Failed to build response: {}", e)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{HeaderMap, Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    use vstream_db::{DbError, DbResult, MetadataStore};
    use vstream_models::{ByteRange, VideoMetadata};
    use vstream_storage::{ObjectStore, StorageError, StorageResult};

    use crate::config::ApiConfig;
    use crate::routes::create_router;
    use crate::state::AppState;

    struct FakeMetadataStore {
        videos: Vec<VideoMetadata>,
        fail: bool,
    }

    #[async_trait]
    impl MetadataStore for FakeMetadataStore {
        async fn find_one(&self, filename: &str) -> DbResult<Option<VideoMetadata>> {
            if self.fail {
                return Err(DbError::QueryFailed("connection reset".to_string()));
            }
            Ok(self.videos.iter().find(|v| v.filename == filename).cloned())
        }

        async fn find_all(&self) -> DbResult<Vec<VideoMetadata>> {
            if self.fail {
                return Err(DbError::QueryFailed("connection reset".to_string()));
            }
            Ok(self.videos.clone())
        }
    }

    struct FakeObjectStore {
        objects: HashMap<String, Vec<u8>>,
        fail_presign: bool,
    }

    #[async_trait]
    impl ObjectStore for FakeObjectStore {
        async fn get_range(&self, key: &str, range: ByteRange) -> StorageResult<(Vec<u8>, u64)> {
            let data = self
                .objects
                .get(key)
                .ok_or_else(|| StorageError::not_found(key))?;
            let total = data.len() as u64;
            if range.start >= total {
                return Err(StorageError::DownloadFailed(
                    "requested range not satisfiable".to_string(),
                ));
            }
            let end = range.end.map(|e| e.min(total - 1)).unwrap_or(total - 1);
            Ok((data[range.start as usize..=end as usize].to_vec(), total))
        }

        async fn presign_get(&self, key: &str, _expires_in: Duration) -> StorageResult<String> {
            if self.fail_presign {
                return Err(StorageError::PresignFailed("no credentials".to_string()));
            }
            Ok(format!("https://storage.test/{}?sig=abc123", key))
        }
    }

    fn test_object(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    fn test_app(videos: Vec<VideoMetadata>, objects: HashMap<String, Vec<u8>>) -> Router {
        test_app_with(videos, objects, false, false)
    }

    fn test_app_with(
        videos: Vec<VideoMetadata>,
        objects: HashMap<String, Vec<u8>>,
        fail_db: bool,
        fail_presign: bool,
    ) -> Router {
        let state = AppState::with_stores(
            ApiConfig::default(),
            Arc::new(FakeMetadataStore {
                videos,
                fail: fail_db,
            }),
            Arc::new(FakeObjectStore {
                objects,
                fail_presign,
            }),
        );
        create_router(state)
    }

    fn one_video(len: usize) -> (Vec<VideoMetadata>, HashMap<String, Vec<u8>>) {
        let videos = vec![VideoMetadata::new("clip.mp4")];
        let mut objects = HashMap::new();
        objects.insert("videos/clip.mp4".to_string(), test_object(len));
        (videos, objects)
    }

    async fn get(app: Router, uri: &str, range: Option<&str>) -> (StatusCode, HeaderMap, Vec<u8>) {
        let mut builder = Request::builder().uri(uri);
        if let Some(range) = range {
            builder = builder.header("Range", range);
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        (status, headers, body)
    }

    fn error_message(body: &[u8]) -> String {
        let value: serde_json::Value = serde_json::from_slice(body).unwrap();
        value["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_unknown_filename_is_404_with_and_without_range() {
        let (videos, objects) = one_video(1000);

        for range in [None, Some("bytes=0-499")] {
            let app = test_app(videos.clone(), objects.clone());
            let (status, _, body) = get(app, "/api/video/missing.mp4", range).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(error_message(&body), "Video not found in the database.");
        }
    }

    #[tokio::test]
    async fn test_no_range_returns_presigned_url() {
        let (videos, objects) = one_video(1000);
        let app = test_app(videos, objects);

        let (status, headers, body) = get(app, "/api/video/clip.mp4", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers["content-type"]
            .to_str()
            .unwrap()
            .starts_with("application/json"));

        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let url = value["presigned_url"].as_str().unwrap();
        assert!(!url.is_empty());
        assert!(url.contains("videos/clip.mp4"));
    }

    #[tokio::test]
    async fn test_bounded_range_returns_partial_content() {
        let (videos, objects) = one_video(1000);
        let app = test_app(videos, objects);

        let (status, headers, body) = get(app, "/api/video/clip.mp4", Some("bytes=0-499")).await;
        assert_eq!(status, StatusCode::PARTIAL_CONTENT);
        assert_eq!(headers["content-range"], "bytes 0-499/1000");
        assert_eq!(headers["accept-ranges"], "bytes");
        assert_eq!(headers["content-type"], "video/mp4");
        assert_eq!(body.len(), 500);
    }

    #[tokio::test]
    async fn test_range_request_serves_exact_bytes() {
        let (videos, objects) = one_video(2000);
        let expected = objects["videos/clip.mp4"][1000..1500].to_vec();
        let app = test_app(videos, objects);

        let (status, headers, body) =
            get(app, "/api/video/clip.mp4", Some("bytes=1000-1499")).await;
        assert_eq!(status, StatusCode::PARTIAL_CONTENT);
        assert_eq!(headers["content-range"], "bytes 1000-1499/2000");
        assert_eq!(headers["accept-ranges"], "bytes");
        assert_eq!(body.len(), 500);
        assert_eq!(body, expected);
    }

    #[tokio::test]
    async fn test_open_ended_range_renders_empty_upper_bound() {
        let (videos, objects) = one_video(2000);
        let app = test_app(videos, objects);

        let (status, headers, body) = get(app, "/api/video/clip.mp4", Some("bytes=1000-")).await;
        assert_eq!(status, StatusCode::PARTIAL_CONTENT);
        assert_eq!(headers["content-range"], "bytes 1000-/2000");
        assert_eq!(body.len(), 1000);
    }

    #[tokio::test]
    async fn test_identical_range_requests_are_idempotent() {
        let (videos, objects) = one_video(1000);

        let app = test_app(videos.clone(), objects.clone());
        let first = get(app, "/api/video/clip.mp4", Some("bytes=100-199")).await;

        let app = test_app(videos, objects);
        let second = get(app, "/api/video/clip.mp4", Some("bytes=100-199")).await;

        assert_eq!(first.0, second.0);
        assert_eq!(
            first.1.get("content-range").unwrap(),
            second.1.get("content-range").unwrap()
        );
        assert_eq!(first.2, second.2);
    }

    #[tokio::test]
    async fn test_presign_failure_is_500_even_with_range() {
        let (videos, objects) = one_video(1000);
        let app = test_app_with(videos, objects, false, true);

        let (status, _, body) = get(app, "/api/video/clip.mp4", Some("bytes=0-499")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error_message(&body).starts_with("Error generating presigned URL:"));
    }

    #[tokio::test]
    async fn test_malformed_range_is_400() {
        let (videos, objects) = one_video(1000);
        let app = test_app(videos, objects);

        let (status, _, body) = get(app, "/api/video/clip.mp4", Some("bytes=abc-5")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error_message(&body).starts_with("Error fetching video with byte range:"));
    }

    #[tokio::test]
    async fn test_inverted_range_is_400() {
        let (videos, objects) = one_video(1000);
        let app = test_app(videos, objects);

        let (status, _, _) = get(app, "/api/video/clip.mp4", Some("bytes=500-100")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_range_header_without_bytes_unit_falls_back_to_presign() {
        let (videos, objects) = one_video(1000);
        let app = test_app(videos, objects);

        let (status, _, body) = get(app, "/api/video/clip.mp4", Some("items=0-10")).await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(value["presigned_url"].is_string());
    }

    #[tokio::test]
    async fn test_metadata_drift_is_400() {
        // Metadata present, backing object gone.
        let videos = vec![VideoMetadata::new("ghost.mp4")];
        let app = test_app(videos, HashMap::new());

        let (status, _, body) = get(app, "/api/video/ghost.mp4", Some("bytes=0-99")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error_message(&body).starts_with("Error fetching video with byte range:"));
    }

    #[tokio::test]
    async fn test_list_videos() {
        let mut video = VideoMetadata::new("clip.mp4");
        video
            .extra
            .insert("title".to_string(), serde_json::json!("My clip"));
        let app = test_app(vec![video], HashMap::new());

        let (status, _, body) = get(app, "/api/videos", None).await;
        assert_eq!(status, StatusCode::OK);

        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let list = value.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["filename"], "clip.mp4");
        assert_eq!(list[0]["title"], "My clip");
        assert!(list[0].get("_id").is_none());
    }

    #[tokio::test]
    async fn test_list_failure_is_500() {
        let app = test_app_with(vec![], HashMap::new(), true, false);

        let (status, _, body) = get(app, "/api/videos", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error_message(&body).starts_with("Error fetching videos:"));
    }
}
