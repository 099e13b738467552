//! Axum HTTP API server.
//!
//! This crate provides:
//! - Read-only video metadata listing
//! - Byte-range video streaming with a presigned-URL fallback
//! - CORS, request-ID, and request-logging middleware

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod range;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use range::{parse_range_header, MalformedRange};
pub use routes::create_router;
pub use state::AppState;
