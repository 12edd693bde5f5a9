use axum::{http::StatusCode, response::Response};

use super::{ErrorCode, default_response};

/// Fallback handler for unmatched routes.
pub async fn not_found() -> Response {
    default_response(StatusCode::NOT_FOUND, ErrorCode::NotFound)
}
