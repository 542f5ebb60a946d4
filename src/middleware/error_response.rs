//! Error response normalization middleware
//!
//! Framework-level rejections (malformed JSON, bad path parameters, unknown
//! routes, wrong methods, timeouts) come back as text/plain or empty bodies.
//! This layer rewrites them into the `ApiResult` envelope so clients only
//! ever see one error shape, and hides parser details from them.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::ApiResult;

/// Middleware that normalizes all error responses to the envelope format.
pub async fn normalize_error_response(request: Request<Body>, next: Next) -> Response {
    let uri = request.uri().path().to_string();
    let response = next.run(request).await;

    let status = response.status();

    // Health/readiness endpoints return their own plain-text responses
    if uri == "/health" || uri == "/ready" {
        return response;
    }

    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    // Already an envelope from AppError / AuthError
    if content_type.contains("application/json") {
        return response;
    }

    tracing::debug!(path = %uri, status = status.as_u16(), "Normalizing framework error response");
    envelope_error_response(status)
}

fn envelope_error_response(status: StatusCode) -> Response {
    // Body deserialization failures are reported as plain validation failures
    let status = match status {
        StatusCode::UNPROCESSABLE_ENTITY => StatusCode::BAD_REQUEST,
        other => other,
    };

    let message = match status {
        StatusCode::BAD_REQUEST => "Invalid request",
        StatusCode::UNAUTHORIZED => "Authentication required",
        StatusCode::FORBIDDEN => "Access denied",
        StatusCode::NOT_FOUND => "Not found",
        StatusCode::METHOD_NOT_ALLOWED => "Method not allowed",
        StatusCode::REQUEST_TIMEOUT => "Request timed out",
        StatusCode::PAYLOAD_TOO_LARGE => "Request body too large",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "Unsupported content type",
        _ if status.is_client_error() => "Client error",
        _ => "An internal error occurred",
    };

    ApiResult::<()>::failure(status, vec![message.to_string()]).into_response()
}
