//! Error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;
use tradeline_core::TradeError;
use tradeline_shared::AppError;

/// Maps a domain error to `{ "error": code, "message": text }` with its status.
///
/// Server-side failures are logged and rendered without their details.
pub fn trade_error_response(e: &TradeError) -> Response {
    let status = status_from(e.status_code());
    if status.is_server_error() {
        error!(error = %e, code = e.error_code(), "Request failed");
        return app_error_response(&AppError::Internal("An error occurred".to_string()));
    }
    error_body(status, e.error_code(), &e.to_string())
}

/// Maps an edge failure (auth, request parsing) to an error body.
pub fn app_error_response(e: &AppError) -> Response {
    error_body(status_from(e.status_code()), e.error_code(), &e.to_string())
}

fn status_from(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn error_body(status: StatusCode, error: &str, message: &str) -> Response {
    (
        status,
        Json(json!({
            "error": error,
            "message": message
        })),
    )
        .into_response()
}
