//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tradeline_core::TradeError;

use crate::{AppState, error::trade_error_response, middleware::auth_middleware};

pub mod applications;
pub mod health;
pub mod imports;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(applications::routes())
        .merge(imports::routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}

/// Optimistic concurrency token for mutating routes: `?version=N`.
#[derive(Debug, Default, Deserialize)]
pub struct VersionQuery {
    /// Version the caller last read. Omitted means "whatever is current".
    pub version: Option<u64>,
}

/// Renders `result` as JSON with `status`, or as an error body.
fn respond<T: Serialize>(result: Result<T, TradeError>, status: StatusCode) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(e) => trade_error_response(&e),
    }
}
