//! Authentication middleware for protected routes.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tradeline_core::workflow::{Actor, ActorRole};
use tradeline_shared::{AppError, Claims, JwtError};

use crate::AppState;
use crate::error::app_error_response;

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Builds the acting user from validated claims.
///
/// Importer users must name the importer they act for.
fn actor_from_claims(claims: &Claims) -> Result<Actor, Response> {
    let Some(role) = ActorRole::parse(&claims.role) else {
        return Err(app_error_response(&AppError::Forbidden(format!(
            "role '{}' is not recognized",
            claims.role
        ))));
    };
    let user_id = claims.user_id();

    match (role, claims.importer_id()) {
        (ActorRole::Importer, Some(importer)) => Ok(Actor::importer(user_id, importer)),
        (ActorRole::Importer, None) => Err(app_error_response(&AppError::Forbidden(
            "importer tokens must carry the importer claim".to_string(),
        ))),
        (role, _) => Ok(Actor::staff(user_id, role)),
    }
}

/// Authentication middleware that validates JWT tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the JWT service
/// 3. Stores the acting user in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "missing_token",
                "message": "Authorization header with Bearer token is required"
            })),
        )
            .into_response();
    };

    match state.jwt_service.verify(token) {
        Ok(claims) => match actor_from_claims(&claims) {
            Ok(actor) => {
                request.extensions_mut().insert(actor);
                next.run(request).await
            }
            Err(response) => response,
        },
        Err(e) => {
            let (status, error, message) = match e {
                JwtError::Expired => (
                    StatusCode::UNAUTHORIZED,
                    "token_expired",
                    "Token has expired",
                ),
                _ => (
                    StatusCode::UNAUTHORIZED,
                    "invalid_token",
                    "Invalid or malformed token",
                ),
            };

            (status, Json(json!({ "error": error, "message": message }))).into_response()
        }
    }
}

/// Extractor for the authenticated actor.
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let role = auth.actor().role;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Actor);

impl AuthUser {
    /// Returns the acting user.
    #[must_use]
    pub fn actor(&self) -> &Actor {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Actor>()
            .copied()
            .map(AuthUser)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "unauthorized",
                        "message": "Authentication required"
                    })),
                )
            })
    }
}
