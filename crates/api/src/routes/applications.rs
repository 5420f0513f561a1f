//! Credit application routes.
//!
//! Every mutating route accepts `?version=N` for optimistic concurrency.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tradeline_core::application::{FinalTerms, RequestedTerms};
use tradeline_core::service::FinancialDecision;
use tradeline_core::workflow::PreAnalysisStatus;
use tradeline_shared::AppError;
use tradeline_shared::types::{CreditApplicationId, Currency, Money};

use super::{VersionQuery, respond};
use crate::{AppState, error::app_error_response, middleware::AuthUser};

/// Creates the application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/applications", post(create_application))
        .route("/applications/{id}", get(get_application))
        .route("/applications/{id}/history", get(get_history))
        .route("/applications/{id}/credit", get(get_credit))
        .route("/applications/{id}/quote", post(quote))
        .route("/applications/{id}/submit", post(submit))
        .route("/applications/{id}/cancel", post(cancel))
        .route("/applications/{id}/review", post(start_review))
        .route("/applications/{id}/reject", post(reject))
        .route("/applications/{id}/pre-analysis", post(pre_analysis))
        .route("/applications/{id}/financial-decision", post(financial_decision))
        .route("/applications/{id}/finalize", post(finalize))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for creating an application.
#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    /// Requested credit amount.
    pub amount: Decimal,
    /// Currency of the request and of every import drawn against it.
    pub currency: Currency,
    /// Requested installment day-counts.
    pub terms: Vec<u32>,
}

/// Request body for a review rejection.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    /// Why the application is turned down.
    pub reason: String,
}

/// Request body for a pre-analysis move.
#[derive(Debug, Deserialize)]
pub struct PreAnalysisRequest {
    /// Target pre-analysis status.
    pub status: String,
    /// Optional reviewer note.
    pub note: Option<String>,
}

/// Request body for pricing an import.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    /// FOB value of the goods.
    pub fob: Decimal,
    /// Currency of the FOB value.
    pub currency: Currency,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/applications` - Create a draft application.
async fn create_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateApplicationRequest>,
) -> impl IntoResponse {
    let requested = RequestedTerms {
        amount: Money::new(payload.amount, payload.currency),
        terms: payload.terms,
    };
    respond(
        state.service.create_application(auth.actor(), requested).await,
        StatusCode::CREATED,
    )
}

/// GET `/applications/{id}` - Read an application.
async fn get_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CreditApplicationId>,
) -> impl IntoResponse {
    respond(state.service.application(auth.actor(), id).await, StatusCode::OK)
}

/// GET `/applications/{id}/history` - Status transitions, oldest first.
async fn get_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CreditApplicationId>,
) -> impl IntoResponse {
    respond(state.service.status_history(auth.actor(), id).await, StatusCode::OK)
}

/// GET `/applications/{id}/credit` - Limit, usage and available credit.
async fn get_credit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CreditApplicationId>,
) -> impl IntoResponse {
    respond(state.service.credit_summary(auth.actor(), id).await, StatusCode::OK)
}

/// POST `/applications/{id}/quote` - Price an import without reserving credit.
async fn quote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CreditApplicationId>,
    Json(payload): Json<QuoteRequest>,
) -> impl IntoResponse {
    let fob = Money::new(payload.fob, payload.currency);
    respond(state.service.quote(auth.actor(), id, fob).await, StatusCode::OK)
}

/// POST `/applications/{id}/submit` - Importer submits a draft.
async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CreditApplicationId>,
    Query(query): Query<VersionQuery>,
) -> impl IntoResponse {
    respond(
        state
            .service
            .submit_application(auth.actor(), id, query.version)
            .await,
        StatusCode::OK,
    )
}

/// POST `/applications/{id}/cancel` - Importer withdraws the application.
async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CreditApplicationId>,
    Query(query): Query<VersionQuery>,
) -> impl IntoResponse {
    respond(
        state
            .service
            .cancel_application(auth.actor(), id, query.version)
            .await,
        StatusCode::OK,
    )
}

/// POST `/applications/{id}/review` - Reviewer picks the application up.
async fn start_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CreditApplicationId>,
    Query(query): Query<VersionQuery>,
) -> impl IntoResponse {
    respond(
        state.service.start_review(auth.actor(), id, query.version).await,
        StatusCode::OK,
    )
}

/// POST `/applications/{id}/reject` - Reviewer rejects with a reason.
async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CreditApplicationId>,
    Query(query): Query<VersionQuery>,
    Json(payload): Json<RejectRequest>,
) -> impl IntoResponse {
    respond(
        state
            .service
            .reject_application(auth.actor(), id, payload.reason, query.version)
            .await,
        StatusCode::OK,
    )
}

/// POST `/applications/{id}/pre-analysis` - Reviewer moves the pre-analysis axis.
async fn pre_analysis(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CreditApplicationId>,
    Query(query): Query<VersionQuery>,
    Json(payload): Json<PreAnalysisRequest>,
) -> impl IntoResponse {
    let Some(to) = PreAnalysisStatus::parse(&payload.status) else {
        return app_error_response(&AppError::Validation(format!(
            "unknown pre-analysis status '{}'",
            payload.status
        )));
    };
    respond(
        state
            .service
            .record_pre_analysis_decision(auth.actor(), id, to, payload.note, query.version)
            .await,
        StatusCode::OK,
    )
}

/// POST `/applications/{id}/financial-decision` - Financial institution decides.
async fn financial_decision(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CreditApplicationId>,
    Query(query): Query<VersionQuery>,
    Json(decision): Json<FinancialDecision>,
) -> impl IntoResponse {
    respond(
        state
            .service
            .record_financial_decision(auth.actor(), id, decision, query.version)
            .await,
        StatusCode::OK,
    )
}

/// POST `/applications/{id}/finalize` - Admin publishes the final terms.
async fn finalize(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CreditApplicationId>,
    Query(query): Query<VersionQuery>,
    Json(terms): Json<FinalTerms>,
) -> impl IntoResponse {
    respond(
        state
            .service
            .finalize_admin(auth.actor(), id, terms, query.version)
            .await,
        StatusCode::OK,
    )
}
