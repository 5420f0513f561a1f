//! Import and payment schedule routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tradeline_core::import::ImportStage;
use tradeline_core::service::PaymentEdit;
use tradeline_core::store::ImportRecord;
use tradeline_shared::AppError;
use tradeline_shared::types::{CreditApplicationId, Currency, ImportId, Money, PaymentEntryId};

use super::{VersionQuery, respond};
use crate::{AppState, error::app_error_response, middleware::AuthUser};

/// Creates the import routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/applications/{id}/imports", post(create_import))
        .route("/imports/{import_id}", get(get_import))
        .route("/imports/{import_id}/cancel", post(cancel_import))
        .route("/imports/{import_id}/stage", post(advance_stage))
        .route("/imports/{import_id}/payments", get(list_payments))
        .route("/imports/{import_id}/payments/{entry_id}", patch(edit_payment))
        .route("/imports/{import_id}/payments/{entry_id}/pay", post(pay))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating an import.
#[derive(Debug, Deserialize)]
pub struct CreateImportRequest {
    /// FOB value of the goods.
    pub fob: Decimal,
    /// Currency of the FOB value. Must match the application.
    pub currency: Currency,
}

/// Request body for a stage change.
#[derive(Debug, Deserialize)]
pub struct StageRequest {
    /// Target stage.
    pub stage: String,
}

/// Query parameters for reading a schedule.
#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    /// Date the statuses are evaluated on (YYYY-MM-DD). Defaults to today.
    pub today: Option<NaiveDate>,
}

/// Request body for recording a payment.
#[derive(Debug, Deserialize)]
pub struct PayRequest {
    /// Settlement date (YYYY-MM-DD).
    pub paid_on: NaiveDate,
}

/// Response for an import with its schedule.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    /// The import and its schedule.
    #[serde(flatten)]
    pub record: ImportRecord,
    /// Financed amount plus admin fee.
    pub outstanding_after_down_payment: Decimal,
}

impl From<ImportRecord> for ImportResponse {
    fn from(record: ImportRecord) -> Self {
        Self {
            outstanding_after_down_payment: record.import.breakdown.outstanding_after_down_payment(),
            record,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/applications/{id}/imports` - Create an import and reserve its credit.
async fn create_import(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CreditApplicationId>,
    Query(query): Query<VersionQuery>,
    Json(payload): Json<CreateImportRequest>,
) -> impl IntoResponse {
    let fob = Money::new(payload.fob, payload.currency);
    respond(
        state
            .service
            .create_import(auth.actor(), id, fob, query.version)
            .await
            .map(ImportResponse::from),
        StatusCode::CREATED,
    )
}

/// GET `/imports/{import_id}` - Read an import with its schedule.
async fn get_import(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(import_id): Path<ImportId>,
) -> impl IntoResponse {
    respond(
        state
            .service
            .import(auth.actor(), import_id)
            .await
            .map(ImportResponse::from),
        StatusCode::OK,
    )
}

/// POST `/imports/{import_id}/cancel` - Cancel an import and release its credit.
async fn cancel_import(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(import_id): Path<ImportId>,
    Query(query): Query<VersionQuery>,
) -> impl IntoResponse {
    respond(
        state
            .service
            .cancel_import(auth.actor(), import_id, query.version)
            .await
            .map(ImportResponse::from),
        StatusCode::OK,
    )
}

/// POST `/imports/{import_id}/stage` - Move an import to its next stage.
async fn advance_stage(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(import_id): Path<ImportId>,
    Query(query): Query<VersionQuery>,
    Json(payload): Json<StageRequest>,
) -> impl IntoResponse {
    let Some(stage) = ImportStage::parse(&payload.stage) else {
        return app_error_response(&AppError::Validation(format!(
            "unknown import stage '{}'",
            payload.stage
        )));
    };
    respond(
        state
            .service
            .advance_import_stage(auth.actor(), import_id, stage, query.version)
            .await
            .map(ImportResponse::from),
        StatusCode::OK,
    )
}

/// GET `/imports/{import_id}/payments` - Schedule as it stands on `today`.
async fn list_payments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(import_id): Path<ImportId>,
    Query(query): Query<ScheduleQuery>,
) -> impl IntoResponse {
    respond(
        state
            .service
            .payment_schedule(auth.actor(), import_id, query.today)
            .await,
        StatusCode::OK,
    )
}

/// PATCH `/imports/{import_id}/payments/{entry_id}` - Admin edits an unpaid entry.
async fn edit_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((import_id, entry_id)): Path<(ImportId, PaymentEntryId)>,
    Query(query): Query<VersionQuery>,
    Json(edit): Json<PaymentEdit>,
) -> impl IntoResponse {
    respond(
        state
            .service
            .edit_payment_entry(auth.actor(), import_id, entry_id, edit, query.version)
            .await,
        StatusCode::OK,
    )
}

/// POST `/imports/{import_id}/payments/{entry_id}/pay` - Record a payment.
async fn pay(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((import_id, entry_id)): Path<(ImportId, PaymentEntryId)>,
    Query(query): Query<VersionQuery>,
    Json(payload): Json<PayRequest>,
) -> impl IntoResponse {
    respond(
        state
            .service
            .record_payment(auth.actor(), import_id, entry_id, payload.paid_on, query.version)
            .await,
        StatusCode::OK,
    )
}
