//! Report routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
};
use chrono::Utc;

use super::success;
use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AuthUser;
use expensa_core::eligibility::CreateReportRequest;
use expensa_db::ReportRepository;
use expensa_shared::AppError;
use expensa_shared::types::ReportId;

/// Creates the report router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports", post(create_report))
        .route("/reports/{id}", get(get_report))
}

/// POST /reports - Bundle expenses into a report if the batch is eligible.
///
/// The engine logs the outcome; rejections are returned as 4xx bodies.
async fn create_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateReportRequest>,
) -> ApiResult<Response> {
    let repo = ReportRepository::new((*state.db).clone());
    let today = Utc::now().date_naive();
    let created = repo.create_report(payload, auth.user_id(), today).await?;

    Ok(success(StatusCode::CREATED, "Report created", created))
}

/// GET /reports/{id} - Fetch one of the caller's reports with its expenses.
async fn get_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ReportId>,
) -> ApiResult<Response> {
    let repo = ReportRepository::new((*state.db).clone());
    let detail = repo
        .find_detail(id, auth.user_id())
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound("Report not found".to_string())))?;

    Ok(success(StatusCode::OK, "Report fetched", detail))
}
