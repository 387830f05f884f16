//! Expense routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
};
use tracing::info;

use super::success;
use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::auth::AuthUser;
use expensa_core::expense::{CreateExpenseInput, ExpenseError, ExpenseService};
use expensa_core::listing::ExpenseSummary;
use expensa_db::ExpenseRepository;
use expensa_shared::types::ExpenseId;

/// Creates the expense router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", post(create_expense))
        .route("/expenses/{id}", get(get_expense))
}

/// POST /expenses - File a new unmapped expense.
async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateExpenseInput>,
) -> ApiResult<Response> {
    let input = ExpenseService::validate_new(payload)?;
    let repo = ExpenseRepository::new((*state.db).clone());
    let expense = repo.create(auth.user_id(), input).await?;

    info!(
        user_id = %auth.user_id(),
        expense_id = %expense.id,
        amount = %expense.amount,
        "Expense created"
    );
    Ok(success(
        StatusCode::CREATED,
        "Expense created",
        ExpenseSummary::from(&expense),
    ))
}

/// GET /expenses/{id} - Fetch one of the caller's expenses.
async fn get_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ExpenseId>,
) -> ApiResult<Response> {
    let repo = ExpenseRepository::new((*state.db).clone());
    let expense = repo
        .find_owned(id, auth.user_id())
        .await?
        .ok_or(ExpenseError::NotFound(id))?;

    Ok(success(
        StatusCode::OK,
        "Expense fetched",
        ExpenseSummary::from(&expense),
    ))
}
