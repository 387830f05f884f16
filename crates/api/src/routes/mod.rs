//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::{AppState, middleware::auth::auth_middleware};

pub mod auth;
pub mod expenses;
pub mod health;
pub mod list;
pub mod reports;

/// Creates the API router, wrapping protected routes in the auth middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(expenses::routes())
        .merge(reports::routes())
        .merge(list::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

/// Success body: `{"message", "data"}`.
pub(crate) fn success<T: Serialize>(status: StatusCode, message: &str, data: T) -> Response {
    (status, Json(json!({ "message": message, "data": data }))).into_response()
}

/// Success body without a payload.
pub(crate) fn message_only(message: &str) -> Response {
    (StatusCode::OK, Json(json!({ "message": message }))).into_response()
}
