//! Paginated listing of reports, expenses, notifications and events.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::auth::AuthUser;
use expensa_core::listing::{EventSummary, ExpenseSummary, ListKind, ListingError};
use expensa_db::{EventRepository, ExpenseRepository, NotificationRepository, ReportRepository};
use expensa_shared::types::{PageRequest, PageResponse};

/// Query string for `GET /list`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Collection to list.
    #[serde(rename = "type")]
    pub kind: ListKind,
    /// 1-indexed page number.
    #[serde(rename = "pageNo")]
    pub page_no: Option<u32>,
}

/// Creates the listing router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/list", get(list))
}

/// GET /list?type=&pageNo= - One page of the caller's rows.
async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<Response> {
    let db = (*state.db).clone();
    let user = auth.user_id();
    let page = PageRequest::new(query.page_no.unwrap_or(1));

    match query.kind {
        ListKind::Reports => {
            let (rows, total) = ReportRepository::new(db).list(user, page).await?;
            paged(query.kind, PageResponse::new(rows, page, total))
        }
        ListKind::Expenses => {
            let (rows, total) = ExpenseRepository::new(db).list(user, page).await?;
            let rows = rows.iter().map(ExpenseSummary::from).collect();
            paged(query.kind, PageResponse::new(rows, page, total))
        }
        ListKind::Notifications => {
            let (rows, total) = NotificationRepository::new(db).list(user, page).await?;
            paged(query.kind, PageResponse::new(rows, page, total))
        }
        ListKind::Events => {
            let (rows, total) = EventRepository::new(db).list_for_staff(user, page).await?;
            let rows = rows.iter().map(EventSummary::from).collect();
            paged(query.kind, PageResponse::new(rows, page, total))
        }
    }
}

/// Renders a page, or NotFound when it holds no rows.
fn paged<T: Serialize>(kind: ListKind, page: PageResponse<T>) -> ApiResult<Response> {
    if page.is_empty() {
        return Err(ListingError::Empty(kind).into());
    }

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": format!("{} fetched", capitalize(kind.as_str())),
            "data": page.data,
            "total": page.meta.total,
            "totalPages": page.meta.total_pages,
        })),
    )
        .into_response())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
