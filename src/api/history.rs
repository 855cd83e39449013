//! Borrow history endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::history::BorrowHistory, AppState};

use super::AuthenticatedUser;

/// CSV export wrapper
#[derive(Serialize, ToSchema)]
pub struct CsvExport {
    /// Header `Book ID,Borrow Date,Return Date` followed by one line per entry
    pub csv: String,
}

/// Borrow history of the logged-in user
#[utoipa::path(
    get,
    path = "/user/history",
    tag = "history",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Approved borrow periods", body = Vec<BorrowHistory>),
        (status = 403, description = "Not logged in", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_history(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowHistory>>> {
    let history = state.services.history.list_for_user(session.user_id).await?;
    Ok(Json(history))
}

/// Borrow history of the logged-in user as CSV
#[utoipa::path(
    get,
    path = "/user/download-history",
    tag = "history",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "History as CSV text", body = CsvExport),
        (status = 403, description = "Not logged in", body = crate::error::ErrorResponse)
    )
)]
pub async fn download_history(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
) -> AppResult<Json<CsvExport>> {
    let csv = state.services.history.export_csv(session.user_id).await?;
    Ok(Json(CsvExport { csv }))
}
