//! Borrow request endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::borrow::{BorrowRequest, CreateBorrowRequest, UpdateBorrowStatus},
    AppState,
};

use super::{AuthenticatedUser, LibrarianUser};

/// Borrow request acknowledgement
#[derive(Serialize, ToSchema)]
pub struct BorrowRequestResponse {
    pub message: String,
    pub request: BorrowRequest,
}

/// Request to borrow a book for a date window
#[utoipa::path(
    post,
    path = "/borrow",
    tag = "borrows",
    security(("session_cookie" = [])),
    request_body = CreateBorrowRequest,
    responses(
        (status = 201, description = "Request submitted, pending approval", body = BorrowRequestResponse),
        (status = 400, description = "Invalid window or book already borrowed during this period", body = crate::error::ErrorResponse),
        (status = 403, description = "Not logged in", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn request_borrow(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(request): Json<CreateBorrowRequest>,
) -> AppResult<(StatusCode, Json<BorrowRequestResponse>)> {
    let request = state
        .services
        .borrows
        .request_borrow(session.user_id, request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BorrowRequestResponse {
            message: "Borrow request submitted!".to_string(),
            request,
        }),
    ))
}

/// List all borrow requests
#[utoipa::path(
    get,
    path = "/librarian/borrow-requests",
    tag = "borrows",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Every borrow request", body = Vec<BorrowRequest>),
        (status = 403, description = "Librarian role required", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_borrow_requests(
    State(state): State<AppState>,
    LibrarianUser(_session): LibrarianUser,
) -> AppResult<Json<Vec<BorrowRequest>>> {
    let requests = state.services.borrows.list_requests().await?;
    Ok(Json(requests))
}

/// Approve, reject or reset a borrow request
#[utoipa::path(
    put,
    path = "/librarian/borrow-requests/{id}",
    tag = "borrows",
    security(("session_cookie" = [])),
    params(
        ("id" = i32, Path, description = "Borrow request ID")
    ),
    request_body = UpdateBorrowStatus,
    responses(
        (status = 200, description = "Request updated", body = BorrowRequestResponse),
        (status = 403, description = "Librarian role required", body = crate::error::ErrorResponse),
        (status = 404, description = "Borrow request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_borrow_request(
    State(state): State<AppState>,
    LibrarianUser(session): LibrarianUser,
    Path(request_id): Path<i32>,
    Json(update): Json<UpdateBorrowStatus>,
) -> AppResult<Json<BorrowRequestResponse>> {
    tracing::debug!(librarian_id = session.user_id, request_id, status = %update.status, "Updating borrow request");

    let request = state
        .services
        .borrows
        .update_status(request_id, update.status)
        .await?;

    Ok(Json(BorrowRequestResponse {
        message: "Borrow request updated successfully!".to_string(),
        request,
    }))
}
