//! Catalog endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook},
    AppState,
};

use super::{AuthenticatedUser, LibrarianUser};

/// Book creation response
#[derive(Serialize, ToSchema)]
pub struct BookCreatedResponse {
    pub message: String,
    pub book: Book,
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "All books in the catalog", body = Vec<Book>),
        (status = 403, description = "Not logged in", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/librarian/books",
    tag = "books",
    security(("session_cookie" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookCreatedResponse),
        (status = 400, description = "Missing fields or ISBN already exists", body = crate::error::ErrorResponse),
        (status = 403, description = "Librarian role required", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    LibrarianUser(_session): LibrarianUser,
    Json(request): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<BookCreatedResponse>)> {
    let book = state.services.catalog.add_book(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookCreatedResponse {
            message: "Book added successfully!".to_string(),
            book,
        }),
    ))
}
