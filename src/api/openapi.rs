//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, borrows, health, history};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "1.0.0",
        description = "Library borrowing REST API"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::logout,
        auth::register,
        // Books
        books::list_books,
        books::add_book,
        // Borrows
        borrows::request_borrow,
        borrows::list_borrow_requests,
        borrows::update_borrow_request,
        // History
        history::list_history,
        history::download_history,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            crate::models::user::RegisterRequest,
            crate::models::user::Role,
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            books::BookCreatedResponse,
            // Borrows
            crate::models::borrow::BorrowRequest,
            crate::models::borrow::BorrowStatus,
            crate::models::borrow::CreateBorrowRequest,
            crate::models::borrow::UpdateBorrowStatus,
            borrows::BorrowRequestResponse,
            // History
            crate::models::history::BorrowHistory,
            history::CsvExport,
            // Common
            crate::api::MessageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Login, logout and registration"),
        (name = "books", description = "Book catalog"),
        (name = "borrows", description = "Borrow requests"),
        (name = "history", description = "Borrow history")
    )
)]
pub struct ApiDoc;

/// Declares the session cookie used by the `security` entries of each path
struct SessionCookieAddon<'a> {
    cookie_name: &'a str,
}

impl Modify for SessionCookieAddon<'_> {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(self.cookie_name))),
            );
        }
    }
}

/// Build the OpenAPI document for the configured session cookie name
pub fn api_doc(cookie_name: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    SessionCookieAddon { cookie_name }.modify(&mut doc);
    doc
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router(cookie_name: &str) -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api_doc(cookie_name)))
}
