//! API handlers for Libris REST endpoints

pub mod auth;
pub mod books;
pub mod borrows;
pub mod health;
pub mod history;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, post, put},
    Router,
};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::{error::AppError, models::session::UserSession, AppState};

/// Plain acknowledgement body
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Extractor for any logged-in user, resolved from the session cookie
pub struct AuthenticatedUser(pub UserSession);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let sessions = &state.services.sessions;
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(sessions.cookie_name())
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(login_required)?;

        let session = sessions.get(&token).await?.ok_or_else(login_required)?;

        Ok(AuthenticatedUser(session))
    }
}

/// Extractor for a logged-in librarian
pub struct LibrarianUser(pub UserSession);

#[async_trait]
impl FromRequestParts<AppState> for LibrarianUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(session) = AuthenticatedUser::from_request_parts(parts, state).await?;
        session.require_librarian()?;
        Ok(LibrarianUser(session))
    }
}

fn login_required() -> AppError {
    AppError::Authorization("Unauthorized! Please log in.".to_string())
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let docs = openapi::create_openapi_router(&state.config.session.cookie_name);

    let routes = Router::new()
        .route("/", get(health::home))
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/register", post(auth::register))
        // Readers
        .route("/books", get(books::list_books))
        .route("/borrow", post(borrows::request_borrow))
        .route("/user/history", get(history::list_history))
        .route("/user/download-history", get(history::download_history))
        // Librarians
        .route("/librarian/books", post(books::add_book))
        .route("/librarian/borrow-requests", get(borrows::list_borrow_requests))
        .route("/librarian/borrow-requests/:id", put(borrows::update_borrow_request))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(docs)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
