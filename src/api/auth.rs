//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{session::UserSession, user::RegisterRequest},
    AppState,
};

use super::MessageResponse;

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Open a session
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, session cookie set", body = MessageResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<MessageResponse>)> {
    let sessions = &state.services.sessions;

    let user = match state.services.auth.authenticate(&request.email, &request.password).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Failed login attempt for {}", request.email);
            return Err(e);
        }
    };

    // Never reuse a token the client already held
    if let Some(previous) = jar.get(sessions.cookie_name()) {
        sessions.destroy(previous.value()).await?;
    }

    let token = sessions.create(&UserSession::from(&user)).await?;
    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    Ok((
        jar.add(sessions.session_cookie(token)),
        Json(MessageResponse::new("Login successful!")),
    ))
}

/// Close the current session, if any
#[utoipa::path(
    post,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<MessageResponse>)> {
    let sessions = &state.services.sessions;

    if let Some(cookie) = jar.get(sessions.cookie_name()) {
        if !cookie.value().is_empty() {
            sessions.destroy(cookie.value()).await?;
        }
    }

    Ok((
        jar.remove(sessions.removal_cookie()),
        Json(MessageResponse::new("Logged out successfully!")),
    ))
}

/// Register a reader account
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = MessageResponse),
        (status = 400, description = "Invalid input or email already registered", body = crate::error::ErrorResponse),
        (status = 403, description = "Librarian accounts cannot be registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.services.auth.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully!")),
    ))
}
