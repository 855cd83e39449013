//! Redis-backed session store
//!
//! A session is a JSON-encoded [`UserSession`] stored under `session:{token}`
//! with an expiration. The token travels in an HttpOnly cookie and is the only
//! thing the client ever sees.

use axum_extra::extract::cookie::{Cookie, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use redis::{AsyncCommands, Client};

use crate::{
    config::SessionConfig,
    error::{AppError, AppResult},
    models::session::UserSession,
};

/// Random bytes per session token
const TOKEN_BYTES: usize = 32;

#[derive(Clone)]
pub struct SessionService {
    client: Client,
    config: SessionConfig,
}

impl SessionService {
    /// Create the session store without contacting Redis
    pub fn new(url: &str, config: SessionConfig) -> AppResult<Self> {
        let client = Client::open(url)?;
        Ok(Self { client, config })
    }

    /// Create the session store and verify that Redis answers
    pub async fn connect(url: &str, config: SessionConfig) -> AppResult<Self> {
        let service = Self::new(url, config)?;
        service.ping().await?;
        Ok(service)
    }

    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(())
    }

    /// Store a new session and return its token
    pub async fn create(&self, session: &UserSession) -> AppResult<String> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let token = generate_token();
        let payload = serde_json::to_string(session)
            .map_err(|e| AppError::Internal(format!("Failed to serialize session: {}", e)))?;

        conn.set_ex::<_, _, ()>(session_key(&token), payload, self.config.ttl_hours * 3600)
            .await?;

        Ok(token)
    }

    /// Look up the session named by a token; expired or unknown tokens yield None
    pub async fn get(&self, token: &str) -> AppResult<Option<UserSession>> {
        if token.is_empty() {
            return Ok(None);
        }

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload: Option<String> = conn.get(session_key(token)).await?;

        payload
            .map(|p| {
                serde_json::from_str(&p)
                    .map_err(|e| AppError::Internal(format!("Corrupted session data: {}", e)))
            })
            .transpose()
    }

    /// Delete a session. Unknown tokens are ignored.
    pub async fn destroy(&self, token: &str) -> AppResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(session_key(token)).await?;
        Ok(())
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Cookie handing a session token to the client
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.config.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.secure_cookie)
            .build()
    }

    /// Cookie matching the session cookie, for removal from the jar
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.config.cookie_name.clone(), "")).path("/").build()
    }
}

fn session_key(token: &str) -> String {
    format!("session:{}", token)
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
