//! Authentication and registration service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    config::LibrarianConfig,
    error::{AppError, AppResult},
    models::user::{NewUser, RegisterRequest, Role, User},
    repository::Repository,
};

const DEFAULT_LIBRARIAN_NAME: &str = "Default Librarian";

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
}

impl AuthService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Authenticate user by email and password
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self
            .repository
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(&user.password, password)? {
            return Err(invalid_credentials());
        }

        Ok(user)
    }

    /// Self-registration. Always creates a regular user; asking for the
    /// librarian role is refused before anything else is looked at.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        ensure_registrable_role(request.role.as_deref())?;
        request.validate()?;

        if self.repository.users.email_exists(&request.email).await? {
            return Err(AppError::Conflict("A user with this email already exists!".to_string()));
        }

        let user = NewUser {
            name: request.name,
            email: request.email,
            password_hash: hash_password(&request.password)?,
            role: Role::User,
        };

        let created = self.repository.users.create(&user).await?;
        tracing::info!(user_id = created.id, "Registered new user");
        Ok(created)
    }

    /// Create the configured librarian account if it does not exist yet.
    /// Returns the account when one was created.
    pub async fn ensure_default_librarian(&self, config: &LibrarianConfig) -> AppResult<Option<User>> {
        let (Some(email), Some(password)) = (config.email.as_deref(), config.password.as_deref()) else {
            tracing::error!("Librarian email or password not set in environment variables");
            return Ok(None);
        };

        if self.repository.users.get_by_email(email).await?.is_some() {
            tracing::debug!("Librarian account {} already present", email);
            return Ok(None);
        }

        let librarian = NewUser {
            name: DEFAULT_LIBRARIAN_NAME.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
            role: Role::Librarian,
        };

        let created = self.repository.users.create(&librarian).await?;
        tracing::info!("Librarian account created with email: {}", email);
        Ok(Some(created))
    }
}

fn invalid_credentials() -> AppError {
    AppError::Authentication("Invalid email or password!".to_string())
}

/// Refuse any attempt to mint a librarian through registration
pub fn ensure_registrable_role(role: Option<&str>) -> AppResult<()> {
    match role {
        Some(role) if role.trim().eq_ignore_ascii_case(Role::Librarian.as_str()) => Err(
            AppError::Authorization("You cannot create a librarian account!".to_string()),
        ),
        _ => Ok(()),
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored Argon2 hash
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
