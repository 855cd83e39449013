//! Server-side session data

use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::user::{Role, User};

/// Identity bound to a session token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub user_id: i32,
    pub role: Role,
}

impl From<&User> for UserSession {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
        }
    }
}

impl UserSession {
    // Authorization checks
    pub fn require_librarian(&self) -> Result<(), AppError> {
        if self.role == Role::Librarian {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Unauthorized! Only librarians are allowed.".to_string(),
            ))
        }
    }
}
