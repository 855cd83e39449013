//! Book (catalog) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: String,
    /// Number of physical copies held
    pub copies: i32,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    /// Defaults to 1
    #[validate(range(min = 0, message = "Copies cannot be negative"))]
    pub copies: Option<i32>,
}

/// Validated book ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub copies: i32,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CreateBook {
    /// Check required fields and apply defaults
    pub fn into_new_book(self) -> AppResult<NewBook> {
        self.validate()?;

        match (present(self.title), present(self.author), present(self.isbn)) {
            (Some(title), Some(author), Some(isbn)) => Ok(NewBook {
                title,
                author,
                isbn,
                copies: self.copies.unwrap_or(1),
            }),
            _ => Err(AppError::Validation(
                "Missing required fields: title, author, or isbn.".to_string(),
            )),
        }
    }
}
