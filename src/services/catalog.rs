//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all books
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Add a book to the catalog. ISBNs are unique.
    pub async fn add_book(&self, request: CreateBook) -> AppResult<Book> {
        let book = request.into_new_book()?;

        if self.repository.books.isbn_exists(&book.isbn).await? {
            return Err(AppError::Conflict("A book with this ISBN already exists!".to_string()));
        }

        let created = self.repository.books.create(&book).await?;
        tracing::info!(book_id = created.id, isbn = %created.isbn, "Book added to catalog");
        Ok(created)
    }
}
