//! Borrow requests repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        borrow::{BorrowRequest, BorrowStatus, BorrowWindow},
        history::{BorrowHistory, NewHistoryEntry},
    },
};

use super::history::HistoryRepository;

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List every borrow request, whatever its status
    pub async fn list(&self) -> AppResult<Vec<BorrowRequest>> {
        let requests = sqlx::query_as::<_, BorrowRequest>("SELECT * FROM borrow_requests ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(requests)
    }

    /// Approved requests for a book
    pub async fn list_approved_for_book(&self, book_id: i32) -> AppResult<Vec<BorrowRequest>> {
        let requests = sqlx::query_as::<_, BorrowRequest>(
            "SELECT * FROM borrow_requests WHERE book_id = $1 AND status = $2 ORDER BY start_date",
        )
        .bind(book_id)
        .bind(BorrowStatus::Approved)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    /// Create a pending borrow request
    pub async fn create(&self, user_id: i32, book_id: i32, window: BorrowWindow) -> AppResult<BorrowRequest> {
        let request = sqlx::query_as::<_, BorrowRequest>(
            r#"
            INSERT INTO borrow_requests (user_id, book_id, start_date, end_date, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(window.start())
        .bind(window.end())
        .bind(BorrowStatus::Pending)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    /// Set a request's status. Setting it to approved appends a history entry
    /// in the same transaction.
    pub async fn update_status(
        &self,
        id: i32,
        status: BorrowStatus,
    ) -> AppResult<(BorrowRequest, Option<BorrowHistory>)> {
        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, BorrowRequest>(
            "UPDATE borrow_requests SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Borrow request not found!".to_string()))?;

        let entry = if status == BorrowStatus::Approved {
            let entry = NewHistoryEntry::from(&request);
            Some(HistoryRepository::append(&mut tx, &entry).await?)
        } else {
            None
        };

        tx.commit().await?;

        Ok((request, entry))
    }
}
