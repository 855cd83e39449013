//! Borrow history repository for database operations

use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::AppResult,
    models::history::{BorrowHistory, NewHistoryEntry},
};

#[derive(Clone)]
pub struct HistoryRepository {
    pool: Pool<Postgres>,
}

impl HistoryRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// History of a user
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<BorrowHistory>> {
        let entries = sqlx::query_as::<_, BorrowHistory>(
            "SELECT * FROM borrow_history WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    /// Append an entry inside an open transaction. The ledger has no update or
    /// delete counterpart.
    pub async fn append(
        tx: &mut Transaction<'_, Postgres>,
        entry: &NewHistoryEntry,
    ) -> AppResult<BorrowHistory> {
        let history = sqlx::query_as::<_, BorrowHistory>(
            r#"
            INSERT INTO borrow_history (user_id, book_id, borrow_date, return_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(entry.user_id)
        .bind(entry.book_id)
        .bind(entry.borrow_date)
        .bind(entry.return_date)
        .fetch_one(&mut **tx)
        .await?;

        Ok(history)
    }
}
