//! Borrow history ledger service

use crate::{
    error::AppResult,
    models::history::{render_csv, BorrowHistory},
    repository::Repository,
};

#[derive(Clone)]
pub struct HistoryService {
    repository: Repository,
}

impl HistoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow history of a user
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<BorrowHistory>> {
        self.repository.history.list_for_user(user_id).await
    }

    /// Borrow history of a user as CSV text
    pub async fn export_csv(&self, user_id: i32) -> AppResult<String> {
        let entries = self.list_for_user(user_id).await?;
        Ok(render_csv(&entries))
    }
}
