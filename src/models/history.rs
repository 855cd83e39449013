//! Borrow history ledger entries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::borrow::BorrowRequest;

/// Header line of the CSV export
pub const CSV_HEADER: &str = "Book ID,Borrow Date,Return Date";

/// Approved borrow period, append-only
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowHistory {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub borrow_date: NaiveDate,
    pub return_date: NaiveDate,
}

/// History row derived from an approved request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistoryEntry {
    pub user_id: i32,
    pub book_id: i32,
    pub borrow_date: NaiveDate,
    pub return_date: NaiveDate,
}

impl From<&BorrowRequest> for NewHistoryEntry {
    fn from(request: &BorrowRequest) -> Self {
        Self {
            user_id: request.user_id,
            book_id: request.book_id,
            borrow_date: request.start_date,
            return_date: request.end_date,
        }
    }
}

impl BorrowHistory {
    pub fn csv_line(&self) -> String {
        format!("{},{},{}", self.book_id, self.borrow_date, self.return_date)
    }
}

/// Render history rows as CSV text: header, newline, then rows joined by newlines
pub fn render_csv(entries: &[BorrowHistory]) -> String {
    let rows: Vec<String> = entries.iter().map(BorrowHistory::csv_line).collect();
    format!("{}\n{}", CSV_HEADER, rows.join("\n"))
}
