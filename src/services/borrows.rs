//! Borrow request workflow

use crate::{
    error::{AppError, AppResult},
    models::borrow::{BorrowRequest, BorrowStatus, BorrowWindow, CreateBorrowRequest},
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
}

impl BorrowsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Submit a borrow request for the given user.
    ///
    /// Only approved requests count as conflicts: pending requests for the
    /// same window are accepted, and the number of copies is not considered.
    pub async fn request_borrow(&self, user_id: i32, request: CreateBorrowRequest) -> AppResult<BorrowRequest> {
        let window = BorrowWindow::new(request.start_date, request.end_date)?;

        // Verify book exists
        self.repository.books.get_by_id(request.book_id).await?;

        let approved = self
            .repository
            .borrows
            .list_approved_for_book(request.book_id)
            .await?;

        if let Some(existing) = find_conflict(&approved, &window) {
            tracing::info!(
                book_id = request.book_id,
                conflicting_request = existing.id,
                "Borrow request overlaps an approved borrow"
            );
            return Err(AppError::Conflict(
                "Book is already borrowed during this period!".to_string(),
            ));
        }

        let created = self
            .repository
            .borrows
            .create(user_id, request.book_id, window)
            .await?;
        tracing::info!(request_id = created.id, user_id, book_id = created.book_id, "Borrow request submitted");
        Ok(created)
    }

    /// List every borrow request
    pub async fn list_requests(&self) -> AppResult<Vec<BorrowRequest>> {
        self.repository.borrows.list().await
    }

    /// Set the status of a request. Every approval records a history entry;
    /// no transition is forbidden and overlap is not checked again here.
    pub async fn update_status(&self, request_id: i32, status: BorrowStatus) -> AppResult<BorrowRequest> {
        let (request, history) = self
            .repository
            .borrows
            .update_status(request_id, status)
            .await?;

        match history {
            Some(entry) => tracing::info!(
                request_id,
                history_id = entry.id,
                "Borrow request approved, history recorded"
            ),
            None => tracing::info!(request_id, status = %status, "Borrow request updated"),
        }

        Ok(request)
    }
}

/// First approved request whose window intersects the requested one
fn find_conflict<'a>(approved: &'a [BorrowRequest], window: &BorrowWindow) -> Option<&'a BorrowRequest> {
    approved.iter().find(|existing| existing.window().overlaps(window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn approved(id: i32, start: &str, end: &str) -> BorrowRequest {
        BorrowRequest {
            id,
            user_id: 1,
            book_id: 1,
            start_date: date(start),
            end_date: date(end),
            status: BorrowStatus::Approved,
        }
    }

    #[test]
    fn test_conflict_scenario() {
        let existing = vec![approved(1, "2024-01-01", "2024-01-10")];

        let overlapping = BorrowWindow::new(date("2024-01-05"), date("2024-01-06")).unwrap();
        assert_eq!(find_conflict(&existing, &overlapping).map(|r| r.id), Some(1));

        let later = BorrowWindow::new(date("2024-02-01"), date("2024-02-05")).unwrap();
        assert!(find_conflict(&existing, &later).is_none());
    }

    #[test]
    fn test_no_approved_requests_means_no_conflict() {
        let window = BorrowWindow::new(date("2024-01-01"), date("2024-01-10")).unwrap();
        assert!(find_conflict(&[], &window).is_none());
    }

    #[test]
    fn test_conflict_picks_the_overlapping_one() {
        let existing = vec![
            approved(1, "2024-01-01", "2024-01-10"),
            approved(2, "2024-03-01", "2024-03-10"),
        ];
        let window = BorrowWindow::new(date("2024-03-10"), date("2024-03-12")).unwrap();
        assert_eq!(find_conflict(&existing, &window).map(|r| r.id), Some(2));
    }
}
