//! Borrow request model and borrow windows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgTypeInfo, Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Borrow request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BorrowStatus {
    Pending,
    Approved,
    Rejected,
}

impl BorrowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorrowStatus::Pending => "pending",
            BorrowStatus::Approved => "approved",
            BorrowStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for BorrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BorrowStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(BorrowStatus::Pending),
            "approved" => Ok(BorrowStatus::Approved),
            "rejected" => Ok(BorrowStatus::Rejected),
            _ => Err(format!("Invalid borrow status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for BorrowStatus {
    fn type_info() -> PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for BorrowStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for BorrowStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// Inclusive date range during which a user holds a book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorrowWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl BorrowWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start > end {
            return Err(AppError::Validation(
                "start_date must not be after end_date".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Two windows intersect when each one starts no later than the other ends.
    pub fn overlaps(&self, other: &BorrowWindow) -> bool {
        other.start <= self.end && other.end >= self.start
    }
}

/// Borrow request model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowRequest {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BorrowStatus,
}

impl BorrowRequest {
    pub fn window(&self) -> BorrowWindow {
        BorrowWindow {
            start: self.start_date,
            end: self.end_date,
        }
    }
}

/// Borrow request submitted by a user
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBorrowRequest {
    pub book_id: i32,
    /// First day of the loan (YYYY-MM-DD)
    pub start_date: NaiveDate,
    /// Last day of the loan (YYYY-MM-DD)
    pub end_date: NaiveDate,
}

/// Status change decided by a librarian
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBorrowStatus {
    pub status: BorrowStatus,
}
