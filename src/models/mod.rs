//! Data models for Libris

pub mod book;
pub mod borrow;
pub mod history;
pub mod session;
pub mod user;

// Re-export commonly used types
pub use book::{Book, CreateBook, NewBook};
pub use borrow::{BorrowRequest, BorrowStatus, BorrowWindow};
pub use history::BorrowHistory;
pub use session::UserSession;
pub use user::{Role, User};
