//! Libris Library Borrowing Server
//!
//! REST JSON API for a small lending library: readers browse the catalog and
//! request borrow windows, librarians manage books and approve or reject the
//! requests. Approved requests are recorded in a per-user borrow history.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
