//! Business logic services

pub mod auth;
pub mod borrows;
pub mod catalog;
pub mod history;
pub mod sessions;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub borrows: borrows::BorrowsService,
    pub history: history::HistoryService,
    pub sessions: sessions::SessionService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository and session store
    pub fn new(repository: Repository, sessions: sessions::SessionService) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            borrows: borrows::BorrowsService::new(repository.clone()),
            history: history::HistoryService::new(repository.clone()),
            sessions,
            repository,
        }
    }

    /// Check that both the database and the session store answer
    pub async fn check_ready(&self) -> crate::error::AppResult<()> {
        self.repository.ping().await?;
        self.sessions.ping().await
    }
}
