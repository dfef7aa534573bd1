use async_trait::async_trait;

use crate::{session::Session, session_api::api_error::ApiError};

/// Persistence of single-table sessions, whichever backend holds them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn list_sessions(&self) -> Result<Vec<Session>, ApiError>;

    /// Updates persisted sessions and creates drafts, returning the record as
    /// stored by the backend.
    async fn save_session(&self, session: &Session) -> Result<Session, ApiError>;

    async fn delete_session(&self, id: i64) -> Result<(), ApiError>;
}
