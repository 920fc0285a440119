use super::session::{BrowseSession, SessionId};

/// Storage abstraction so the browse service can run against any backend.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, session: BrowseSession) -> Result<BrowseSession, RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<BrowseSession>, RepositoryError>;

    /// Runs `change` against the stored session with exclusive access, so
    /// concurrent gestures on one session apply one after another.
    fn modify<T, F>(&self, id: &SessionId, change: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut BrowseSession) -> T;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
