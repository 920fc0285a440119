use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::browse::region::DEFAULT_CENTER;
use crate::browse::repository::{RepositoryError, SessionRepository};
use crate::browse::session::{BrowseSession, SessionId};
use crate::browse::{browse_router, BrowseService};
use crate::catalog::Catalog;

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    sessions: Arc<Mutex<HashMap<SessionId, BrowseSession>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.sessions.lock().expect("session mutex poisoned").len()
    }
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, session: BrowseSession) -> Result<BrowseSession, RepositoryError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        if guard.contains_key(&session.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<BrowseSession>, RepositoryError> {
        let guard = self.sessions.lock().expect("session mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn modify<T, F>(&self, id: &SessionId, change: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut BrowseSession) -> T,
    {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        let session = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        Ok(change(session))
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _session: BrowseSession) -> Result<BrowseSession, RepositoryError> {
        Err(RepositoryError::Unavailable("cache offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<BrowseSession>, RepositoryError> {
        Err(RepositoryError::Unavailable("cache offline".to_string()))
    }

    fn modify<T, F>(&self, _id: &SessionId, _change: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut BrowseSession) -> T,
    {
        Err(RepositoryError::Unavailable("cache offline".to_string()))
    }
}

pub(super) fn build_service() -> (BrowseService<MemoryRepository>, MemoryRepository) {
    let repository = MemoryRepository::default();
    let service = BrowseService::new(
        Arc::new(Catalog::builtin()),
        Arc::new(repository.clone()),
        DEFAULT_CENTER,
    );
    (service, repository)
}

pub(super) fn browse_router_with_service(
    service: BrowseService<MemoryRepository>,
) -> axum::Router {
    browse_router(Arc::new(service))
}

pub(super) fn titles(payload: &Value) -> Vec<String> {
    payload
        .get("locations")
        .and_then(Value::as_array)
        .map(|locations| {
            locations
                .iter()
                .filter_map(|location| location.get("title").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
