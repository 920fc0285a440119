use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use wc_vax::browse::{BrowseSession, RepositoryError, SessionId, SessionRepository};
use wc_vax::catalog::{Catalog, VaccineType};
use wc_vax::config::{AppConfig, CatalogConfig};
use wc_vax::error::AppError;

/// Sessions kept before the oldest are evicted.
pub(crate) const DEFAULT_SESSION_CAPACITY: usize = 10_000;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct SessionStore {
    sessions: HashMap<SessionId, BrowseSession>,
    arrivals: VecDeque<SessionId>,
}

/// Bounded in-process session store. Once full, opening a session evicts the
/// oldest one, which then answers 404.
#[derive(Clone)]
pub(crate) struct InMemorySessionRepository {
    store: Arc<Mutex<SessionStore>>,
    capacity: usize,
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SESSION_CAPACITY)
    }
}

impl InMemorySessionRepository {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Arc::new(Mutex::new(SessionStore::default())),
            capacity: capacity.max(1),
        }
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, session: BrowseSession) -> Result<BrowseSession, RepositoryError> {
        let mut guard = self.store.lock().expect("session mutex poisoned");
        if guard.sessions.contains_key(&session.id) {
            return Err(RepositoryError::Conflict);
        }
        while guard.sessions.len() >= self.capacity {
            let Some(oldest) = guard.arrivals.pop_front() else {
                break;
            };
            guard.sessions.remove(&oldest);
            debug!(session_id = %oldest, "evicted oldest browse session");
        }
        guard.arrivals.push_back(session.id.clone());
        guard.sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<BrowseSession>, RepositoryError> {
        let guard = self.store.lock().expect("session mutex poisoned");
        Ok(guard.sessions.get(id).cloned())
    }

    fn modify<T, F>(&self, id: &SessionId, change: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut BrowseSession) -> T,
    {
        let mut guard = self.store.lock().expect("session mutex poisoned");
        let session = guard.sessions.get_mut(id).ok_or(RepositoryError::NotFound)?;
        Ok(change(session))
    }
}

/// Command-line path wins over `APP_CATALOG_PATH`; neither means the bundled list.
pub(crate) fn load_catalog(
    override_path: Option<PathBuf>,
    config: &CatalogConfig,
) -> Result<Catalog, AppError> {
    match override_path.or_else(|| config.path.clone()) {
        Some(path) => Ok(Catalog::from_path(path)?),
        None => {
            let catalog = Catalog::builtin();
            info!(locations = catalog.len(), "using bundled location catalog");
            Ok(catalog)
        }
    }
}

/// Environment config plus the catalog it selects, for the terminal commands.
pub(crate) fn load_config_and_catalog(
    override_path: Option<PathBuf>,
) -> Result<(AppConfig, Catalog), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(override_path, &config.catalog)?;
    Ok((config, catalog))
}

pub(crate) fn parse_vaccine(raw: &str) -> Result<VaccineType, String> {
    raw.parse::<VaccineType>().map_err(|err| err.to_string())
}

#[cfg(test)]
pub(crate) fn env_guard() -> &'static Mutex<()> {
    static GUARD: std::sync::OnceLock<Mutex<()>> = std::sync::OnceLock::new();
    GUARD.get_or_init(|| Mutex::new(()))
}
