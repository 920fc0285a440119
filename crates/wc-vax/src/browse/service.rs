use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use super::repository::{RepositoryError, SessionRepository};
use super::screen::{BrowseError, FilterAction, Screen};
use super::session::{BrowseSession, SessionId};
use super::views::{MapUpdate, ScreenView, SessionView};
use crate::catalog::{Catalog, Coordinate, LocationDetail, LocationId};

/// Service owning the catalog and routing screen gestures to stored sessions.
pub struct BrowseService<R> {
    catalog: Arc<Catalog>,
    repository: Arc<R>,
    default_center: Coordinate,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("session-{id:06}"))
}

impl<R> BrowseService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(catalog: Arc<Catalog>, repository: Arc<R>, default_center: Coordinate) -> Self {
        Self {
            catalog,
            repository,
            default_center,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Start a session with every vaccine type selected on both screens.
    pub fn open_session(&self) -> Result<SessionView, BrowseServiceError> {
        let session = BrowseSession::new(
            next_session_id(),
            self.catalog.clone(),
            self.default_center,
        );
        let stored = self.repository.insert(session)?;
        info!(session_id = %stored.id, "browse session opened");
        Ok(SessionView::from(&stored))
    }

    pub fn session(&self, id: &SessionId) -> Result<SessionView, BrowseServiceError> {
        let session = self.load(id)?;
        Ok(SessionView::from(&session))
    }

    pub fn screen_view(
        &self,
        id: &SessionId,
        screen: Screen,
    ) -> Result<ScreenView, BrowseServiceError> {
        let session = self.load(id)?;
        Ok(ScreenView::for_screen(&session, screen))
    }

    /// Apply a filter gesture to one screen and return its refreshed view.
    pub fn apply_filter(
        &self,
        id: &SessionId,
        screen: Screen,
        action: FilterAction,
    ) -> Result<ScreenView, BrowseServiceError> {
        self.modify(id, |session| {
            match screen {
                Screen::Map => session.map.apply(action),
                Screen::List => session.list.apply(action),
            }
            debug!(session_id = %session.id, %screen, ?action, "filters updated");
            Ok(ScreenView::for_screen(session, screen))
        })
    }

    pub fn report_position(
        &self,
        id: &SessionId,
        position: Coordinate,
    ) -> Result<MapUpdate, BrowseServiceError> {
        self.modify(id, |session| {
            let recentered = session.map.apply_position_fix(position)?;
            if recentered {
                info!(session_id = %session.id, %position, "map centered on first position fix");
            }
            Ok(MapUpdate {
                recentered,
                map: ScreenView::map(&session.id, &session.map),
            })
        })
    }

    pub fn position_unavailable(&self, id: &SessionId) -> Result<MapUpdate, BrowseServiceError> {
        self.modify(id, |session| {
            session.map.position_unavailable();
            info!(session_id = %session.id, "position unavailable, showing default region");
            Ok(MapUpdate {
                recentered: false,
                map: ScreenView::map(&session.id, &session.map),
            })
        })
    }

    pub fn recenter(&self, id: &SessionId) -> Result<MapUpdate, BrowseServiceError> {
        self.modify(id, |session| {
            let recentered = session.map.recenter();
            Ok(MapUpdate {
                recentered,
                map: ScreenView::map(&session.id, &session.map),
            })
        })
    }

    pub fn select_location(
        &self,
        id: &SessionId,
        location_id: &LocationId,
    ) -> Result<ScreenView, BrowseServiceError> {
        self.modify(id, |session| {
            session.map.select(location_id)?;
            debug!(session_id = %session.id, %location_id, "location selected");
            Ok(ScreenView::map(&session.id, &session.map))
        })
    }

    pub fn dismiss_detail(&self, id: &SessionId) -> Result<ScreenView, BrowseServiceError> {
        self.modify(id, |session| {
            session.map.dismiss_detail();
            Ok(ScreenView::map(&session.id, &session.map))
        })
    }

    /// Detail for a location visible on the given screen.
    pub fn location_detail(
        &self,
        id: &SessionId,
        screen: Screen,
        location_id: &LocationId,
    ) -> Result<LocationDetail, BrowseServiceError> {
        let session = self.load(id)?;
        let location = match screen {
            Screen::Map => session.map.detail(location_id)?,
            Screen::List => session.list.detail(location_id)?,
        };
        Ok(LocationDetail::from(location))
    }

    fn load(&self, id: &SessionId) -> Result<BrowseSession, BrowseServiceError> {
        let session = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(session)
    }

    /// A failed gesture leaves the stored session untouched.
    fn modify<T, F>(&self, id: &SessionId, change: F) -> Result<T, BrowseServiceError>
    where
        F: FnOnce(&mut BrowseSession) -> Result<T, BrowseError>,
    {
        let outcome = self
            .repository
            .modify(id, |stored| -> Result<T, BrowseError> {
                let mut draft = stored.clone();
                let output = change(&mut draft)?;
                *stored = draft;
                Ok(output)
            })?;
        Ok(outcome?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BrowseServiceError {
    #[error(transparent)]
    Browse(#[from] BrowseError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
