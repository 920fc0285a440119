use chrono::{DateTime, Utc};
use serde::Serialize;

use super::region::MapRegion;
use super::screen::{ListScreen, MapScreen, Screen};
use super::session::{BrowseSession, SessionId};
use crate::catalog::views::summaries;
use crate::catalog::{Coordinate, FilterSet, LocationDetail, LocationSummary};

/// Everything a client needs to render one screen.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenView {
    pub session_id: SessionId,
    pub screen: Screen,
    pub filters: FilterSet,
    pub visible_count: usize,
    pub locations: Vec<LocationSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<LocationDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<MapRegion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_position: Option<Coordinate>,
}

impl ScreenView {
    pub fn map(session_id: &SessionId, map: &MapScreen) -> Self {
        let locations = summaries(map.visible());
        Self {
            session_id: session_id.clone(),
            screen: Screen::Map,
            filters: map.filters().clone(),
            visible_count: locations.len(),
            locations,
            selected: map.selected().map(LocationDetail::from),
            region: Some(map.region()),
            user_position: map.user_position(),
        }
    }

    pub fn list(session_id: &SessionId, list: &ListScreen) -> Self {
        let locations = summaries(list.visible());
        Self {
            session_id: session_id.clone(),
            screen: Screen::List,
            filters: list.filters().clone(),
            visible_count: locations.len(),
            locations,
            selected: None,
            region: None,
            user_position: None,
        }
    }

    pub fn for_screen(session: &BrowseSession, screen: Screen) -> Self {
        match screen {
            Screen::Map => Self::map(&session.id, &session.map),
            Screen::List => Self::list(&session.id, &session.list),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>,
    pub map: ScreenView,
    pub list: ScreenView,
}

impl From<&BrowseSession> for SessionView {
    fn from(session: &BrowseSession) -> Self {
        Self {
            session_id: session.id.clone(),
            created_at: session.created_at,
            map: ScreenView::map(&session.id, &session.map),
            list: ScreenView::list(&session.id, &session.list),
        }
    }
}

/// Result of a position report or recenter request.
#[derive(Debug, Clone, Serialize)]
pub struct MapUpdate {
    pub recentered: bool,
    pub map: ScreenView,
}
