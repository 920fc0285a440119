use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::screen::{ListScreen, MapScreen};
use crate::catalog::{Catalog, Coordinate};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One client's map and list screens. The two screens never share filter
/// state.
#[derive(Debug, Clone)]
pub struct BrowseSession {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    pub map: MapScreen,
    pub list: ListScreen,
}

impl BrowseSession {
    pub fn new(id: SessionId, catalog: Arc<Catalog>, default_center: Coordinate) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            map: MapScreen::new(catalog.clone(), default_center),
            list: ListScreen::new(catalog),
        }
    }
}
