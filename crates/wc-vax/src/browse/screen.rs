use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::region::MapRegion;
use crate::catalog::{
    Catalog, Coordinate, FilterSet, LocationFilterStore, LocationId, VaccineLocation, VaccineType,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Map,
    List,
}

impl Screen {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Map => "map",
            Self::List => "list",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the three user gestures on a filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FilterAction {
    Toggle { vaccine: VaccineType },
    Clear,
    SelectAll,
}

impl FilterAction {
    fn apply(self, store: &mut LocationFilterStore) {
        match self {
            Self::Toggle { vaccine } => store.toggle(vaccine),
            Self::Clear => store.clear(),
            Self::SelectAll => store.select_all(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BrowseError {
    #[error("location '{0}' does not exist")]
    UnknownLocation(LocationId),
    #[error("location '{0}' is hidden by the active vaccine filters")]
    NotVisible(LocationId),
    #[error("position ({0}) is outside valid latitude/longitude bounds")]
    InvalidPosition(Coordinate),
}

fn visible_location<'a>(
    store: &'a LocationFilterStore,
    id: &LocationId,
) -> Result<&'a VaccineLocation, BrowseError> {
    let location = store
        .catalog()
        .find(id)
        .ok_or_else(|| BrowseError::UnknownLocation(id.clone()))?;
    if store.is_visible(location) {
        Ok(location)
    } else {
        Err(BrowseError::NotVisible(id.clone()))
    }
}

/// Location list with its own filter bar.
#[derive(Debug, Clone)]
pub struct ListScreen {
    store: LocationFilterStore,
}

impl ListScreen {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            store: LocationFilterStore::new(catalog),
        }
    }

    pub fn filters(&self) -> &FilterSet {
        self.store.filters()
    }

    pub fn apply(&mut self, action: FilterAction) {
        action.apply(&mut self.store);
    }

    pub fn visible(&self) -> Vec<&VaccineLocation> {
        self.store.visible()
    }

    /// Detail for a row the user can currently see.
    pub fn detail(&self, id: &LocationId) -> Result<&VaccineLocation, BrowseError> {
        visible_location(&self.store, id)
    }
}

/// Map with markers for visible locations and an optional detail panel.
#[derive(Debug, Clone)]
pub struct MapScreen {
    store: LocationFilterStore,
    default_region: MapRegion,
    region: MapRegion,
    selected: Option<LocationId>,
    user_position: Option<Coordinate>,
    has_initially_centered: bool,
}

impl MapScreen {
    pub fn new(catalog: Arc<Catalog>, default_center: Coordinate) -> Self {
        let default_region = MapRegion::default_region(default_center);
        Self {
            store: LocationFilterStore::new(catalog),
            default_region,
            region: default_region,
            selected: None,
            user_position: None,
            has_initially_centered: false,
        }
    }

    pub fn filters(&self) -> &FilterSet {
        self.store.filters()
    }

    pub fn region(&self) -> MapRegion {
        self.region
    }

    pub fn user_position(&self) -> Option<Coordinate> {
        self.user_position
    }

    pub fn has_initially_centered(&self) -> bool {
        self.has_initially_centered
    }

    /// Applies a filter gesture. Any open detail panel is dismissed.
    pub fn apply(&mut self, action: FilterAction) {
        action.apply(&mut self.store);
        self.selected = None;
    }

    pub fn visible(&self) -> Vec<&VaccineLocation> {
        self.store.visible()
    }

    /// Records a position fix. Only the first fix moves the map; returns
    /// whether the region changed.
    pub fn apply_position_fix(&mut self, position: Coordinate) -> Result<bool, BrowseError> {
        if !position.is_valid() {
            return Err(BrowseError::InvalidPosition(position));
        }

        self.user_position = Some(position);
        if self.has_initially_centered {
            return Ok(false);
        }

        self.region = MapRegion::centered_on(position);
        self.has_initially_centered = true;
        Ok(true)
    }

    /// Location services are denied or failed: show the default region.
    pub fn position_unavailable(&mut self) {
        self.region = self.default_region;
    }

    pub fn recenter(&mut self) -> bool {
        match self.user_position {
            Some(position) => {
                self.region = MapRegion::centered_on(position);
                true
            }
            None => false,
        }
    }

    pub fn select(&mut self, id: &LocationId) -> Result<&VaccineLocation, BrowseError> {
        let coordinate = visible_location(&self.store, id)?.coordinate;
        self.region = MapRegion::for_selection(coordinate);
        self.selected = Some(id.clone());
        visible_location(&self.store, id)
    }

    pub fn dismiss_detail(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&VaccineLocation> {
        self.selected
            .as_ref()
            .and_then(|id| self.store.catalog().find(id))
    }

    pub fn detail(&self, id: &LocationId) -> Result<&VaccineLocation, BrowseError> {
        visible_location(&self.store, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::region::DEFAULT_CENTER;

    fn map_screen() -> MapScreen {
        MapScreen::new(Arc::new(Catalog::builtin()), DEFAULT_CENTER)
    }

    #[test]
    fn only_the_first_fix_recenters() {
        let mut map = map_screen();
        assert_eq!(map.region(), MapRegion::default_region(DEFAULT_CENTER));

        let first = Coordinate::new(39.85, -84.88);
        assert_eq!(map.apply_position_fix(first), Ok(true));
        assert!(map.has_initially_centered());
        assert_eq!(map.region(), MapRegion::centered_on(first));

        let second = Coordinate::new(39.90, -84.95);
        assert_eq!(map.apply_position_fix(second), Ok(false));
        assert_eq!(map.region(), MapRegion::centered_on(first));
        assert_eq!(map.user_position(), Some(second));

        assert!(map.recenter());
        assert_eq!(map.region(), MapRegion::centered_on(second));
    }

    #[test]
    fn invalid_fix_is_rejected_without_consuming_the_first_fix() {
        let mut map = map_screen();
        let bogus = Coordinate::new(120.0, -84.88);
        assert_eq!(
            map.apply_position_fix(bogus),
            Err(BrowseError::InvalidPosition(bogus))
        );
        assert!(!map.has_initially_centered());
        assert!(map.user_position().is_none());
    }

    #[test]
    fn position_failure_keeps_catalog_usable() {
        let mut map = map_screen();
        map.position_unavailable();
        assert_eq!(map.region(), MapRegion::default_region(DEFAULT_CENTER));
        assert_eq!(map.visible().len(), 10);
        assert!(!map.recenter());
    }

    #[test]
    fn selecting_moves_region_and_filter_change_dismisses() {
        let mut map = map_screen();
        let reid = LocationId::from("loc-003");
        let selected = map.select(&reid).expect("reid selectable");
        assert_eq!(selected.title, "Reid Health-Richmond");
        let coordinate = selected.coordinate;
        assert_eq!(map.region(), MapRegion::for_selection(coordinate));
        assert!(map.selected().is_some());

        map.apply(FilterAction::Toggle {
            vaccine: VaccineType::Pfizer,
        });
        assert!(map.selected().is_none());
    }

    #[test]
    fn hidden_locations_cannot_be_selected() {
        let mut map = map_screen();
        map.apply(FilterAction::Clear);
        map.apply(FilterAction::Toggle {
            vaccine: VaccineType::Pfizer,
        });

        let walmart = LocationId::from("loc-005");
        assert_eq!(
            map.select(&walmart).map(|loc| loc.id.clone()),
            Err(BrowseError::NotVisible(walmart.clone()))
        );

        let missing = LocationId::from("loc-404");
        assert_eq!(
            map.select(&missing).map(|loc| loc.id.clone()),
            Err(BrowseError::UnknownLocation(missing.clone()))
        );
        assert!(map.selected().is_none());
    }

    #[test]
    fn list_detail_requires_visibility() {
        let mut list = ListScreen::new(Arc::new(Catalog::builtin()));
        let meijer = LocationId::from("loc-004");
        assert!(list.detail(&meijer).is_ok());

        list.apply(FilterAction::Toggle {
            vaccine: VaccineType::Moderna,
        });
        assert_eq!(
            list.detail(&meijer).map(|loc| loc.id.clone()),
            Err(BrowseError::NotVisible(meijer.clone()))
        );
    }

    #[test]
    fn filter_action_wire_format() {
        let toggle: FilterAction =
            serde_json::from_str(r#"{"action":"toggle","vaccine":"johnson_johnson"}"#)
                .expect("toggle parses");
        assert_eq!(
            toggle,
            FilterAction::Toggle {
                vaccine: VaccineType::JohnsonJohnson
            }
        );
        let select_all: FilterAction =
            serde_json::from_str(r#"{"action":"select_all"}"#).expect("select_all parses");
        assert_eq!(select_all, FilterAction::SelectAll);
    }
}
