use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

use super::domain::{VaccineLocation, VaccineType};
use super::Catalog;

/// Vaccine types currently selected by the user. Defaults to every type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(BTreeSet<VaccineType>);

impl FilterSet {
    pub fn all() -> Self {
        Self(VaccineType::ALL.into_iter().collect())
    }

    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, vaccine: VaccineType) -> bool {
        self.0.contains(&vaccine)
    }

    pub fn toggle(&mut self, vaccine: VaccineType) {
        if !self.0.remove(&vaccine) {
            self.0.insert(vaccine);
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn select_all(&mut self) {
        *self = Self::all();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_all(&self) -> bool {
        VaccineType::ALL.iter().all(|vaccine| self.0.contains(vaccine))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Selected types in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = VaccineType> + '_ {
        self.0.iter().copied()
    }
}

impl Default for FilterSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<VaccineType> for FilterSet {
    fn from_iter<I: IntoIterator<Item = VaccineType>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Catalog entries whose vaccine list intersects `filters`, in catalog order.
pub fn visible_locations<'a>(
    catalog: &'a [VaccineLocation],
    filters: &FilterSet,
) -> Vec<&'a VaccineLocation> {
    catalog
        .iter()
        .filter(|location| location.offers_any(filters))
        .collect()
}

/// A catalog paired with one screen's filter selection.
///
/// Mutations never recompute anything; call [`LocationFilterStore::visible`]
/// after mutating to get the refreshed subset.
#[derive(Debug, Clone)]
pub struct LocationFilterStore {
    catalog: Arc<Catalog>,
    filters: FilterSet,
}

impl LocationFilterStore {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_filters(catalog, FilterSet::all())
    }

    pub fn with_filters(catalog: Arc<Catalog>, filters: FilterSet) -> Self {
        Self { catalog, filters }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn toggle(&mut self, vaccine: VaccineType) {
        self.filters.toggle(vaccine);
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn select_all(&mut self) {
        self.filters.select_all();
    }

    pub fn visible(&self) -> Vec<&VaccineLocation> {
        visible_locations(self.catalog.locations(), &self.filters)
    }

    pub fn is_visible(&self, location: &VaccineLocation) -> bool {
        location.offers_any(&self.filters)
    }
}
