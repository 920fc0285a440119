use serde::Serialize;

use super::domain::{LocationId, VaccineLocation, VaccineType};

/// Stock status shown next to every listed vaccine.
pub const IN_STOCK: &str = "In Stock";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaccineTypeView {
    pub vaccine: VaccineType,
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

impl From<VaccineType> for VaccineTypeView {
    fn from(vaccine: VaccineType) -> Self {
        Self {
            vaccine,
            label: vaccine.label(),
            color: vaccine.color(),
            icon: vaccine.icon(),
        }
    }
}

impl VaccineTypeView {
    pub fn all() -> Vec<Self> {
        VaccineType::ALL.into_iter().map(Self::from).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaccineBadge {
    pub vaccine: VaccineType,
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    pub status: &'static str,
}

impl From<VaccineType> for VaccineBadge {
    fn from(vaccine: VaccineType) -> Self {
        Self {
            vaccine,
            label: vaccine.label(),
            color: vaccine.color(),
            icon: vaccine.icon(),
            status: IN_STOCK,
        }
    }
}

/// Row/marker payload for a visible location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationSummary {
    pub id: LocationId,
    pub title: String,
    pub subtitle: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_vaccine: Option<VaccineType>,
    pub primary_color: &'static str,
    pub vaccines: Vec<VaccineType>,
}

impl From<&VaccineLocation> for LocationSummary {
    fn from(location: &VaccineLocation) -> Self {
        Self {
            id: location.id.clone(),
            title: location.title.clone(),
            subtitle: location.subtitle(),
            latitude: location.coordinate.latitude,
            longitude: location.coordinate.longitude,
            primary_vaccine: location.primary_vaccine(),
            primary_color: location.primary_color(),
            vaccines: location.vaccines.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationDetail {
    pub id: LocationId,
    pub title: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub primary_color: &'static str,
    pub vaccines: Vec<VaccineBadge>,
}

impl From<&VaccineLocation> for LocationDetail {
    fn from(location: &VaccineLocation) -> Self {
        Self {
            id: location.id.clone(),
            title: location.title.clone(),
            address: location.address_label().to_string(),
            phone_number: location.phone_number.clone(),
            latitude: location.coordinate.latitude,
            longitude: location.coordinate.longitude,
            primary_color: location.primary_color(),
            vaccines: location
                .vaccines
                .iter()
                .copied()
                .map(VaccineBadge::from)
                .collect(),
        }
    }
}

pub fn summaries<'a, I>(locations: I) -> Vec<LocationSummary>
where
    I: IntoIterator<Item = &'a VaccineLocation>,
{
    locations.into_iter().map(LocationSummary::from).collect()
}
