use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::filter::FilterSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VaccineType {
    Moderna,
    Pfizer,
    JohnsonJohnson,
}

impl VaccineType {
    pub const ALL: [Self; 3] = [Self::Moderna, Self::Pfizer, Self::JohnsonJohnson];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Moderna => "Moderna",
            Self::Pfizer => "Pfizer",
            Self::JohnsonJohnson => "Johnson & Johnson",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Moderna => "moderna",
            Self::Pfizer => "pfizer",
            Self::JohnsonJohnson => "johnson_johnson",
        }
    }

    /// Named display color for badges and map markers.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Moderna => "indigo",
            Self::Pfizer => "teal",
            Self::JohnsonJohnson => "orange",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Moderna => "cross.circle.fill",
            Self::Pfizer => "cross.fill",
            Self::JohnsonJohnson => "cross.case.fill",
        }
    }
}

impl fmt::Display for VaccineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVaccine(pub String);

impl fmt::Display for UnknownVaccine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown vaccine '{}' (expected moderna, pfizer, or johnson_johnson)",
            self.0
        )
    }
}

impl std::error::Error for UnknownVaccine {}

impl FromStr for VaccineType {
    type Err = UnknownVaccine;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "moderna" => Ok(Self::Moderna),
            "pfizer" => Ok(Self::Pfizer),
            "johnson_johnson" | "johnson & johnson" | "johnson-johnson" | "jj" | "j&j"
            | "janssen" => Ok(Self::JohnsonJohnson),
            _ => Err(UnknownVaccine(raw.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub String);

impl LocationId {
    /// Identifier assigned to the entry at `position` (0-based) in catalog order.
    pub fn from_position(position: usize) -> Self {
        Self(format!("loc-{:03}", position + 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Color used when a location lists no vaccines.
pub const FALLBACK_COLOR: &str = "blue";

pub const ADDRESS_UNAVAILABLE: &str = "Address not available";

/// A vaccine provider. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaccineLocation {
    pub id: LocationId,
    pub coordinate: Coordinate,
    pub title: String,
    /// Order matters: the first entry is the primary vaccine.
    pub vaccines: Vec<VaccineType>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

impl VaccineLocation {
    pub fn primary_vaccine(&self) -> Option<VaccineType> {
        self.vaccines.first().copied()
    }

    pub fn primary_color(&self) -> &'static str {
        self.primary_vaccine()
            .map(VaccineType::color)
            .unwrap_or(FALLBACK_COLOR)
    }

    pub fn subtitle(&self) -> String {
        let names: Vec<&str> = self.vaccines.iter().map(|v| v.label()).collect();
        format!("Available: {}", names.join(", "))
    }

    pub fn address_label(&self) -> &str {
        self.address.as_deref().unwrap_or(ADDRESS_UNAVAILABLE)
    }

    /// True when at least one listed vaccine is in `filters`.
    pub fn offers_any(&self, filters: &FilterSet) -> bool {
        self.vaccines.iter().any(|vaccine| filters.contains(*vaccine))
    }
}
