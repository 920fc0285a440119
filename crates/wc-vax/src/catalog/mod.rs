mod builtin;
pub mod domain;
pub mod filter;
mod parser;
pub mod router;
pub mod views;

pub use domain::{Coordinate, LocationId, UnknownVaccine, VaccineLocation, VaccineType};
pub use filter::{visible_locations, FilterSet, LocationFilterStore};
pub use router::{catalog_router, LocationQuery};
pub use views::{summaries, LocationDetail, LocationSummary, VaccineBadge, VaccineTypeView};

use parser::LocationRecord;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    UnknownVaccine {
        title: String,
        source: UnknownVaccine,
    },
    InvalidCoordinate {
        title: String,
        coordinate: Coordinate,
    },
    DuplicateId(LocationId),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read location catalog: {}", err),
            CatalogError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            CatalogError::Json(err) => write!(f, "invalid catalog JSON data: {}", err),
            CatalogError::UnknownVaccine { title, source } => {
                write!(f, "location '{}' lists an {}", title, source)
            }
            CatalogError::InvalidCoordinate { title, coordinate } => write!(
                f,
                "location '{}' has an out-of-range coordinate ({})",
                title, coordinate
            ),
            CatalogError::DuplicateId(id) => {
                write!(f, "location id '{}' appears more than once", id)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Csv(err) => Some(err),
            CatalogError::Json(err) => Some(err),
            CatalogError::UnknownVaccine { source, .. } => Some(source),
            CatalogError::InvalidCoordinate { .. } | CatalogError::DuplicateId(_) => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Ordered, immutable list of every known provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    locations: Vec<VaccineLocation>,
}

impl Catalog {
    /// The ten Wayne County providers bundled with the application.
    pub fn builtin() -> Self {
        Self {
            locations: builtin::locations(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let catalog = if is_json {
            Self::from_json_reader(file)?
        } else {
            Self::from_csv_reader(file)?
        };

        info!(path = %path.display(), locations = catalog.len(), "location catalog loaded");
        Ok(catalog)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Self::from_records(parser::parse_csv_records(reader)?)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Self::from_records(parser::parse_json_records(reader)?)
    }

    /// Builds a catalog from already-identified locations, checking ids and
    /// coordinates.
    pub fn new(locations: Vec<VaccineLocation>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for location in &locations {
            if !location.coordinate.is_valid() {
                return Err(CatalogError::InvalidCoordinate {
                    title: location.title.clone(),
                    coordinate: location.coordinate,
                });
            }
            if !seen.insert(location.id.clone()) {
                return Err(CatalogError::DuplicateId(location.id.clone()));
            }
        }

        Ok(Self { locations })
    }

    fn from_records(records: Vec<LocationRecord>) -> Result<Self, CatalogError> {
        let locations = records
            .into_iter()
            .enumerate()
            .map(|(position, record)| VaccineLocation {
                id: record
                    .id
                    .unwrap_or_else(|| LocationId::from_position(position)),
                coordinate: Coordinate::new(record.latitude, record.longitude),
                title: record.title,
                vaccines: record.vaccines,
                phone_number: record.phone_number,
                address: record.address,
            })
            .collect();

        let catalog = Self::new(locations)?;
        debug!(locations = catalog.len(), "catalog records validated");
        Ok(catalog)
    }

    pub fn locations(&self) -> &[VaccineLocation] {
        &self.locations
    }

    pub fn find(&self, id: &LocationId) -> Option<&VaccineLocation> {
        self.locations.iter().find(|location| &location.id == id)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
