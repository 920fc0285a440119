use serde::Serialize;

use crate::catalog::Coordinate;

/// Map center used when no user position is available.
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(39.840, -84.890);

const OVERVIEW_SPAN: f64 = 0.15;
const SELECTION_SPAN: f64 = 0.08;
/// Northward shift applied when a location is selected so the marker clears
/// the detail panel.
const SELECTION_LATITUDE_OFFSET: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoordinateSpan {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl CoordinateSpan {
    pub const fn square(delta: f64) -> Self {
        Self {
            latitude_delta: delta,
            longitude_delta: delta,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapRegion {
    pub center: Coordinate,
    pub span: CoordinateSpan,
}

impl MapRegion {
    pub const fn centered_on(center: Coordinate) -> Self {
        Self {
            center,
            span: CoordinateSpan::square(OVERVIEW_SPAN),
        }
    }

    pub const fn default_region(center: Coordinate) -> Self {
        Self::centered_on(center)
    }

    pub fn for_selection(location: Coordinate) -> Self {
        Self {
            center: Coordinate::new(
                location.latitude + SELECTION_LATITUDE_OFFSET,
                location.longitude,
            ),
            span: CoordinateSpan::square(SELECTION_SPAN),
        }
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        let half_lat = self.span.latitude_delta / 2.0;
        let half_lon = self.span.longitude_delta / 2.0;
        (point.latitude - self.center.latitude).abs() <= half_lat
            && (point.longitude - self.center.longitude).abs() <= half_lon
    }
}
