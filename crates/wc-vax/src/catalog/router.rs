use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{LocationId, UnknownVaccine, VaccineType};
use super::filter::{visible_locations, FilterSet};
use super::views::{summaries, LocationDetail, VaccineTypeView};
use super::Catalog;

#[derive(Debug, Default, Deserialize)]
pub struct LocationQuery {
    /// Comma-separated vaccine names. Absent means every type; present but
    /// blank means none.
    pub vaccines: Option<String>,
}

impl LocationQuery {
    pub fn filters(&self) -> Result<FilterSet, UnknownVaccine> {
        match self.vaccines.as_deref() {
            None => Ok(FilterSet::all()),
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::parse::<VaccineType>)
                .collect(),
        }
    }
}

/// Read-only catalog endpoints that need no session.
pub fn catalog_router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/api/v1/vaccines", get(vaccines_handler))
        .route("/api/v1/locations", get(locations_handler))
        .route("/api/v1/locations/:location_id", get(location_handler))
        .with_state(catalog)
}

pub(crate) async fn vaccines_handler() -> Json<Vec<VaccineTypeView>> {
    Json(VaccineTypeView::all())
}

pub(crate) async fn locations_handler(
    State(catalog): State<Arc<Catalog>>,
    Query(query): Query<LocationQuery>,
) -> Response {
    match query.filters() {
        Ok(filters) => {
            let visible = visible_locations(catalog.locations(), &filters);
            (StatusCode::OK, Json(summaries(visible))).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn location_handler(
    State(catalog): State<Arc<Catalog>>,
    Path(location_id): Path<String>,
) -> Response {
    let id = LocationId(location_id);
    match catalog.find(&id) {
        Some(location) => (StatusCode::OK, Json(LocationDetail::from(location))).into_response(),
        None => {
            let payload = json!({
                "error": format!("location '{id}' does not exist"),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}
