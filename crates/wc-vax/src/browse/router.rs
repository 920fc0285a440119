use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::repository::{RepositoryError, SessionRepository};
use super::screen::{BrowseError, FilterAction, Screen};
use super::service::{BrowseService, BrowseServiceError};
use super::session::SessionId;
use crate::catalog::{Coordinate, LocationId};

type SharedService<R> = State<Arc<BrowseService<R>>>;

/// Position report from a client's location services.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PositionReport {
    Fix { latitude: f64, longitude: f64 },
    Unavailable,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectionRequest {
    pub location_id: LocationId,
}

/// Router builder exposing browse sessions over HTTP.
pub fn browse_router<R>(service: Arc<BrowseService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/sessions", post(open_handler::<R>))
        .route("/api/v1/sessions/:session_id", get(session_handler::<R>))
        .route(
            "/api/v1/sessions/:session_id/screens/:screen",
            get(screen_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/screens/:screen/filters",
            post(filter_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/screens/:screen/locations/:location_id",
            get(detail_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/map/position",
            post(position_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/map/recenter",
            post(recenter_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/map/selection",
            put(select_handler::<R>).delete(dismiss_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn open_handler<R>(State(service): SharedService<R>) -> Response
where
    R: SessionRepository + 'static,
{
    match service.open_session() {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn session_handler<R>(
    State(service): SharedService<R>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    respond(service.session(&SessionId(session_id)))
}

pub(crate) async fn screen_handler<R>(
    State(service): SharedService<R>,
    Path((session_id, screen)): Path<(String, Screen)>,
) -> Response
where
    R: SessionRepository + 'static,
{
    respond(service.screen_view(&SessionId(session_id), screen))
}

pub(crate) async fn filter_handler<R>(
    State(service): SharedService<R>,
    Path((session_id, screen)): Path<(String, Screen)>,
    Json(action): Json<FilterAction>,
) -> Response
where
    R: SessionRepository + 'static,
{
    respond(service.apply_filter(&SessionId(session_id), screen, action))
}

pub(crate) async fn detail_handler<R>(
    State(service): SharedService<R>,
    Path((session_id, screen, location_id)): Path<(String, Screen, String)>,
) -> Response
where
    R: SessionRepository + 'static,
{
    respond(service.location_detail(
        &SessionId(session_id),
        screen,
        &LocationId(location_id),
    ))
}

pub(crate) async fn position_handler<R>(
    State(service): SharedService<R>,
    Path(session_id): Path<String>,
    Json(report): Json<PositionReport>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let id = SessionId(session_id);
    let result = match report {
        PositionReport::Fix {
            latitude,
            longitude,
        } => service.report_position(&id, Coordinate::new(latitude, longitude)),
        PositionReport::Unavailable => service.position_unavailable(&id),
    };
    respond(result)
}

pub(crate) async fn recenter_handler<R>(
    State(service): SharedService<R>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    respond(service.recenter(&SessionId(session_id)))
}

pub(crate) async fn select_handler<R>(
    State(service): SharedService<R>,
    Path(session_id): Path<String>,
    Json(request): Json<SelectionRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    respond(service.select_location(&SessionId(session_id), &request.location_id))
}

pub(crate) async fn dismiss_handler<R>(
    State(service): SharedService<R>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    respond(service.dismiss_detail(&SessionId(session_id)))
}

fn respond<T: serde::Serialize>(result: Result<T, BrowseServiceError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: BrowseServiceError) -> Response {
    let status = match &error {
        BrowseServiceError::Repository(RepositoryError::NotFound)
        | BrowseServiceError::Browse(BrowseError::UnknownLocation(_)) => StatusCode::NOT_FOUND,
        BrowseServiceError::Browse(BrowseError::NotVisible(_))
        | BrowseServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        BrowseServiceError::Browse(BrowseError::InvalidPosition(_)) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        BrowseServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
