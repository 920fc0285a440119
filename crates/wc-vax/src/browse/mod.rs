//! Per-client browse state: a map screen and a list screen, each with its own
//! vaccine filter, stored as sessions and served over HTTP.

pub mod region;
pub mod repository;
pub mod router;
pub mod screen;
pub mod service;
pub mod session;
pub mod views;

#[cfg(test)]
mod tests;

pub use region::{CoordinateSpan, MapRegion, DEFAULT_CENTER};
pub use repository::{RepositoryError, SessionRepository};
pub use router::{browse_router, PositionReport, SelectionRequest};
pub use screen::{BrowseError, FilterAction, ListScreen, MapScreen, Screen};
pub use service::{BrowseService, BrowseServiceError};
pub use session::{BrowseSession, SessionId};
pub use views::{MapUpdate, ScreenView, SessionView};
