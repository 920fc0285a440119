//! Vaccine provider catalog with vaccine-type filtering and per-screen
//! browse state for map and list clients.

pub mod browse;
pub mod catalog;
pub mod config;
pub mod error;
pub mod telemetry;
