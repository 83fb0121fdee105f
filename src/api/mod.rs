//! HTTP API module for the shift earnings engine.
//!
//! This module exposes the preview pipeline, the saved shifts, the catalog,
//! the period reports and backups as a JSON REST API.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ReportQuery, ShiftsQuery};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
