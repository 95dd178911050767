//! HTTP API module for the payroll calendar.
//!
//! This module provides the REST endpoints that generate calendars as JSON,
//! CSV or iCalendar, and list the available holiday regions.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalendarRequest;
pub use response::{ApiError, ApiErrorResponse, CountrySummary};
pub use state::AppState;
