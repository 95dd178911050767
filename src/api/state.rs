//! Application state for the payroll calendar API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::HolidayConfigLoader;

/// Shared application state.
///
/// Holds the holiday tables, loaded once at startup and shared read-only
/// across requests.
#[derive(Clone)]
pub struct AppState {
    /// The loaded holiday tables.
    holidays: Arc<HolidayConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given holiday tables.
    pub fn new(holidays: HolidayConfigLoader) -> Self {
        Self {
            holidays: Arc::new(holidays),
        }
    }

    /// Returns a reference to the holiday tables.
    pub fn holidays(&self) -> &HolidayConfigLoader {
        &self.holidays
    }
}
