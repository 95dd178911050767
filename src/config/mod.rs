//! Configuration loading and management for the payroll calendar.
//!
//! This module provides the per-run [`CalendarSettings`] and the
//! [`HolidayConfigLoader`], which reads per-country holiday rule tables from
//! YAML files and expands them into concrete dates.
//!
//! # Example
//!
//! ```no_run
//! use payroll_calendar::config::HolidayConfigLoader;
//!
//! let loader = HolidayConfigLoader::load("./config/holidays").unwrap();
//! for country in loader.countries() {
//!     println!("{}: {}", country.code, country.name);
//! }
//! ```

mod loader;
mod settings;
mod types;

pub use loader::{HolidayConfigLoader, RegionHolidays};
pub use settings::{
    CalendarSettings, DEFAULT_COUNTRY, DEFAULT_PAYDAY_OFFSET_DAYS, DEFAULT_PERIOD_COUNT,
    DEFAULT_SUBDIVISION, PAYDAY_OFFSET_RANGE, PERIOD_COUNT_RANGE,
};
pub use types::{CountryHolidays, HolidayDefinition, HolidayRule, Observance, Subdivision};
