//! Core data models for the payroll calendar engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calendar_result;
mod conflict_row;
mod frequency;
mod holiday;
mod pay_period;

pub use calendar_result::{AuditStep, AuditTrace, AuditWarning, CalendarResult};
pub use conflict_row::{ConflictRow, ROW_COLUMNS, format_date};
pub use frequency::PayFrequency;
pub use holiday::{HolidayLookup, HolidaySet, PublicHoliday};
pub use pay_period::PayPeriod;
