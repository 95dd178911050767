//! Calculation logic for the payroll calendar.
//!
//! This module contains the date arithmetic behind a calendar run: pay period
//! generation for each frequency, weekend detection, holiday rule expansion,
//! and the payday conflict resolver that moves paydays off weekends and
//! holidays.

mod calendar;
mod conflict_resolver;
mod day_detection;
mod holiday_rules;
mod period_generator;

pub use calendar::{build_calendar, generate_calendar};
pub use conflict_resolver::{
    MAX_BACKWARD_SEARCH_DAYS, PaydayResolution, resolve_conflicts, resolve_payday,
};
pub use day_detection::{DayType, days_back_to_friday, get_day_type, is_weekend, weekday_name};
pub use holiday_rules::{easter_sunday, expand_holidays, rule_date};
pub use period_generator::{PeriodBounds, generate_pay_periods, period_bounds};
