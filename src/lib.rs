//! Payroll Calendar Engine
//!
//! This crate generates recurring payroll pay periods for weekly, bi-weekly,
//! semi-monthly and monthly schedules, and moves each payday that lands on a
//! weekend or public holiday back to an earlier business day.
//!
//! Holidays come from rule-based per-country YAML tables. Calendars can be
//! served over HTTP, exported as CSV or iCalendar, or printed from the
//! command line.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
