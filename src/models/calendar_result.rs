//! Calendar result models.
//!
//! This module contains the [`CalendarResult`] type and its audit structures,
//! which capture everything produced by one payroll calendar run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::CalendarSettings;

use super::ConflictRow;

/// A single step in the audit trace recording a payday decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated while building a calendar.
///
/// Warnings indicate conditions that don't prevent the run but may require
/// attention, such as falling back to country-wide holidays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calendar run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of decision steps, one per pay period.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during the run.
    pub warnings: Vec<AuditWarning>,
    /// The total run duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a payroll calendar run.
///
/// # Example
///
/// ```
/// use payroll_calendar::config::CalendarSettings;
/// use payroll_calendar::models::{AuditTrace, CalendarResult, PayFrequency};
/// use chrono::{NaiveDate, Utc};
/// use uuid::Uuid;
///
/// let result = CalendarResult {
///     calendar_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     settings: CalendarSettings::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), PayFrequency::Weekly),
///     rows: vec![],
///     audit_trace: AuditTrace {
///         steps: vec![],
///         warnings: vec![],
///         duration_us: 0,
///     },
/// };
/// assert_eq!(result.adjusted_count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarResult {
    /// Unique identifier for this run.
    pub calendar_id: Uuid,
    /// When the calendar was generated.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that generated the calendar.
    pub engine_version: String,
    /// The settings the calendar was generated from.
    pub settings: CalendarSettings,
    /// One resolved row per pay period, in period order.
    pub rows: Vec<ConflictRow>,
    /// Complete audit trace of payday decisions.
    pub audit_trace: AuditTrace,
}

impl CalendarResult {
    /// Returns the number of rows whose payday was moved.
    pub fn adjusted_count(&self) -> usize {
        self.rows.iter().filter(|row| row.was_adjusted()).count()
    }
}
