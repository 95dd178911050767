//! Resolved payday rows.
//!
//! A [`ConflictRow`] is produced once per [`PayPeriod`](super::PayPeriod) by the conflict
//! resolver and is never mutated afterwards. Table, CSV and calendar views
//! are all rendered from these rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Column headings shared by the table and CSV views, in display order.
pub const ROW_COLUMNS: [&str; 7] = [
    "Period Start",
    "Period End",
    "Pay Date",
    "Pay Day",
    "Holiday",
    "Weekend",
    "Note",
];

/// A pay period together with its payday conflict check and adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRow {
    /// The start date of the pay period.
    pub period_start: NaiveDate,
    /// The end date of the pay period.
    pub period_end: NaiveDate,
    /// The nominal payday, before adjustment.
    pub payday: NaiveDate,
    /// Weekday name of the nominal payday (e.g., "Wednesday").
    pub weekday: String,
    /// Whether the nominal payday is a public holiday.
    pub is_holiday: bool,
    /// The holiday name, when the nominal payday is a holiday.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub holiday_name: Option<String>,
    /// Whether the nominal payday falls on a Saturday or Sunday.
    pub is_weekend: bool,
    /// The payday after moving back off weekends and holidays.
    pub adjusted_payday: NaiveDate,
    /// Human-readable explanation of the adjustment; empty when none applied.
    pub note: String,
}

impl ConflictRow {
    /// Returns `true` if the payday had to move.
    pub fn was_adjusted(&self) -> bool {
        self.adjusted_payday != self.payday
    }

    /// Renders the row as the seven display columns in [`ROW_COLUMNS`] order.
    ///
    /// The `Pay Date` column carries the nominal payday; the adjusted date is
    /// reported through the note.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_calendar::models::ConflictRow;
    /// use chrono::NaiveDate;
    ///
    /// let row = ConflictRow {
    ///     period_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    ///     period_end: NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(),
    ///     payday: NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(),
    ///     weekday: "Wednesday".to_string(),
    ///     is_holiday: false,
    ///     holiday_name: None,
    ///     is_weekend: false,
    ///     adjusted_payday: NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(),
    ///     note: String::new(),
    /// };
    ///
    /// assert_eq!(
    ///     row.display_columns(),
    ///     ["2024-01-01", "2024-01-14", "2024-01-17", "Wednesday", "No", "No", ""]
    /// );
    /// ```
    pub fn display_columns(&self) -> [String; 7] {
        [
            format_date(self.period_start),
            format_date(self.period_end),
            format_date(self.payday),
            self.weekday.clone(),
            yes_no(self.is_holiday).to_string(),
            yes_no(self.is_weekend).to_string(),
            self.note.clone(),
        ]
    }
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}
