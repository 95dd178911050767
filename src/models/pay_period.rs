//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type produced by the period generator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A span of worked time covered by a single paycheck, and its nominal payday.
///
/// `start_date <= end_date` always holds. The payday is the period end plus the
/// configured offset, before any weekend or holiday adjustment.
///
/// # Example
///
/// ```
/// use payroll_calendar::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod {
///     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(),
///     payday: NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(),
/// };
///
/// assert!(period.start_date <= period.end_date);
/// assert_eq!((period.payday - period.end_date).num_days(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
    /// The nominal payday, before adjustment.
    pub payday: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_bi_weekly_period() -> PayPeriod {
        PayPeriod {
            start_date: make_date("2024-01-01"),
            end_date: make_date("2024-01-14"),
            payday: make_date("2024-01-17"),
        }
    }

    #[test]
    fn test_serialize_pay_period() {
        let json = serde_json::to_string(&create_bi_weekly_period()).unwrap();
        assert!(json.contains("\"start_date\":\"2024-01-01\""));
        assert!(json.contains("\"end_date\":\"2024-01-14\""));
        assert!(json.contains("\"payday\":\"2024-01-17\""));
    }

    #[test]
    fn test_deserialize_pay_period() {
        let json = r#"{
            "start_date": "2024-02-16",
            "end_date": "2024-02-29",
            "payday": "2024-03-03"
        }"#;
        let period: PayPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period.start_date, make_date("2024-02-16"));
        assert_eq!(period.end_date, make_date("2024-02-29"));
        assert_eq!(period.payday, make_date("2024-03-03"));
    }
}
