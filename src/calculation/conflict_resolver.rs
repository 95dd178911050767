//! Payday conflict resolution.
//!
//! This module checks each nominal payday against weekends and a holiday
//! lookup, moves conflicting paydays back to an earlier business day, and
//! records the decision as a [`ConflictRow`] plus an [`AuditStep`].

use chrono::{Days, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, ConflictRow, HolidayLookup, PayPeriod, format_date};

use super::day_detection::{days_back_to_friday, is_weekend, weekday_name};

/// Upper bound on how far a holiday payday may be walked back.
pub const MAX_BACKWARD_SEARCH_DAYS: u32 = 366;

/// The result of resolving a single payday, including the row and audit step.
#[derive(Debug, Clone)]
pub struct PaydayResolution {
    /// The resolved row for the period.
    pub row: ConflictRow,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Resolves the payday of one pay period.
///
/// The algorithm, applied to the nominal payday:
///
/// 1. A Saturday or Sunday payday moves back to the preceding Friday.
/// 2. If the nominal payday is a holiday, the date then keeps stepping back one
///    day while it is a holiday or a weekend day. This walk only runs when the
///    nominal payday itself was a holiday; a weekend-only payday stops at the
///    Friday even if that Friday is a holiday.
///
/// The adjusted payday is never later than the nominal one. The weekday name on
/// the row is that of the nominal payday.
///
/// # Errors
///
/// Returns [`EngineError::UnresolvablePayday`] if no business day is found
/// within [`MAX_BACKWARD_SEARCH_DAYS`].
///
/// # Example
///
/// ```
/// use payroll_calendar::calculation::resolve_payday;
/// use payroll_calendar::models::{HolidaySet, PayPeriod};
/// use chrono::NaiveDate;
///
/// let period = PayPeriod {
///     start_date: NaiveDate::from_ymd_opt(2023, 12, 16).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
///     payday: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
/// };
/// let holidays = HolidaySet::from_pairs([(period.payday, "New Year's Day")]);
///
/// let resolution = resolve_payday(&period, &holidays, 1).unwrap();
/// assert_eq!(resolution.row.adjusted_payday, NaiveDate::from_ymd_opt(2023, 12, 29).unwrap());
/// assert_eq!(resolution.row.note, "New Year's Day → 2023-12-29");
/// ```
pub fn resolve_payday<H>(
    period: &PayPeriod,
    holidays: &H,
    step_number: u32,
) -> EngineResult<PaydayResolution>
where
    H: HolidayLookup + ?Sized,
{
    let payday = period.payday;
    let on_weekend = is_weekend(payday);
    let holiday_name = holidays.lookup(payday).map(str::to_string);

    let mut adjusted = payday;

    if on_weekend {
        adjusted = step_back(payday, adjusted, days_back_to_friday(payday))?;
    }

    // The walk is keyed off the nominal payday only.
    if holiday_name.is_some() {
        let mut walked = 0;
        while holidays.is_holiday(adjusted) || is_weekend(adjusted) {
            if walked >= MAX_BACKWARD_SEARCH_DAYS {
                return Err(EngineError::UnresolvablePayday { payday });
            }
            adjusted = step_back(payday, adjusted, 1)?;
            walked += 1;
        }
    }

    let note = adjustment_note(holiday_name.as_deref(), on_weekend, adjusted);

    let (rule_id, rule_name) = match (holiday_name.is_some(), on_weekend) {
        (true, true) => ("holiday_weekend_adjustment", "Holiday and Weekend Back-Adjustment"),
        (true, false) => ("holiday_adjustment", "Holiday Back-Adjustment"),
        (false, true) => ("weekend_adjustment", "Weekend Back-Adjustment"),
        (false, false) => ("payday_unchanged", "Payday Conflict Check"),
    };

    let reasoning = if note.is_empty() {
        format!(
            "Payday {} is a business day; no adjustment required",
            format_date(payday)
        )
    } else {
        format!(
            "Payday {} moved back {} day(s): {}",
            format_date(payday),
            (payday - adjusted).num_days(),
            note
        )
    };

    let row = ConflictRow {
        period_start: period.start_date,
        period_end: period.end_date,
        payday,
        weekday: weekday_name(payday),
        is_holiday: holiday_name.is_some(),
        holiday_name: holiday_name.clone(),
        is_weekend: on_weekend,
        adjusted_payday: adjusted,
        note,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            "period_start": format_date(period.start_date),
            "period_end": format_date(period.end_date),
            "payday": format_date(payday),
        }),
        output: serde_json::json!({
            "is_weekend": on_weekend,
            "holiday": holiday_name,
            "adjusted_payday": format_date(adjusted),
        }),
        reasoning,
    };

    Ok(PaydayResolution { row, audit_step })
}

/// Resolves every period in order, producing one [`ConflictRow`] per period.
///
/// Either every period resolves or the whole call fails.
///
/// # Example
///
/// ```
/// use payroll_calendar::calculation::{generate_pay_periods, resolve_conflicts};
/// use payroll_calendar::models::{HolidaySet, PayFrequency};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let periods = generate_pay_periods(start, PayFrequency::BiWeekly, 1, 3).unwrap();
/// let rows = resolve_conflicts(&periods, &HolidaySet::new()).unwrap();
///
/// assert_eq!(rows[0].adjusted_payday, NaiveDate::from_ymd_opt(2024, 1, 17).unwrap());
/// assert_eq!(rows[0].weekday, "Wednesday");
/// assert!(rows[0].note.is_empty());
/// ```
pub fn resolve_conflicts<H>(periods: &[PayPeriod], holidays: &H) -> EngineResult<Vec<ConflictRow>>
where
    H: HolidayLookup + ?Sized,
{
    periods
        .iter()
        .enumerate()
        .map(|(i, period)| resolve_payday(period, holidays, i as u32 + 1).map(|r| r.row))
        .collect()
}

/// Builds the note describing why and where a payday moved.
fn adjustment_note(holiday_name: Option<&str>, on_weekend: bool, adjusted: NaiveDate) -> String {
    let adjusted = format_date(adjusted);
    match (holiday_name, on_weekend) {
        (Some(name), true) => format!("{} & Weekend → {}", name, adjusted),
        (Some(name), false) => format!("{} → {}", name, adjusted),
        (None, true) => format!("Weekend → {}", adjusted),
        (None, false) => String::new(),
    }
}

fn step_back(payday: NaiveDate, date: NaiveDate, days: u64) -> EngineResult<NaiveDate> {
    date.checked_sub_days(Days::new(days))
        .ok_or(EngineError::UnresolvablePayday { payday })
}
