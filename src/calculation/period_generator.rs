//! Pay period generation.
//!
//! This module turns a start date, a [`PayFrequency`] and a period count into
//! an ordered list of [`PayPeriod`]s with their nominal paydays.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::{PayFrequency, PayPeriod};

/// The boundaries of one pay period and where the next one begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodBounds {
    /// The first day of the period.
    pub start: NaiveDate,
    /// The last day of the period.
    pub end: NaiveDate,
    /// The cursor the following period is derived from.
    pub next_cursor: NaiveDate,
}

/// Computes the period that begins at `cursor` for the given frequency.
///
/// - Weekly: `[cursor, cursor + 6]`, next cursor `cursor + 7`.
/// - Bi-weekly: `[cursor, cursor + 13]`, next cursor `cursor + 14`.
/// - Semi-monthly: a cursor on day 1-15 yields `[1st, 15th]` with the next
///   cursor on the 16th; any later day yields `[16th, month end]` with the next
///   cursor on the 1st of the following month. Boundaries come from the
///   cursor's day number alone.
/// - Monthly: `[1st, month end]` of the cursor's month, next cursor on the 1st
///   of the following month.
///
/// # Example
///
/// ```
/// use payroll_calendar::calculation::period_bounds;
/// use payroll_calendar::models::PayFrequency;
/// use chrono::NaiveDate;
///
/// let bounds = period_bounds(
///     NaiveDate::from_ymd_opt(2024, 2, 16).unwrap(),
///     PayFrequency::SemiMonthly,
/// )
/// .unwrap();
///
/// assert_eq!(bounds.start, NaiveDate::from_ymd_opt(2024, 2, 16).unwrap());
/// assert_eq!(bounds.end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(bounds.next_cursor, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// ```
pub fn period_bounds(cursor: NaiveDate, frequency: PayFrequency) -> EngineResult<PeriodBounds> {
    match frequency {
        PayFrequency::Weekly => Ok(PeriodBounds {
            start: cursor,
            end: add_days(cursor, 6)?,
            next_cursor: add_days(cursor, 7)?,
        }),
        PayFrequency::BiWeekly => Ok(PeriodBounds {
            start: cursor,
            end: add_days(cursor, 13)?,
            next_cursor: add_days(cursor, 14)?,
        }),
        PayFrequency::SemiMonthly => {
            if cursor.day() <= 15 {
                Ok(PeriodBounds {
                    start: with_day(cursor, 1)?,
                    end: with_day(cursor, 15)?,
                    next_cursor: with_day(cursor, 16)?,
                })
            } else {
                let next_month = first_of_next_month(cursor)?;
                Ok(PeriodBounds {
                    start: with_day(cursor, 16)?,
                    end: day_before(next_month)?,
                    next_cursor: next_month,
                })
            }
        }
        PayFrequency::Monthly => {
            let next_month = first_of_next_month(cursor)?;
            Ok(PeriodBounds {
                start: with_day(cursor, 1)?,
                end: day_before(next_month)?,
                next_cursor: next_month,
            })
        }
    }
}

/// Generates `period_count` consecutive pay periods starting at `start_date`.
///
/// Each period's payday is its end date plus `payday_offset_days`; an offset of
/// zero pays on the last day of the period.
///
/// # Errors
///
/// - [`EngineError::InvalidSetting`] if `period_count` is zero.
/// - [`EngineError::DateOutOfRange`] if a boundary or payday cannot be
///   represented.
///
/// # Example
///
/// ```
/// use payroll_calendar::calculation::generate_pay_periods;
/// use payroll_calendar::models::PayFrequency;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let periods = generate_pay_periods(start, PayFrequency::BiWeekly, 2, 3).unwrap();
///
/// assert_eq!(periods.len(), 2);
/// assert_eq!(periods[0].end_date, NaiveDate::from_ymd_opt(2024, 1, 14).unwrap());
/// assert_eq!(periods[0].payday, NaiveDate::from_ymd_opt(2024, 1, 17).unwrap());
/// assert_eq!(periods[1].start_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
/// ```
pub fn generate_pay_periods(
    start_date: NaiveDate,
    frequency: PayFrequency,
    period_count: u32,
    payday_offset_days: u32,
) -> EngineResult<Vec<PayPeriod>> {
    if period_count == 0 {
        return Err(EngineError::InvalidSetting {
            field: "period_count".to_string(),
            message: "at least one pay period is required".to_string(),
        });
    }

    let mut periods = Vec::with_capacity(period_count as usize);
    let mut cursor = start_date;

    for _ in 0..period_count {
        let bounds = period_bounds(cursor, frequency)?;
        let payday = add_days(bounds.end, u64::from(payday_offset_days))?;

        periods.push(PayPeriod {
            start_date: bounds.start,
            end_date: bounds.end,
            payday,
        });

        cursor = bounds.next_cursor;
    }

    Ok(periods)
}

fn add_days(date: NaiveDate, days: u64) -> EngineResult<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| EngineError::DateOutOfRange {
            message: format!("{} + {} days", date, days),
        })
}

fn with_day(date: NaiveDate, day: u32) -> EngineResult<NaiveDate> {
    date.with_day(day).ok_or_else(|| EngineError::DateOutOfRange {
        message: format!("day {} of {}-{:02}", day, date.year(), date.month()),
    })
}

fn day_before(date: NaiveDate) -> EngineResult<NaiveDate> {
    date.pred_opt().ok_or_else(|| EngineError::DateOutOfRange {
        message: format!("day before {}", date),
    })
}

fn first_of_next_month(date: NaiveDate) -> EngineResult<NaiveDate> {
    with_day(date, 1)?
        .checked_add_months(Months::new(1))
        .ok_or_else(|| EngineError::DateOutOfRange {
            message: format!("month after {}", date),
        })
}
