//! Calendar generation: settings in, resolved rows and audit trace out.

use std::time::Instant;

use chrono::{Datelike, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::config::{CalendarSettings, HolidayConfigLoader};
use crate::error::EngineResult;
use crate::models::{AuditTrace, AuditWarning, CalendarResult, HolidayLookup, PayPeriod};

use super::{generate_pay_periods, resolve_payday};

/// Generates a complete payroll calendar using holidays from `provider`.
///
/// Holidays are expanded from one year before the first period through the
/// year of the last payday, so back-adjustments across New Year see the
/// previous year's holidays. An unknown subdivision falls back to the
/// country-wide table and is reported as an audit warning.
///
/// # Errors
///
/// - [`EngineError::InvalidSetting`](crate::error::EngineError::InvalidSetting)
///   for out-of-range settings.
/// - [`EngineError::CountryNotFound`](crate::error::EngineError::CountryNotFound)
///   for an unknown country.
/// - Any error from period generation or payday resolution.
///
/// # Example
///
/// ```no_run
/// use payroll_calendar::calculation::generate_calendar;
/// use payroll_calendar::config::{CalendarSettings, HolidayConfigLoader};
/// use payroll_calendar::models::PayFrequency;
///
/// let loader = HolidayConfigLoader::load("./config/holidays")?;
/// let start = CalendarSettings::parse_start_date("2024-01-01")?;
/// let settings = CalendarSettings::new(start, PayFrequency::BiWeekly);
///
/// let calendar = generate_calendar(&settings, &loader)?;
/// assert_eq!(calendar.rows.len(), 26);
/// # Ok::<(), payroll_calendar::error::EngineError>(())
/// ```
pub fn generate_calendar(
    settings: &CalendarSettings,
    provider: &HolidayConfigLoader,
) -> EngineResult<CalendarResult> {
    let start_time = Instant::now();
    settings.validate()?;

    let periods = generate_pay_periods(
        settings.start_date,
        settings.frequency,
        settings.period_count,
        settings.payday_offset_days,
    )?;

    let years = holiday_years(&periods);
    let resolved = provider.holiday_set_with_fallback(
        &settings.country,
        settings.subdivision(),
        years.clone(),
    )?;

    debug!(
        region = %resolved.region,
        holidays = resolved.holidays.len(),
        first_year = *years.start(),
        last_year = *years.end(),
        "Resolved holiday table"
    );

    let mut warnings = Vec::new();
    if let Some(subdivision) = &resolved.fallback_from {
        warnings.push(AuditWarning {
            code: "REGION_FALLBACK".to_string(),
            message: format!(
                "Subdivision '{}' is not defined for {}; using country-wide holidays",
                subdivision, resolved.region
            ),
            severity: "medium".to_string(),
        });
    }

    let mut result = build_calendar(settings, &periods, &resolved.holidays, warnings)?;
    result.audit_trace.duration_us = start_time.elapsed().as_micros() as u64;
    Ok(result)
}

/// Resolves already-generated periods against any holiday lookup and wraps
/// the rows in a [`CalendarResult`].
pub fn build_calendar<H>(
    settings: &CalendarSettings,
    periods: &[PayPeriod],
    holidays: &H,
    warnings: Vec<AuditWarning>,
) -> EngineResult<CalendarResult>
where
    H: HolidayLookup + ?Sized,
{
    let start_time = Instant::now();
    let mut rows = Vec::with_capacity(periods.len());
    let mut steps = Vec::with_capacity(periods.len());

    for (i, period) in periods.iter().enumerate() {
        let resolution = resolve_payday(period, holidays, i as u32 + 1)?;
        rows.push(resolution.row);
        steps.push(resolution.audit_step);
    }

    Ok(CalendarResult {
        calendar_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        settings: settings.clone(),
        rows,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

/// Years whose holidays can influence the given periods.
fn holiday_years(periods: &[PayPeriod]) -> std::ops::RangeInclusive<i32> {
    let first = periods
        .iter()
        .map(|p| p.start_date.year())
        .min()
        .unwrap_or_default();
    let last = periods
        .iter()
        .map(|p| p.payday.year())
        .max()
        .unwrap_or(first);
    (first - 1)..=last
}
