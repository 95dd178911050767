//! Holiday rule expansion.
//!
//! Turns the rule-based holiday definitions from the YAML tables into concrete
//! [`PublicHoliday`] dates for a given year, including substitute days for
//! holidays that fall on a weekend.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::config::{HolidayDefinition, HolidayRule, Observance};
use crate::models::PublicHoliday;

use super::day_detection::is_weekend;

/// Computes Western (Gregorian) Easter Sunday for `year`.
///
/// Uses the anonymous Gregorian computus.
///
/// # Example
///
/// ```
/// use payroll_calendar::calculation::easter_sunday;
/// use chrono::NaiveDate;
///
/// assert_eq!(easter_sunday(2024), NaiveDate::from_ymd_opt(2024, 3, 31));
/// assert_eq!(easter_sunday(2025), NaiveDate::from_ymd_opt(2025, 4, 20));
/// ```
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// Places a rule in `year`, before any offset or observance is applied.
///
/// Returns `None` when the rule names a date that does not exist in that year
/// (e.g., a fifth Monday that is absent).
pub fn rule_date(rule: &HolidayRule, year: i32) -> Option<NaiveDate> {
    match *rule {
        HolidayRule::Fixed { month, day } => NaiveDate::from_ymd_opt(year, month, day),
        HolidayRule::NthWeekday { month, weekday, n } => nth_weekday(year, month, weekday, n),
        HolidayRule::WeekdayOnOrBefore {
            month,
            day,
            weekday,
        } => {
            let anchor = NaiveDate::from_ymd_opt(year, month, day)?;
            let back = (7 + anchor.weekday().num_days_from_monday()
                - weekday.num_days_from_monday())
                % 7;
            anchor.checked_sub_days(Days::new(u64::from(back)))
        }
        HolidayRule::Easter => easter_sunday(year),
    }
}

fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: i32) -> Option<NaiveDate> {
    if n > 0 {
        return NaiveDate::from_weekday_of_month_opt(year, month, weekday, u8::try_from(n).ok()?);
    }
    if n == 0 {
        return None;
    }

    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first_of_month.checked_add_months(chrono::Months::new(1))?.pred_opt()?;
    let back = (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    let weeks_back = u64::from(n.unsigned_abs() - 1) * 7;
    let date = last.checked_sub_days(Days::new(u64::from(back) + weeks_back))?;
    (date.month() == month).then_some(date)
}

/// Resolves a definition to its actual date in `year`, if it applies.
fn actual_date(definition: &HolidayDefinition, year: i32) -> Option<NaiveDate> {
    if !definition.applies_in(year) {
        return None;
    }
    let date = rule_date(&definition.rule, year)?;
    if definition.offset_days >= 0 {
        date.checked_add_days(Days::new(definition.offset_days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(definition.offset_days.unsigned_abs()))
    }
}

/// Finds the substitute day for a weekend holiday.
///
/// `taken` holds dates that are already holidays and cannot host a
/// next-weekday substitute.
fn observed_date(
    observance: Observance,
    date: NaiveDate,
    taken: &BTreeSet<NaiveDate>,
) -> Option<NaiveDate> {
    if !is_weekend(date) {
        return None;
    }
    match observance {
        Observance::None => None,
        Observance::NearestWeekday => match date.weekday() {
            Weekday::Sat => date.pred_opt(),
            _ => date.succ_opt(),
        },
        Observance::NextWeekday => {
            let mut candidate = date.succ_opt()?;
            while is_weekend(candidate) || taken.contains(&candidate) {
                candidate = candidate.succ_opt()?;
            }
            Some(candidate)
        }
    }
}

/// Expands a list of `(definition, region)` pairs into holidays for `year`.
///
/// Actual dates come first in definition order, followed by the substitute
/// days, named `"<name> (<observed_label>)"`. Substitute days are assigned in
/// definition order, so a second weekend holiday skips past a day already
/// taken by the first.
///
/// # Example
///
/// ```
/// use payroll_calendar::calculation::expand_holidays;
/// use payroll_calendar::config::{HolidayDefinition, HolidayRule, Observance};
/// use chrono::NaiveDate;
///
/// let independence = HolidayDefinition {
///     name: "Independence Day".to_string(),
///     rule: HolidayRule::Fixed { month: 7, day: 4 },
///     observance: Observance::NearestWeekday,
///     offset_days: 0,
///     since: None,
///     until: None,
/// };
///
/// // 2026-07-04 is a Saturday, observed on Friday 2026-07-03
/// let holidays = expand_holidays(&[(&independence, "US")], "observed", 2026);
/// assert_eq!(holidays.len(), 2);
/// assert_eq!(holidays[1].date, NaiveDate::from_ymd_opt(2026, 7, 3).unwrap());
/// assert_eq!(holidays[1].name, "Independence Day (observed)");
/// ```
pub fn expand_holidays(
    definitions: &[(&HolidayDefinition, &str)],
    observed_label: &str,
    year: i32,
) -> Vec<PublicHoliday> {
    let actual: Vec<(&HolidayDefinition, &str, NaiveDate)> = definitions
        .iter()
        .filter_map(|(definition, region)| {
            actual_date(definition, year).map(|date| (*definition, *region, date))
        })
        .collect();

    let mut taken: BTreeSet<NaiveDate> = actual.iter().map(|(_, _, date)| *date).collect();

    let mut holidays: Vec<PublicHoliday> = actual
        .iter()
        .map(|(definition, region, date)| PublicHoliday {
            date: *date,
            name: definition.name.clone(),
            region: region.to_string(),
        })
        .collect();

    for (definition, region, date) in &actual {
        if let Some(observed) = observed_date(definition.observance, *date, &taken) {
            taken.insert(observed);
            holidays.push(PublicHoliday {
                date: observed,
                name: format!("{} ({})", definition.name, observed_label),
                region: region.to_string(),
            });
        }
    }

    holidays
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn definition(name: &str, rule: HolidayRule, observance: Observance) -> HolidayDefinition {
        HolidayDefinition {
            name: name.to_string(),
            rule,
            observance,
            offset_days: 0,
            since: None,
            until: None,
        }
    }

    // ==========================================================================
    // Easter
    // ==========================================================================

    #[test]
    fn test_easter_sunday_known_years() {
        assert_eq!(easter_sunday(2000), Some(make_date("2000-04-23")));
        assert_eq!(easter_sunday(2019), Some(make_date("2019-04-21")));
        assert_eq!(easter_sunday(2023), Some(make_date("2023-04-09")));
        assert_eq!(easter_sunday(2024), Some(make_date("2024-03-31")));
        assert_eq!(easter_sunday(2026), Some(make_date("2026-04-05")));
    }

    // ==========================================================================
    // Rule placement
    // ==========================================================================

    #[test]
    fn test_nth_weekday_third_monday_of_january() {
        let rule = HolidayRule::NthWeekday {
            month: 1,
            weekday: Weekday::Mon,
            n: 3,
        };
        assert_eq!(rule_date(&rule, 2024), Some(make_date("2024-01-15")));
    }

    #[test]
    fn test_nth_weekday_last_monday_of_may() {
        let rule = HolidayRule::NthWeekday {
            month: 5,
            weekday: Weekday::Mon,
            n: -1,
        };
        assert_eq!(rule_date(&rule, 2024), Some(make_date("2024-05-27")));
        assert_eq!(rule_date(&rule, 2021), Some(make_date("2021-05-31")));
    }

    #[test]
    fn test_nth_weekday_missing_fifth_occurrence() {
        let rule = HolidayRule::NthWeekday {
            month: 2,
            weekday: Weekday::Mon,
            n: 5,
        };
        assert_eq!(rule_date(&rule, 2024), None);
    }

    #[test]
    fn test_weekday_on_or_before_victoria_day() {
        let rule = HolidayRule::WeekdayOnOrBefore {
            month: 5,
            day: 24,
            weekday: Weekday::Mon,
        };
        assert_eq!(rule_date(&rule, 2024), Some(make_date("2024-05-20")));
        // 2021-05-24 is itself a Monday
        assert_eq!(rule_date(&rule, 2021), Some(make_date("2021-05-24")));
    }

    #[test]
    fn test_offset_days_from_easter() {
        let mut good_friday = definition("Good Friday", HolidayRule::Easter, Observance::None);
        good_friday.offset_days = -2;

        let holidays = expand_holidays(&[(&good_friday, "CA")], "observed", 2024);
        assert_eq!(holidays.len(), 1);
        assert_eq!(holidays[0].date, make_date("2024-03-29"));
    }

    #[test]
    fn test_since_excludes_earlier_years() {
        let mut juneteenth = definition(
            "Juneteenth National Independence Day",
            HolidayRule::Fixed { month: 6, day: 19 },
            Observance::NearestWeekday,
        );
        juneteenth.since = Some(2021);

        assert!(expand_holidays(&[(&juneteenth, "US")], "observed", 2020).is_empty());
        assert_eq!(
            expand_holidays(&[(&juneteenth, "US")], "observed", 2024).len(),
            1
        );
    }

    // ==========================================================================
    // Observance
    // ==========================================================================

    #[test]
    fn test_nearest_weekday_sunday_moves_to_monday() {
        let christmas = definition(
            "Christmas Day",
            HolidayRule::Fixed { month: 12, day: 25 },
            Observance::NearestWeekday,
        );

        // 2022-12-25 is a Sunday
        let holidays = expand_holidays(&[(&christmas, "US")], "observed", 2022);
        assert_eq!(holidays.len(), 2);
        assert_eq!(holidays[0].date, make_date("2022-12-25"));
        assert_eq!(holidays[1].date, make_date("2022-12-26"));
        assert_eq!(holidays[1].name, "Christmas Day (observed)");
    }

    #[test]
    fn test_nearest_weekday_can_cross_into_previous_year() {
        let new_year = definition(
            "New Year's Day",
            HolidayRule::Fixed { month: 1, day: 1 },
            Observance::NearestWeekday,
        );

        // 2022-01-01 is a Saturday
        let holidays = expand_holidays(&[(&new_year, "US")], "observed", 2022);
        assert_eq!(holidays[1].date, make_date("2021-12-31"));
    }

    #[test]
    fn test_next_weekday_skips_taken_days() {
        let christmas = definition(
            "Christmas Day",
            HolidayRule::Fixed { month: 12, day: 25 },
            Observance::NextWeekday,
        );
        let boxing = definition(
            "Boxing Day",
            HolidayRule::Fixed { month: 12, day: 26 },
            Observance::NextWeekday,
        );

        // 2021-12-25 is a Saturday, 2021-12-26 a Sunday
        let holidays = expand_holidays(
            &[(&christmas, "UK"), (&boxing, "UK")],
            "substitute day",
            2021,
        );

        assert_eq!(holidays.len(), 4);
        assert_eq!(holidays[2].date, make_date("2021-12-27"));
        assert_eq!(holidays[2].name, "Christmas Day (substitute day)");
        assert_eq!(holidays[3].date, make_date("2021-12-28"));
        assert_eq!(holidays[3].name, "Boxing Day (substitute day)");
    }

    #[test]
    fn test_weekday_holiday_has_no_substitute() {
        let christmas = definition(
            "Christmas Day",
            HolidayRule::Fixed { month: 12, day: 25 },
            Observance::NearestWeekday,
        );

        // 2024-12-25 is a Wednesday
        let holidays = expand_holidays(&[(&christmas, "US")], "observed", 2024);
        assert_eq!(holidays.len(), 1);
    }

    #[test]
    fn test_region_is_carried_through() {
        let cesar_chavez = definition(
            "Cesar Chavez Day",
            HolidayRule::Fixed { month: 3, day: 31 },
            Observance::NearestWeekday,
        );

        let holidays = expand_holidays(&[(&cesar_chavez, "US-CA")], "observed", 2024);
        assert!(holidays.iter().all(|h| h.region == "US-CA"));
    }
}
