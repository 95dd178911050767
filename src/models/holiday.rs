//! Public holiday models and the holiday lookup capability.
//!
//! The conflict resolver never fetches holiday data itself. Callers hand it
//! something implementing [`HolidayLookup`], usually a [`HolidaySet`] built by
//! the holiday provider or assembled by hand in tests.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const NAME_SEPARATOR: &str = "; ";

/// Represents a public holiday observed in a region.
///
/// # Example
///
/// ```
/// use payroll_calendar::models::PublicHoliday;
/// use chrono::NaiveDate;
///
/// let holiday = PublicHoliday {
///     date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     name: "New Year's Day".to_string(),
///     region: "US".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the public holiday.
    pub date: NaiveDate,
    /// The name of the public holiday (e.g., "New Year's Day").
    pub name: String,
    /// The region where this holiday applies (e.g., "US", "US-CA").
    pub region: String,
}

/// Read-only, date-keyed holiday lookup.
///
/// Implementations must be pure: the same date always yields the same answer.
pub trait HolidayLookup {
    /// Returns the holiday name for `date`, if it is a holiday.
    fn lookup(&self, date: NaiveDate) -> Option<&str>;

    /// Returns `true` if `date` is a holiday.
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.lookup(date).is_some()
    }
}

/// An immutable set of holidays keyed by date.
///
/// When several holidays fall on the same date their names are joined with
/// `"; "` in insertion order. A name already present for the date is not
/// repeated.
///
/// # Example
///
/// ```
/// use payroll_calendar::models::{HolidayLookup, HolidaySet};
/// use chrono::NaiveDate;
///
/// let new_year = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let holidays = HolidaySet::from_pairs([(new_year, "New Year's Day")]);
///
/// assert_eq!(holidays.lookup(new_year), Some("New Year's Day"));
/// assert!(!holidays.is_holiday(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidaySet {
    holidays: BTreeMap<NaiveDate, String>,
}

impl HolidaySet {
    /// Creates an empty holiday set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from `(date, name)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, S)>,
        S: Into<String>,
    {
        let mut holidays: BTreeMap<NaiveDate, String> = BTreeMap::new();
        for (date, name) in pairs {
            let name = name.into();
            match holidays.entry(date) {
                Entry::Vacant(slot) => {
                    slot.insert(name);
                }
                Entry::Occupied(mut slot) => {
                    let joined = slot.get_mut();
                    if !joined.split(NAME_SEPARATOR).any(|existing| existing == name) {
                        joined.push_str(NAME_SEPARATOR);
                        joined.push_str(&name);
                    }
                }
            }
        }
        Self { holidays }
    }

    /// Returns the number of holiday dates in the set.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns `true` if the set holds no holidays.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl FromIterator<PublicHoliday> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = PublicHoliday>>(iter: I) -> Self {
        Self::from_pairs(iter.into_iter().map(|h| (h.date, h.name)))
    }
}

impl HolidayLookup for HolidaySet {
    fn lookup(&self, date: NaiveDate) -> Option<&str> {
        self.holidays.get(&date).map(String::as_str)
    }
}

impl<T: HolidayLookup + ?Sized> HolidayLookup for &T {
    fn lookup(&self, date: NaiveDate) -> Option<&str> {
        (**self).lookup(date)
    }
}
