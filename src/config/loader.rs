//! Holiday table loading functionality.
//!
//! This module provides the [`HolidayConfigLoader`] type for loading per-country
//! holiday tables from YAML files and turning them into [`HolidaySet`]s.

use std::collections::BTreeMap;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use tracing::{debug, warn};

use crate::calculation::expand_holidays;
use crate::error::{EngineError, EngineResult};
use crate::models::{HolidaySet, PublicHoliday};

use super::types::{CountryHolidays, HolidayDefinition};

/// Holidays resolved for a region, plus how the region was resolved.
#[derive(Debug, Clone)]
pub struct RegionHolidays {
    /// The holiday lookup for the region.
    pub holidays: HolidaySet,
    /// The region the holidays were built for (e.g., "US-CA" or "US").
    pub region: String,
    /// The subdivision that could not be resolved, if a fallback happened.
    pub fallback_from: Option<String>,
}

/// Loads and provides access to holiday tables.
///
/// # Directory Structure
///
/// The configuration directory holds one YAML file per country:
/// ```text
/// config/holidays/
/// ├── ca.yaml
/// ├── uk.yaml
/// └── us.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_calendar::config::HolidayConfigLoader;
/// use payroll_calendar::models::HolidayLookup;
/// use chrono::NaiveDate;
///
/// let loader = HolidayConfigLoader::load("./config/holidays").unwrap();
/// let holidays = loader.holiday_set("US", Some("CA"), 2024..=2024).unwrap();
///
/// let new_year = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// assert_eq!(holidays.lookup(new_year), Some("New Year's Day"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HolidayConfigLoader {
    countries: BTreeMap<String, CountryHolidays>,
}

impl HolidayConfigLoader {
    /// Loads every `*.yaml` holiday table from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `HolidayConfigLoader` on success, or an error if:
    /// - The directory is missing or holds no YAML files
    /// - Any file contains invalid YAML
    /// - Any required field is missing from a table
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_calendar::config::HolidayConfigLoader;
    ///
    /// let loader = HolidayConfigLoader::load("./config/holidays")?;
    /// # Ok::<(), payroll_calendar::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.is_dir() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                paths.push(path);
            }
        }
        paths.sort();

        let mut countries = Vec::with_capacity(paths.len());
        for path in &paths {
            let country = Self::load_yaml::<CountryHolidays>(path)?;
            debug!(
                country = %country.code,
                holidays = country.holidays.len(),
                subdivisions = country.subdivisions.len(),
                "Loaded holiday table"
            );
            countries.push(country);
        }

        if countries.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no holiday files found)", dir_str),
            });
        }

        Ok(Self::from_countries(countries))
    }

    /// Builds a loader from tables already in memory.
    pub fn from_countries<I>(countries: I) -> Self
    where
        I: IntoIterator<Item = CountryHolidays>,
    {
        let countries = countries
            .into_iter()
            .map(|country| (country.code.to_ascii_uppercase(), country))
            .collect();
        Self { countries }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Iterates over all loaded country tables, ordered by code.
    pub fn countries(&self) -> impl Iterator<Item = &CountryHolidays> {
        self.countries.values()
    }

    /// Gets a country table by code, ignoring case.
    ///
    /// # Returns
    ///
    /// Returns the table if found, or `CountryNotFound` error.
    pub fn country(&self, code: &str) -> EngineResult<&CountryHolidays> {
        self.countries
            .get(&code.trim().to_ascii_uppercase())
            .ok_or_else(|| EngineError::CountryNotFound {
                code: code.to_string(),
            })
    }

    /// Expands the holidays of a country, and optionally one subdivision,
    /// across a range of years.
    ///
    /// # Errors
    ///
    /// - [`EngineError::CountryNotFound`] for an unknown country.
    /// - [`EngineError::UnresolvedRegion`] for an unknown subdivision.
    pub fn holidays(
        &self,
        country: &str,
        subdivision: Option<&str>,
        years: RangeInclusive<i32>,
    ) -> EngineResult<Vec<PublicHoliday>> {
        let table = self.country(country)?;
        let country_region = table.code.to_ascii_uppercase();

        let mut definitions: Vec<(&HolidayDefinition, String)> = table
            .holidays
            .iter()
            .map(|definition| (definition, country_region.clone()))
            .collect();

        if let Some(code) = subdivision {
            let (sub_code, sub) =
                table
                    .subdivision(code)
                    .ok_or_else(|| EngineError::UnresolvedRegion {
                        country: country_region.clone(),
                        subdivision: code.to_string(),
                    })?;
            let sub_region = format!("{}-{}", country_region, sub_code);
            definitions.extend(
                sub.holidays
                    .iter()
                    .map(|definition| (definition, sub_region.clone())),
            );
        }

        let definitions: Vec<(&HolidayDefinition, &str)> = definitions
            .iter()
            .map(|(definition, region)| (*definition, region.as_str()))
            .collect();

        Ok(years
            .flat_map(|year| expand_holidays(&definitions, &table.observed_label, year))
            .collect())
    }

    /// Builds a [`HolidaySet`] for a country and optional subdivision.
    ///
    /// # Errors
    ///
    /// Same as [`HolidayConfigLoader::holidays`].
    pub fn holiday_set(
        &self,
        country: &str,
        subdivision: Option<&str>,
        years: RangeInclusive<i32>,
    ) -> EngineResult<HolidaySet> {
        Ok(self
            .holidays(country, subdivision, years)?
            .into_iter()
            .collect())
    }

    /// Builds a [`HolidaySet`], falling back to country-wide holidays when the
    /// subdivision cannot be resolved.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CountryNotFound`] for an unknown country. An
    /// unknown subdivision is not an error here.
    pub fn holiday_set_with_fallback(
        &self,
        country: &str,
        subdivision: Option<&str>,
        years: RangeInclusive<i32>,
    ) -> EngineResult<RegionHolidays> {
        let country_code = self.country(country)?.code.to_ascii_uppercase();

        match self.holiday_set(country, subdivision, years.clone()) {
            Ok(holidays) => {
                let region = match subdivision {
                    Some(sub) => format!("{}-{}", country_code, sub.to_ascii_uppercase()),
                    None => country_code,
                };
                Ok(RegionHolidays {
                    holidays,
                    region,
                    fallback_from: None,
                })
            }
            Err(EngineError::UnresolvedRegion {
                country: unresolved_country,
                subdivision: unresolved,
            }) => {
                warn!(
                    country = %unresolved_country,
                    subdivision = %unresolved,
                    "Subdivision not found, falling back to country-wide holidays"
                );
                let holidays = self.holiday_set(country, None, years)?;
                Ok(RegionHolidays {
                    holidays,
                    region: country_code,
                    fallback_from: Some(unresolved),
                })
            }
            Err(err) => Err(err),
        }
    }
}
