//! Request types for the payroll calendar API.
//!
//! This module defines the JSON request body shared by the `/calendar`
//! endpoints.

use serde::{Deserialize, Serialize};

use crate::config::CalendarSettings;
use crate::error::EngineResult;
use crate::models::PayFrequency;

/// Request body for the `/calendar` endpoints.
///
/// Dates and frequency arrive as text so that bad values surface as engine
/// errors (`INVALID_DATE_FORMAT`, `INVALID_FREQUENCY`) rather than generic
/// JSON rejections. Omitted fields take the usual defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarRequest {
    /// First day of the first period, as `YYYY-MM-DD`.
    pub start_date: String,
    /// Pay frequency label (e.g., "Bi-weekly").
    pub frequency: String,
    /// Number of periods to generate.
    #[serde(default)]
    pub period_count: Option<u32>,
    /// Days between period end and payday.
    #[serde(default)]
    pub payday_offset_days: Option<u32>,
    /// Country code for holidays.
    #[serde(default)]
    pub country: Option<String>,
    /// Optional subdivision code.
    #[serde(default)]
    pub subdivision: Option<String>,
}

impl CalendarRequest {
    /// Converts the request into [`CalendarSettings`]. Range checks are left
    /// to [`CalendarSettings::validate`].
    ///
    /// A request that names a country but no subdivision gets that country's
    /// nationwide holidays. A request that names neither gets the default
    /// region.
    ///
    /// # Errors
    ///
    /// - `InvalidDateFormat` for a malformed start date.
    /// - `InvalidFrequency` for an unknown frequency label.
    pub fn into_settings(self) -> EngineResult<CalendarSettings> {
        let start_date = CalendarSettings::parse_start_date(&self.start_date)?;
        let frequency: PayFrequency = self.frequency.parse()?;

        let mut settings = CalendarSettings::new(start_date, frequency);
        if let Some(count) = self.period_count {
            settings.period_count = count;
        }
        if let Some(offset) = self.payday_offset_days {
            settings.payday_offset_days = offset;
        }
        match self.country {
            Some(country) => {
                settings.country = country;
                settings.subdivision = self.subdivision;
            }
            None if self.subdivision.is_some() => settings.subdivision = self.subdivision,
            None => {}
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use chrono::NaiveDate;

    fn create_request() -> CalendarRequest {
        CalendarRequest {
            start_date: "2024-01-01".to_string(),
            frequency: "Bi-weekly".to_string(),
            period_count: None,
            payday_offset_days: None,
            country: None,
            subdivision: None,
        }
    }

    #[test]
    fn test_deserialize_minimal_request() {
        let json = r#"{ "start_date": "2024-01-01", "frequency": "Weekly" }"#;
        let request: CalendarRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.frequency, "Weekly");
        assert_eq!(request.period_count, None);
        assert_eq!(request.subdivision, None);
    }

    #[test]
    fn test_defaults_applied() {
        let settings = create_request().into_settings().unwrap();

        assert_eq!(settings.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(settings.frequency, PayFrequency::BiWeekly);
        assert_eq!(settings.period_count, 26);
        assert_eq!(settings.payday_offset_days, 3);
        assert_eq!(settings.country, "US");
        assert_eq!(settings.subdivision(), Some("CA"));
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let mut request = create_request();
        request.period_count = Some(12);
        request.payday_offset_days = Some(0);
        request.country = Some("UK".to_string());
        request.subdivision = Some("SCT".to_string());

        let settings = request.into_settings().unwrap();
        assert_eq!(settings.period_count, 12);
        assert_eq!(settings.payday_offset_days, 0);
        assert_eq!(settings.country, "UK");
        assert_eq!(settings.subdivision(), Some("SCT"));
    }

    #[test]
    fn test_other_country_without_subdivision_is_country_wide() {
        let mut request = create_request();
        request.country = Some("CA".to_string());

        let settings = request.into_settings().unwrap();
        assert_eq!(settings.country, "CA");
        assert_eq!(settings.subdivision(), None);
    }

    #[test]
    fn test_bad_start_date() {
        let mut request = create_request();
        request.start_date = "01/01/2024".to_string();

        assert!(matches!(
            request.into_settings(),
            Err(EngineError::InvalidDateFormat { .. })
        ));
    }

    #[test]
    fn test_bad_frequency() {
        let mut request = create_request();
        request.frequency = "Quarterly".to_string();

        match request.into_settings() {
            Err(EngineError::InvalidFrequency { value }) => assert_eq!(value, "Quarterly"),
            other => panic!("Expected InvalidFrequency error, got {:?}", other),
        }
    }
}
