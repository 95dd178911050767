//! Error types for the payroll calendar engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while building a payroll calendar.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll calendar engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_calendar::error::EngineError;
///
/// let error = EngineError::InvalidFrequency {
///     value: "Fortnightly-ish".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid pay frequency: Fortnightly-ish");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file or directory was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A pay frequency label did not match any supported frequency.
    #[error("Invalid pay frequency: {value}")]
    InvalidFrequency {
        /// The label that was rejected.
        value: String,
    },

    /// A start date was not in `YYYY-MM-DD` form.
    #[error("Invalid date format '{input}': expected YYYY-MM-DD")]
    InvalidDateFormat {
        /// The raw input that failed to parse.
        input: String,
    },

    /// A calendar setting was outside its permitted range.
    #[error("Invalid setting '{field}': {message}")]
    InvalidSetting {
        /// The setting that was invalid.
        field: String,
        /// A description of what made the setting invalid.
        message: String,
    },

    /// No holiday table exists for the requested country.
    #[error("Country not found: {code}")]
    CountryNotFound {
        /// The country code that was requested.
        code: String,
    },

    /// The holiday provider has no table for the country and subdivision pair.
    #[error("Unresolved region: subdivision '{subdivision}' is not defined for {country}")]
    UnresolvedRegion {
        /// The country code.
        country: String,
        /// The subdivision code that could not be resolved.
        subdivision: String,
    },

    /// Date arithmetic left the representable calendar range.
    #[error("Date out of range: {message}")]
    DateOutOfRange {
        /// A description of the computation that overflowed.
        message: String,
    },

    /// No business day could be found before a holiday payday.
    #[error("Unable to find a business day on or before payday {payday}")]
    UnresolvablePayday {
        /// The nominal payday that could not be adjusted.
        payday: NaiveDate,
    },

    /// Rendering rows into an export format failed.
    #[error("Failed to export {format}: {message}")]
    ExportError {
        /// The export format (e.g., "csv").
        format: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/us.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/us.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_frequency_displays_value() {
        let error = EngineError::InvalidFrequency {
            value: "Quarterly".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid pay frequency: Quarterly");
    }

    #[test]
    fn test_invalid_date_format_displays_input() {
        let error = EngineError::InvalidDateFormat {
            input: "01/02/2024".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date format '01/02/2024': expected YYYY-MM-DD"
        );
    }

    #[test]
    fn test_invalid_setting_displays_field_and_message() {
        let error = EngineError::InvalidSetting {
            field: "period_count".to_string(),
            message: "must be between 6 and 52".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid setting 'period_count': must be between 6 and 52"
        );
    }

    #[test]
    fn test_unresolved_region_displays_country_and_subdivision() {
        let error = EngineError::UnresolvedRegion {
            country: "US".to_string(),
            subdivision: "ZZ".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unresolved region: subdivision 'ZZ' is not defined for US"
        );
    }

    #[test]
    fn test_unresolvable_payday_displays_date() {
        let error = EngineError::UnresolvablePayday {
            payday: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Unable to find a business day on or before payday 2024-01-01"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_country_not_found() -> EngineResult<()> {
            Err(EngineError::CountryNotFound {
                code: "XX".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_country_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
