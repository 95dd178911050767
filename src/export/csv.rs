//! CSV export.

use crate::error::{EngineError, EngineResult};
use crate::models::{ConflictRow, ROW_COLUMNS};

/// Writes rows as CSV with a header row, in [`ROW_COLUMNS`] order.
///
/// # Errors
///
/// Returns [`EngineError::ExportError`] if the writer fails.
///
/// # Example
///
/// ```
/// use payroll_calendar::calculation::{generate_pay_periods, resolve_conflicts};
/// use payroll_calendar::export::to_csv;
/// use payroll_calendar::models::{HolidaySet, PayFrequency};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let periods = generate_pay_periods(start, PayFrequency::BiWeekly, 1, 3).unwrap();
/// let rows = resolve_conflicts(&periods, &HolidaySet::new()).unwrap();
///
/// let csv = to_csv(&rows).unwrap();
/// assert_eq!(
///     csv,
///     "Period Start,Period End,Pay Date,Pay Day,Holiday,Weekend,Note\n\
///      2024-01-01,2024-01-14,2024-01-17,Wednesday,No,No,\n"
/// );
/// ```
pub fn to_csv(rows: &[ConflictRow]) -> EngineResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(ROW_COLUMNS).map_err(export_error)?;
    for row in rows {
        writer
            .write_record(row.display_columns())
            .map_err(export_error)?;
    }

    let bytes = writer.into_inner().map_err(|e| EngineError::ExportError {
        format: "csv".to_string(),
        message: e.to_string(),
    })?;

    String::from_utf8(bytes).map_err(|e| EngineError::ExportError {
        format: "csv".to_string(),
        message: e.to_string(),
    })
}

fn export_error(err: csv::Error) -> EngineError {
    EngineError::ExportError {
        format: "csv".to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_holiday_row() -> ConflictRow {
        ConflictRow {
            period_start: make_date("2023-12-16"),
            period_end: make_date("2023-12-31"),
            payday: make_date("2024-01-01"),
            weekday: "Monday".to_string(),
            is_holiday: true,
            holiday_name: Some("New Year's Day".to_string()),
            is_weekend: false,
            adjusted_payday: make_date("2023-12-29"),
            note: "New Year's Day → 2023-12-29".to_string(),
        }
    }

    #[test]
    fn test_empty_rows_write_header_only() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(
            csv,
            "Period Start,Period End,Pay Date,Pay Day,Holiday,Weekend,Note\n"
        );
    }

    #[test]
    fn test_pay_date_column_is_nominal_payday() {
        let csv = to_csv(&[create_holiday_row()]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "2023-12-16,2023-12-31,2024-01-01,Monday,Yes,No,New Year's Day → 2023-12-29"
        );
    }

    #[test]
    fn test_notes_with_commas_are_quoted() {
        let mut row = create_holiday_row();
        row.note = "Christmas Day, observed → 2024-12-24".to_string();

        let csv = to_csv(&[row]).unwrap();
        assert!(csv.contains("\"Christmas Day, observed → 2024-12-24\""));
    }

    #[test]
    fn test_output_reads_back_with_csv_reader() {
        let csv = to_csv(&[create_holiday_row(), create_holiday_row()]).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());

        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), ROW_COLUMNS.to_vec());
        assert_eq!(reader.records().count(), 2);
    }
}
