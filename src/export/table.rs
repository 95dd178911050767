//! Plain-text table rendering for terminal output.

use crate::models::{ConflictRow, ROW_COLUMNS};

/// Renders rows as a left-aligned text table with a header and rule line.
///
/// Column widths are measured in characters, so notes containing `→` line up.
pub fn to_table(rows: &[ConflictRow]) -> String {
    let cells: Vec<[String; 7]> = rows.iter().map(ConflictRow::display_columns).collect();

    let mut widths = ROW_COLUMNS.map(|heading| heading.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, ROW_COLUMNS.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &cells {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize; 7]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_header_only_for_no_rows() {
        let table = to_table(&[]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Period Start  Period End  Pay Date"));
        assert!(lines[1].starts_with("------------  ----------"));
    }

    #[test]
    fn test_columns_align_with_multibyte_notes() {
        let row = ConflictRow {
            period_start: make_date("2024-01-06"),
            period_end: make_date("2024-01-19"),
            payday: make_date("2024-01-20"),
            weekday: "Saturday".to_string(),
            is_holiday: false,
            holiday_name: None,
            is_weekend: true,
            adjusted_payday: make_date("2024-01-19"),
            note: "Weekend → 2024-01-19".to_string(),
        };
        let table = to_table(&[row]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        let header_note = lines[0].find("Note").unwrap();
        let row_note = lines[2].find("Weekend →").unwrap();
        assert_eq!(
            lines[0][..header_note].chars().count(),
            lines[2][..row_note].chars().count()
        );
        assert!(lines[2].contains("Saturday"));
        assert!(lines[2].contains("Yes"));
    }
}
