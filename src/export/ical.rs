//! iCalendar (RFC 5545) export.
//!
//! Each row becomes an all-day `VEVENT` on the nominal payday. The adjusted
//! date is carried in the event description when the payday moved.

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::models::{ConflictRow, format_date};

/// `PRODID` written into every exported calendar.
pub const PRODUCT_ID: &str = "-//payroll-calendar//Payroll Calendar//EN";

const UID_DOMAIN: &str = "payroll-calendar";

const MAX_LINE_OCTETS: usize = 75;

/// Renders rows as an iCalendar document with CRLF line endings.
///
/// UIDs are derived from the period dates, so re-exporting the same periods
/// updates rather than duplicates events in calendar clients. `DTSTAMP` is
/// taken from `generated_at`.
///
/// # Example
///
/// ```
/// use payroll_calendar::calculation::{generate_pay_periods, resolve_conflicts};
/// use payroll_calendar::export::to_ical;
/// use payroll_calendar::models::{HolidaySet, PayFrequency};
/// use chrono::{NaiveDate, Utc};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let periods = generate_pay_periods(start, PayFrequency::BiWeekly, 2, 3).unwrap();
/// let rows = resolve_conflicts(&periods, &HolidaySet::new()).unwrap();
///
/// let ics = to_ical(&rows, Utc::now());
/// assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
/// assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
/// assert!(ics.contains("DTSTART;VALUE=DATE:20240117\r\n"));
/// ```
pub fn to_ical(rows: &[ConflictRow], generated_at: DateTime<Utc>) -> String {
    let stamp = generated_at.format("%Y%m%dT%H%M%SZ").to_string();

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", PRODUCT_ID),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
    ];

    for row in rows {
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!(
            "UID:payroll-{}-{}@{}",
            format_date(row.period_start),
            format_date(row.period_end),
            UID_DOMAIN
        ));
        lines.push(format!("DTSTAMP:{}", stamp));
        lines.push(format!("DTSTART;VALUE=DATE:{}", ical_date(row.payday)));
        // DTEND is exclusive for all-day events.
        let end = row
            .payday
            .checked_add_days(Days::new(1))
            .unwrap_or(row.payday);
        lines.push(format!("DTEND;VALUE=DATE:{}", ical_date(end)));
        lines.push(format!(
            "SUMMARY:{}",
            escape_text(&format!(
                "Payroll: {} – {}",
                format_date(row.period_start),
                format_date(row.period_end)
            ))
        ));
        if !row.note.is_empty() {
            lines.push(format!("DESCRIPTION:{}", escape_text(&row.note)));
        }
        lines.push("TRANSP:TRANSPARENT".to_string());
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());

    let mut out = String::new();
    for line in &lines {
        out.push_str(&fold_line(line));
        out.push_str("\r\n");
    }
    out
}

fn ical_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Folds a content line so no physical line exceeds 75 octets (RFC 5545
/// section 3.1). Continuation lines start with a single space, which counts
/// toward their length. Multibyte characters are never split.
fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut folded = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut used = 0;
    for c in line.chars() {
        if used + c.len_utf8() > MAX_LINE_OCTETS {
            folded.push_str("\r\n ");
            used = 1;
        }
        folded.push(c);
        used += c.len_utf8();
    }
    folded
}

/// Escapes TEXT values per RFC 5545 section 3.3.11.
fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}
