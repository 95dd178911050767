//! Export of resolved calendar rows.
//!
//! Rows can be written as CSV or a plain-text table, both using the
//! [`ROW_COLUMNS`](crate::models::ROW_COLUMNS) layout, or as an iCalendar file
//! with one all-day event per payday.

mod csv;
mod ical;
mod table;

pub use self::csv::to_csv;
pub use self::ical::{PRODUCT_ID, to_ical};
pub use self::table::to_table;
