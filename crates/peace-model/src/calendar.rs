//! Simulated calendar helpers.
//!
//! Budgets are keyed by year strings ("2024") derived from the simulated
//! date, never the wall clock.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use peace_model::{format_money, year_key};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
//! assert_eq!(year_key(date), "2024");
//! assert_eq!(format_money(3_500_000_000.0), "3,500,000,000");
//! ```

use chrono::{NaiveDate, NaiveDateTime};

/// Days simulated per round (one quarter).
pub const DEFAULT_ROUND_STEP_DAYS: i64 = 91;

/// Budget key for the year containing `date`.
pub fn year_key(date: NaiveDate) -> String {
    date.format("%Y").to_string()
}

/// Parses an ISO-8601 date, also accepting a full datetime and keeping only
/// its date part.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// Formats a currency amount rounded to whole units with thousands
/// separators, e.g. `1234567.6` becomes `"1,234,568"`.
pub fn format_money(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 && grouped.chars().any(|c| c != '0' && c != ',') {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
