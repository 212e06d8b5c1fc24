//! Calendar-date helpers. Deadlines compare at day granularity.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::DecisionError;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d %B %Y"];

/// Parse a deadline or exam date like "2024-12-22".
///
/// RFC 3339 timestamps are accepted too; only their date part is kept.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d);
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Parse the caller-supplied `current_date`. Strict ISO-8601.
pub fn parse_current_date(raw: &str) -> Result<NaiveDate, DecisionError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| DecisionError::InvalidDate(format!("'{raw}': {e}")))
}

/// Today's date as seen in an IANA timezone like "America/Chicago".
pub fn today_in(tz: &str, now: DateTime<Utc>) -> Result<NaiveDate, DecisionError> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| DecisionError::InvalidTimezone(tz.to_string()))?;
    Ok(now.with_timezone(&tz).date_naive())
}

/// Whole days from `today` until `date`. Negative when `date` is past.
pub fn days_between(today: NaiveDate, date: NaiveDate) -> i64 {
    (date - today).num_days()
}
