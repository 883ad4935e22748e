//! UTC date handling shared by the JSON and spreadsheet surfaces.
//!
//! Spreadsheet rows carry dates as `%Y-%m-%d %H:%M:%S` (UTC) or bare
//! `%Y-%m-%d`; JSON carries RFC 3339. Both readers accept either form.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{ContentError, ContentResult};

/// Pattern used when writing dates into spreadsheet rows.
pub const ROW_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";

/// Parses a date in any accepted form. Empty input is `Ok(None)`.
pub fn parse_utc(field: &'static str, value: &str) -> ContentResult<Option<DateTime<Utc>>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    parse_any(value)
        .map(Some)
        .ok_or_else(|| ContentError::DateParse {
            field,
            value: value.to_string(),
        })
}

/// Parses a date, treating anything unparseable as absent.
pub fn parse_lenient(value: &str) -> Option<DateTime<Utc>> {
    parse_any(value.trim())
}

fn parse_any(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, ROW_DATE_FORMAT) {
        return Some(dt.and_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(value, DATE_ONLY_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Formats an optional date for a spreadsheet cell; `None` is an empty cell.
pub fn format_row(value: Option<&DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.format(ROW_DATE_FORMAT).to_string())
        .unwrap_or_default()
}
