//! Calendar dates as they travel through forms and the wire.
//!
//! Date inputs yield `YYYY-MM-DD`; the server returns ISO timestamps such as
//! `1970-01-01T00:00:00`. Both are accepted, only the date part is kept.

use chrono::{Local, NaiveDate};

use crate::error::DomainError;

const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a form or wire date, ignoring any time component.
///
/// A time component must be introduced by `T` or a space.
pub fn parse_date(raw: &str) -> Result<NaiveDate, DomainError> {
    let raw = raw.trim();
    let date_part = match raw.split_at_checked(10) {
        Some((date, rest)) if rest.is_empty() || rest.starts_with(['T', ' ']) => date,
        Some(_) => return Err(DomainError::invalid_date(format!("{raw}: trailing input"))),
        None => raw,
    };
    NaiveDate::parse_from_str(date_part, FORM_DATE_FORMAT)
        .map_err(|e| DomainError::invalid_date(format!("{raw}: {e}")))
}

/// The `YYYY-MM-DD` prefix of a wire date, suitable for a date input.
pub fn form_value(raw: &str) -> String {
    match parse_date(raw) {
        Ok(date) => date.format(FORM_DATE_FORMAT).to_string(),
        Err(_) => String::new(),
    }
}

/// Today's date in the user's local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
