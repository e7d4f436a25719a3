//! Conversion of period endpoints into `NaiveDateTime`.
//!
//! Periods accept either an already-built date value or a string. Strings are
//! tried, in order, as:
//!
//! - RFC 3339 (`2022-01-01T10:00:00+02:00`), normalized to UTC
//! - `YYYY-MM-DD`, at midnight
//! - `YYYY-MM-DDTHH:MM[:SS[.fff]]`
//! - `YYYY-MM-DD HH:MM[:SS[.fff]]`

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::{PeriodError, Result};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A value usable as a period endpoint.
pub trait IntoDateTime {
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidDatetime`] if the value cannot be read as a date.
    fn into_datetime(self) -> Result<NaiveDateTime>;
}

impl IntoDateTime for NaiveDateTime {
    fn into_datetime(self) -> Result<NaiveDateTime> {
        Ok(self)
    }
}

impl IntoDateTime for &NaiveDateTime {
    fn into_datetime(self) -> Result<NaiveDateTime> {
        Ok(*self)
    }
}

impl IntoDateTime for NaiveDate {
    fn into_datetime(self) -> Result<NaiveDateTime> {
        Ok(self.and_time(NaiveTime::MIN))
    }
}

impl IntoDateTime for DateTime<Utc> {
    fn into_datetime(self) -> Result<NaiveDateTime> {
        Ok(self.naive_utc())
    }
}

impl IntoDateTime for &str {
    fn into_datetime(self) -> Result<NaiveDateTime> {
        parse_datetime(self)
    }
}

impl IntoDateTime for String {
    fn into_datetime(self) -> Result<NaiveDateTime> {
        parse_datetime(&self)
    }
}

impl IntoDateTime for &String {
    fn into_datetime(self) -> Result<NaiveDateTime> {
        parse_datetime(self)
    }
}

/// Parse a date string in any of the accepted formats.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidDatetime`] if no format matches.
///
/// # Examples
///
/// ```
/// use period_algebra::date::parse_datetime;
///
/// let dt = parse_datetime("2022-01-01").unwrap();
/// assert_eq!(dt.to_string(), "2022-01-01 00:00:00");
///
/// let dt = parse_datetime("2022-01-01T10:00:00+02:00").unwrap();
/// assert_eq!(dt.to_string(), "2022-01-01 08:00:00");
/// ```
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .ok_or_else(|| PeriodError::InvalidDatetime(format!("'{s}'")))
}
