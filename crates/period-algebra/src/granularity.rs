//! Granularity-aware date comparison and arithmetic.
//!
//! Every comparison a [`Period`](crate::Period) makes goes through this module,
//! so the meaning of "same", "before" and "after" at a given unit lives in one
//! place. Two instants are compared at a granularity by truncating both to that
//! unit first: January 5 00:00 and January 5 14:00 are the same *day* but not
//! the same *hour*.
//!
//! Functions taking `Option<Granularity>` fall back to the raw
//! `NaiveDateTime` ordering when no granularity is given.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{PeriodError, Result};

/// The unit at which two instants are considered distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Year,
    Month,
    #[default]
    Day,
    Hour,
    Minute,
    Second,
}

impl Granularity {
    /// All granularities, coarsest first.
    pub const ALL: [Granularity; 6] = [
        Granularity::Year,
        Granularity::Month,
        Granularity::Day,
        Granularity::Hour,
        Granularity::Minute,
        Granularity::Second,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Year => "year",
            Granularity::Month => "month",
            Granularity::Day => "day",
            Granularity::Hour => "hour",
            Granularity::Minute => "minute",
            Granularity::Second => "second",
        }
    }

    /// Truncate `date` to the start of its enclosing unit.
    pub fn truncate(self, date: NaiveDateTime) -> NaiveDateTime {
        let day = date.date();
        match self {
            Granularity::Year => NaiveDate::from_yo_opt(day.year(), 1)
                .unwrap_or(day)
                .and_time(NaiveTime::MIN),
            Granularity::Month => day.with_day(1).unwrap_or(day).and_time(NaiveTime::MIN),
            Granularity::Day => day.and_time(NaiveTime::MIN),
            Granularity::Hour => day.and_hms_opt(date.hour(), 0, 0).unwrap_or(date),
            Granularity::Minute => day
                .and_hms_opt(date.hour(), date.minute(), 0)
                .unwrap_or(date),
            Granularity::Second => date.with_nanosecond(0).unwrap_or(date),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = PeriodError;

    /// Parse a granularity name, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        Granularity::ALL
            .into_iter()
            .find(|g| g.as_str() == normalized)
            .ok_or_else(|| PeriodError::InvalidGranularity(s.to_string()))
    }
}

// ── Comparison ──────────────────────────────────────────────────────────────

/// Order `a` relative to `b`, at `granularity` if one is given.
pub fn compare(a: NaiveDateTime, b: NaiveDateTime, granularity: Option<Granularity>) -> Ordering {
    match granularity {
        Some(g) => g.truncate(a).cmp(&g.truncate(b)),
        None => a.cmp(&b),
    }
}

pub fn is_before(a: NaiveDateTime, b: NaiveDateTime, granularity: Option<Granularity>) -> bool {
    compare(a, b, granularity).is_lt()
}

pub fn is_after(a: NaiveDateTime, b: NaiveDateTime, granularity: Option<Granularity>) -> bool {
    compare(a, b, granularity).is_gt()
}

pub fn is_same(a: NaiveDateTime, b: NaiveDateTime, granularity: Option<Granularity>) -> bool {
    compare(a, b, granularity).is_eq()
}

pub fn is_same_or_before(
    a: NaiveDateTime,
    b: NaiveDateTime,
    granularity: Option<Granularity>,
) -> bool {
    compare(a, b, granularity).is_le()
}

pub fn is_same_or_after(
    a: NaiveDateTime,
    b: NaiveDateTime,
    granularity: Option<Granularity>,
) -> bool {
    compare(a, b, granularity).is_ge()
}

// ── Arithmetic ──────────────────────────────────────────────────────────────

/// Shift `date` forward by `amount` units of `granularity`.
///
/// Month and year steps keep the day of month where possible and clamp to the
/// last day otherwise (January 31 + 1 month = February 28).
///
/// # Errors
///
/// Returns [`PeriodError::OutOfRange`] if the result is not representable.
pub fn add(date: NaiveDateTime, amount: i64, granularity: Granularity) -> Result<NaiveDateTime> {
    shift(date, amount, granularity).ok_or_else(|| {
        PeriodError::OutOfRange(format!("{date} {amount:+} {granularity}(s)"))
    })
}

/// Shift `date` backward by `amount` units of `granularity`.
///
/// # Errors
///
/// Returns [`PeriodError::OutOfRange`] if the result is not representable.
pub fn sub(date: NaiveDateTime, amount: i64, granularity: Granularity) -> Result<NaiveDateTime> {
    let negated = amount.checked_neg().ok_or_else(|| {
        PeriodError::OutOfRange(format!("cannot negate {amount} {granularity}(s)"))
    })?;
    add(date, negated, granularity)
}

/// Number of whole units from `b` to `a` (negative when `a` is earlier).
///
/// With a granularity, both dates are truncated first, so the difference
/// between 23:59 on January 1 and 00:01 on January 2 is one day. Without one,
/// the difference is counted in whole seconds.
pub fn diff(a: NaiveDateTime, b: NaiveDateTime, granularity: Option<Granularity>) -> i64 {
    let Some(g) = granularity else {
        return a.signed_duration_since(b).num_seconds();
    };

    let (a, b) = (g.truncate(a), g.truncate(b));
    match g {
        Granularity::Year => i64::from(a.year() - b.year()),
        Granularity::Month => month_index(a) - month_index(b),
        Granularity::Day => a.signed_duration_since(b).num_days(),
        Granularity::Hour => a.signed_duration_since(b).num_hours(),
        Granularity::Minute => a.signed_duration_since(b).num_minutes(),
        Granularity::Second => a.signed_duration_since(b).num_seconds(),
    }
}

fn month_index(date: NaiveDateTime) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn shift(date: NaiveDateTime, amount: i64, granularity: Granularity) -> Option<NaiveDateTime> {
    match granularity {
        Granularity::Year => shift_months(date, amount.checked_mul(12)?),
        Granularity::Month => shift_months(date, amount),
        Granularity::Day => date.checked_add_signed(chrono::Duration::try_days(amount)?),
        Granularity::Hour => date.checked_add_signed(chrono::Duration::try_hours(amount)?),
        Granularity::Minute => date.checked_add_signed(chrono::Duration::try_minutes(amount)?),
        Granularity::Second => date.checked_add_signed(chrono::Duration::try_seconds(amount)?),
    }
}

fn shift_months(date: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
