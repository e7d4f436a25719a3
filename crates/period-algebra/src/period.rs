//! A single bounded, granularity-quantized interval of time.
//!
//! A [`Period`] is defined by two raw endpoints, a [`Granularity`] and a
//! [`Boundaries`] mode saying which endpoints are exclusive. From these it
//! derives, once, the *included* bounds: the first and last granularity points
//! actually covered. Every predicate and operation works on the included
//! bounds, so exclusivity never has to be re-checked downstream.
//!
//! Periods are immutable; every operation returns new values.
//!
//! # Operations
//!
//! - [`Period::overlap`], [`Period::overlap_all`], [`Period::overlap_any`]
//! - [`Period::subtract`], [`Period::subtract_all`]
//! - [`Period::gap`], [`Period::diff_symmetric`], [`Period::renew`]
//!
//! Operations between two periods require equal granularities and fail with
//! [`PeriodError::GranularityMismatch`] otherwise.

use std::fmt;
use std::iter::FusedIterator;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::boundaries::{Boundaries, PeriodOptions};
use crate::collection::PeriodCollection;
use crate::date::IntoDateTime;
use crate::error::{PeriodError, Result};
use crate::granularity::{
    add, diff, is_after, is_before, is_same, is_same_or_after, is_same_or_before, sub,
    Granularity,
};

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// An immutable interval between two dates at a fixed granularity.
///
/// `PartialEq` compares the raw fields. Use [`Period::equals`] to ask whether
/// two periods cover the same granularity points.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodRecord", into = "PeriodRecord")]
pub struct Period {
    start: NaiveDateTime,
    end: NaiveDateTime,
    granularity: Granularity,
    includes_start: bool,
    includes_end: bool,
    included_start: NaiveDateTime,
    included_end: NaiveDateTime,
}

// ── Construction ────────────────────────────────────────────────────────────

impl Period {
    /// Create a period at day granularity with both endpoints included.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidDatetime`] if an endpoint cannot be read,
    /// or [`PeriodError::EndBeforeStart`] if `end` precedes `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use period_algebra::Period;
    ///
    /// let period = Period::new("2022-01-01", "2022-01-10").unwrap();
    /// assert_eq!(period.count(), 10);
    /// ```
    pub fn new(start: impl IntoDateTime, end: impl IntoDateTime) -> Result<Self> {
        Self::with_options(start, end, &PeriodOptions::default())
    }

    /// Create a period with an explicit granularity and boundary mode.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidDatetime`] if an endpoint cannot be read,
    /// or [`PeriodError::EndBeforeStart`] if the included end precedes the
    /// included start at the chosen granularity.
    ///
    /// # Examples
    ///
    /// ```
    /// use period_algebra::{Boundaries, Granularity, Period, PeriodOptions};
    ///
    /// let options = PeriodOptions::new(Granularity::Hour, Boundaries::End);
    /// let period = Period::with_options("2022-01-01", "2022-01-02", &options).unwrap();
    /// assert_eq!(period.count(), 24);
    /// ```
    pub fn with_options(
        start: impl IntoDateTime,
        end: impl IntoDateTime,
        options: &PeriodOptions,
    ) -> Result<Self> {
        Self::from_parts(
            start.into_datetime()?,
            end.into_datetime()?,
            options.granularity,
            options.exclude_boundaries,
        )
    }

    /// Create a period from granularity and boundary names, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidGranularity`] or
    /// [`PeriodError::InvalidBoundaries`] for unknown names, plus the errors
    /// of [`Period::with_options`].
    pub fn parse(
        start: impl IntoDateTime,
        end: impl IntoDateTime,
        granularity: &str,
        exclude_boundaries: &str,
    ) -> Result<Self> {
        let options = PeriodOptions::parse(granularity, exclude_boundaries)?;
        Self::with_options(start, end, &options)
    }

    pub(crate) fn from_parts(
        start: NaiveDateTime,
        end: NaiveDateTime,
        granularity: Granularity,
        boundaries: Boundaries,
    ) -> Result<Self> {
        let (includes_start, includes_end) = boundaries.includes();

        let included_start = if includes_start {
            start
        } else {
            add(start, 1, granularity)?
        };
        let included_end = if includes_end {
            end
        } else {
            sub(end, 1, granularity)?
        };

        if is_before(included_end, included_start, Some(granularity)) {
            return Err(PeriodError::EndBeforeStart);
        }

        Ok(Self {
            start,
            end,
            granularity,
            includes_start,
            includes_end,
            included_start,
            included_end,
        })
    }
}

// ── Accessors ───────────────────────────────────────────────────────────────

impl Period {
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn includes_start(&self) -> bool {
        self.includes_start
    }

    pub fn includes_end(&self) -> bool {
        self.includes_end
    }

    /// The first granularity point covered by the period.
    pub fn included_start(&self) -> NaiveDateTime {
        self.included_start
    }

    /// The last granularity point covered by the period.
    pub fn included_end(&self) -> NaiveDateTime {
        self.included_end
    }

    /// The boundary mode this period was built with.
    pub fn boundaries(&self) -> Boundaries {
        Boundaries::from_includes(self.includes_start, self.includes_end)
    }

    pub fn options(&self) -> PeriodOptions {
        PeriodOptions::new(self.granularity, self.boundaries())
    }

    /// Number of granularity steps from the included start to the included end.
    pub fn length(&self) -> i64 {
        diff(self.included_end, self.included_start, self.unit())
    }

    /// Number of granularity points covered, `length() + 1`.
    pub fn count(&self) -> usize {
        let length = self.length();
        debug_assert!(length >= 0, "included end precedes included start in {self}");
        usize::try_from(length).map_or(0, |length| length + 1)
    }

    fn unit(&self) -> Option<Granularity> {
        Some(self.granularity)
    }

    pub(crate) fn check_granularity(&self, other: &Period) -> Result<()> {
        if self.granularity == other.granularity {
            Ok(())
        } else {
            Err(PeriodError::GranularityMismatch)
        }
    }
}

// ── Comparison ──────────────────────────────────────────────────────────────

impl Period {
    /// Whether every point of `other` is also in this period.
    pub fn contains(&self, other: &Period) -> Result<bool> {
        self.check_granularity(other)?;
        Ok(
            is_same_or_before(self.included_start, other.included_start, self.unit())
                && is_same_or_after(self.included_end, other.included_end, self.unit()),
        )
    }

    /// Whether both periods cover exactly the same points.
    pub fn equals(&self, other: &Period) -> Result<bool> {
        self.check_granularity(other)?;
        Ok(is_same(self.included_start, other.included_start, self.unit())
            && is_same(self.included_end, other.included_end, self.unit()))
    }

    /// Whether the periods share at least one point.
    pub fn overlaps_with(&self, other: &Period) -> Result<bool> {
        self.check_granularity(other)?;
        Ok(
            is_same_or_before(self.included_start, other.included_end, self.unit())
                && is_same_or_after(self.included_end, other.included_start, self.unit()),
        )
    }

    /// Whether one period starts on the point where the other ends.
    pub fn touches(&self, other: &Period) -> Result<bool> {
        self.check_granularity(other)?;
        Ok(is_same(self.included_start, other.included_end, self.unit())
            || is_same(self.included_end, other.included_start, self.unit()))
    }

    /// Whether `date` falls within the period.
    pub fn includes(&self, date: NaiveDateTime) -> bool {
        is_same_or_before(self.included_start, date, self.unit())
            && is_same_or_after(self.included_end, date, self.unit())
    }

    pub fn start_equals(&self, date: NaiveDateTime) -> bool {
        is_same(self.included_start, date, self.unit())
    }

    pub fn starts_before(&self, date: NaiveDateTime) -> bool {
        is_before(self.included_start, date, self.unit())
    }

    pub fn starts_before_or_equals(&self, date: NaiveDateTime) -> bool {
        is_same_or_before(self.included_start, date, self.unit())
    }

    pub fn starts_after(&self, date: NaiveDateTime) -> bool {
        is_after(self.included_start, date, self.unit())
    }

    pub fn starts_after_or_equals(&self, date: NaiveDateTime) -> bool {
        is_same_or_after(self.included_start, date, self.unit())
    }

    pub fn end_equals(&self, date: NaiveDateTime) -> bool {
        is_same(self.included_end, date, self.unit())
    }

    pub fn ends_before(&self, date: NaiveDateTime) -> bool {
        is_before(self.included_end, date, self.unit())
    }

    pub fn ends_before_or_equals(&self, date: NaiveDateTime) -> bool {
        is_same_or_before(self.included_end, date, self.unit())
    }

    pub fn ends_after(&self, date: NaiveDateTime) -> bool {
        is_after(self.included_end, date, self.unit())
    }

    pub fn ends_after_or_equals(&self, date: NaiveDateTime) -> bool {
        is_same_or_after(self.included_end, date, self.unit())
    }
}

// ── Operations ──────────────────────────────────────────────────────────────

impl Period {
    /// The intersection of two periods, or `None` if they share no point.
    ///
    /// Each endpoint of the result, and its exclusivity, comes from the period
    /// that contributed it.
    ///
    /// # Examples
    ///
    /// ```
    /// use period_algebra::Period;
    ///
    /// let a = Period::new("2022-01-01", "2022-01-15").unwrap();
    /// let b = Period::new("2022-01-10", "2022-01-20").unwrap();
    /// let overlap = a.overlap(&b).unwrap().unwrap();
    /// assert_eq!(overlap, Period::new("2022-01-10", "2022-01-15").unwrap());
    /// ```
    pub fn overlap(&self, other: &Period) -> Result<Option<Period>> {
        self.check_granularity(other)?;

        let start_owner = if is_after(self.included_start, other.included_start, self.unit()) {
            self
        } else {
            other
        };
        let end_owner = if is_before(self.included_end, other.included_end, self.unit()) {
            self
        } else {
            other
        };

        if is_after(
            start_owner.included_start,
            end_owner.included_end,
            self.unit(),
        ) {
            return Ok(None);
        }

        Period::from_parts(
            start_owner.start,
            end_owner.end,
            self.granularity,
            Boundaries::from_includes(start_owner.includes_start, end_owner.includes_end),
        )
        .map(Some)
    }

    /// The points shared by this period and every one of `others`.
    pub fn overlap_all(&self, others: &[Period]) -> Result<Option<Period>> {
        let mut overlap = self.clone();
        for other in others {
            match overlap.overlap(other)? {
                Some(next) => overlap = next,
                None => return Ok(None),
            }
        }
        Ok(Some(overlap))
    }

    /// The overlap with each of `others` that has one, in order.
    pub fn overlap_any(&self, others: &[Period]) -> Result<PeriodCollection> {
        others
            .iter()
            .filter_map(|other| self.overlap(other).transpose())
            .collect()
    }

    /// The parts of this period not covered by `other`: zero, one or two pieces.
    ///
    /// # Examples
    ///
    /// ```
    /// use period_algebra::{Boundaries, Period};
    ///
    /// let a = Period::new("2022-01-01", "2022-01-15").unwrap();
    /// let b = Period::new("2022-01-10", "2022-01-20").unwrap();
    /// let rest = a.subtract(&b).unwrap();
    /// assert_eq!(rest.len(), 1);
    /// assert_eq!(rest[0].boundaries(), Boundaries::End);
    /// ```
    pub fn subtract(&self, other: &Period) -> Result<PeriodCollection> {
        if !self.overlaps_with(other)? {
            return Ok(PeriodCollection::new(vec![self.clone()]));
        }

        let mut pieces = Vec::with_capacity(2);

        if is_before(self.included_start, other.included_start, self.unit()) {
            pieces.push(Period::from_parts(
                self.start,
                other.start,
                self.granularity,
                Boundaries::from_includes(self.includes_start, !other.includes_start),
            )?);
        }

        if is_after(self.included_end, other.included_end, self.unit()) {
            pieces.push(Period::from_parts(
                other.end,
                self.end,
                self.granularity,
                Boundaries::from_includes(!other.includes_end, self.includes_end),
            )?);
        }

        Ok(PeriodCollection::new(pieces))
    }

    /// The parts of this period not covered by any of `others`.
    ///
    /// Each subtraction is made from the whole period and the results are
    /// intersected, so a piece survives only if it survives every removal.
    pub fn subtract_all(&self, others: &[Period]) -> Result<PeriodCollection> {
        let subtractions = others
            .iter()
            .map(|other| self.subtract(other))
            .collect::<Result<Vec<_>>>()?;

        PeriodCollection::new(vec![self.clone()]).overlap_all(&subtractions)
    }

    /// The period strictly between two periods, or `None` if they overlap,
    /// touch, or leave no granularity point between them.
    ///
    /// An endpoint included by its source period is excluded from the gap and
    /// vice versa, so the gap and both periods never share a point.
    ///
    /// Periods with no granularity point between them, such as day periods
    /// ending on January 10 and starting on January 11, are treated as
    /// touching.
    pub fn gap(&self, other: &Period) -> Result<Option<Period>> {
        if self.overlaps_with(other)? || self.touches(other)? {
            return Ok(None);
        }

        let gap = if is_after(self.included_start, other.included_end, self.unit()) {
            Period::from_parts(
                other.end,
                self.start,
                self.granularity,
                Boundaries::from_includes(!other.includes_end, !self.includes_start),
            )
        } else {
            Period::from_parts(
                self.end,
                other.start,
                self.granularity,
                Boundaries::from_includes(!self.includes_end, !other.includes_start),
            )
        };

        match gap {
            Err(PeriodError::EndBeforeStart) => Ok(None),
            gap => gap.map(Some),
        }
    }

    /// The points in exactly one of the two periods.
    pub fn diff_symmetric(&self, other: &Period) -> Result<PeriodCollection> {
        let pair = PeriodCollection::new(vec![self.clone(), other.clone()]);

        let Some(overlap) = self.overlap(other)? else {
            return Ok(pair);
        };
        let Some(envelope) = pair.boundaries()? else {
            return Ok(pair);
        };

        envelope.subtract(&overlap)
    }

    /// The period of the same length and boundary mode starting where this
    /// one ends.
    pub fn renew(&self) -> Result<Period> {
        let length = diff(self.end, self.start, self.unit());

        Period::from_parts(
            self.end,
            add(self.end, length, self.granularity)?,
            self.granularity,
            self.boundaries(),
        )
    }
}

// ── Iteration ───────────────────────────────────────────────────────────────

impl Period {
    /// Iterate over the covered granularity points, first to last.
    ///
    /// # Examples
    ///
    /// ```
    /// use period_algebra::{Granularity, Period, PeriodOptions};
    ///
    /// let options = PeriodOptions {
    ///     granularity: Granularity::Hour,
    ///     ..Default::default()
    /// };
    /// let period = Period::with_options("2022-01-01", "2022-01-02", &options).unwrap();
    /// assert_eq!(period.iter().count(), 25);
    /// ```
    pub fn iter(&self) -> PeriodIter {
        PeriodIter {
            origin: self.included_start,
            granularity: self.granularity,
            len: self.count(),
            front: 0,
            back: self.count(),
        }
    }

    /// The `index`-th covered point, if the period has that many.
    pub fn date_at(&self, index: usize) -> Option<NaiveDateTime> {
        if index >= self.count() {
            return None;
        }
        step(self.included_start, index, self.granularity)
    }
}

fn step(origin: NaiveDateTime, index: usize, granularity: Granularity) -> Option<NaiveDateTime> {
    let index = i64::try_from(index).ok()?;
    add(origin, index, granularity).ok()
}

/// Iterator over the granularity points of a [`Period`].
///
/// Each item is computed from its index alone, so [`PeriodIter::rewind`]
/// reproduces the sequence exactly.
#[derive(Debug, Clone)]
pub struct PeriodIter {
    origin: NaiveDateTime,
    granularity: Granularity,
    len: usize,
    front: usize,
    back: usize,
}

impl PeriodIter {
    /// Reset the iterator to the first point.
    pub fn rewind(&mut self) {
        self.front = 0;
        self.back = self.len;
    }
}

impl Iterator for PeriodIter {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let index = self.front;
        self.front += 1;
        step(self.origin, index, self.granularity)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back.saturating_sub(self.front);
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for PeriodIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        step(self.origin, self.back, self.granularity)
    }
}

impl ExactSizeIterator for PeriodIter {}

impl FusedIterator for PeriodIter {}

impl<'a> IntoIterator for &'a Period {
    type Item = NaiveDateTime;
    type IntoIter = PeriodIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ── Formatting and serde ────────────────────────────────────────────────────

impl fmt::Display for Period {
    /// Interval notation: `[` and `]` for included endpoints, `(` and `)` for
    /// excluded ones.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}, {}{}",
            if self.includes_start { '[' } else { '(' },
            self.start.format(ISO_FORMAT),
            self.end.format(ISO_FORMAT),
            if self.includes_end { ']' } else { ')' },
        )
    }
}

/// Wire form of a [`Period`]: raw endpoints plus construction options.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PeriodRecord {
    start: String,
    end: String,
    #[serde(default)]
    granularity: Granularity,
    #[serde(default)]
    exclude_boundaries: Boundaries,
}

impl From<Period> for PeriodRecord {
    fn from(period: Period) -> Self {
        Self {
            start: period.start.format(ISO_FORMAT).to_string(),
            end: period.end.format(ISO_FORMAT).to_string(),
            granularity: period.granularity,
            exclude_boundaries: period.boundaries(),
        }
    }
}

impl TryFrom<PeriodRecord> for Period {
    type Error = PeriodError;

    fn try_from(record: PeriodRecord) -> Result<Self> {
        let options = PeriodOptions::new(record.granularity, record.exclude_boundaries);
        Period::with_options(record.start, record.end, &options)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
