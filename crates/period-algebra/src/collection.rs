//! An ordered collection of periods and the set operations over it.
//!
//! A [`PeriodCollection`] keeps its periods in insertion order. It does not
//! sort or deduplicate on its own; [`PeriodCollection::sort`] and
//! [`PeriodCollection::unique`] return new collections when that is wanted.
//! Every combinator folds the pairwise [`Period`] operations and preserves
//! source order in its output.

use std::ops::Index;
use std::slice;

use serde::{Deserialize, Serialize};

use crate::boundaries::Boundaries;
use crate::error::Result;
use crate::granularity::{is_after, is_before};
use crate::period::Period;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodCollection {
    periods: Vec<Period>,
}

impl PeriodCollection {
    pub fn new(periods: Vec<Period>) -> Self {
        Self { periods }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Period> {
        self.periods.iter()
    }

    pub fn as_slice(&self) -> &[Period] {
        &self.periods
    }

    pub fn into_vec(self) -> Vec<Period> {
        self.periods
    }

    /// The period at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&Period> {
        self.periods.get(index)
    }

    /// Write a period into a slot.
    ///
    /// `None`, or an index at or past the end, appends; an index inside the
    /// collection replaces the period there.
    pub fn set(&mut self, index: Option<usize>, period: Period) {
        match index.and_then(|i| self.periods.get_mut(i)) {
            Some(slot) => *slot = period,
            None => self.periods.push(period),
        }
    }

    /// Remove and return the period at `index`, shifting later periods down.
    pub fn unset(&mut self, index: usize) -> Option<Period> {
        (index < self.periods.len()).then(|| self.periods.remove(index))
    }

    pub fn push(&mut self, period: Period) {
        self.periods.push(period);
    }

    /// A new collection with `periods` appended; `self` is left as is.
    pub fn add(&self, periods: &[Period]) -> Self {
        let mut combined = Vec::with_capacity(self.periods.len() + periods.len());
        combined.extend_from_slice(&self.periods);
        combined.extend_from_slice(periods);
        Self::new(combined)
    }

    /// The smallest period enclosing every period, or `None` if empty.
    ///
    /// The start and its exclusivity come from the period with the earliest
    /// included start, the end from the one with the latest included end.
    /// On ties the first such period wins.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::GranularityMismatch`](crate::PeriodError::GranularityMismatch)
    /// if the periods do not all share a granularity.
    pub fn boundaries(&self) -> Result<Option<Period>> {
        let Some(first) = self.periods.first() else {
            return Ok(None);
        };
        let unit = Some(first.granularity());

        let mut earliest = first;
        let mut latest = first;
        for period in &self.periods[1..] {
            first.check_granularity(period)?;
            if is_before(period.included_start(), earliest.included_start(), unit) {
                earliest = period;
            }
            if is_after(period.included_end(), latest.included_end(), unit) {
                latest = period;
            }
        }

        Period::from_parts(
            earliest.start(),
            latest.end(),
            first.granularity(),
            Boundaries::from_includes(earliest.includes_start(), latest.includes_end()),
        )
        .map(Some)
    }

    /// A copy ordered by included start, keeping insertion order on ties.
    ///
    /// Ordering uses the full timestamp rather than the periods' granularity.
    pub fn sort(&self) -> Self {
        let mut periods = self.periods.clone();
        periods.sort_by_key(Period::included_start);
        Self::new(periods)
    }

    /// A copy keeping only the first of each group of [`Period::equals`] periods.
    pub fn unique(&self) -> Result<Self> {
        let mut kept: Vec<Period> = Vec::with_capacity(self.periods.len());
        'periods: for period in &self.periods {
            for seen in &kept {
                if period.equals(seen)? {
                    continue 'periods;
                }
            }
            kept.push(period.clone());
        }
        Ok(Self::new(kept))
    }

    /// The parts of the enclosing period covered by none of the periods.
    ///
    /// # Examples
    ///
    /// ```
    /// use period_algebra::{Boundaries, Period, PeriodCollection};
    ///
    /// let collection = PeriodCollection::new(vec![
    ///     Period::new("2022-01-01", "2022-01-05").unwrap(),
    ///     Period::new("2022-01-10", "2022-01-15").unwrap(),
    /// ]);
    /// let gaps = collection.gaps().unwrap();
    /// assert_eq!(gaps.len(), 1);
    /// assert_eq!(gaps[0].boundaries(), Boundaries::Both);
    /// ```
    pub fn gaps(&self) -> Result<Self> {
        let Some(envelope) = self.boundaries()? else {
            return Ok(Self::empty());
        };
        envelope.subtract_all(&self.periods)
    }

    /// The overlap of `period` with each member that has one, in order.
    pub fn intersect(&self, period: &Period) -> Result<Self> {
        self.periods
            .iter()
            .filter_map(|member| period.overlap(member).transpose())
            .collect()
    }

    /// The points covered by this collection and by every one of `others`.
    ///
    /// Folds left: at each stage every running piece is overlapped with every
    /// member of the next collection. An empty collection anywhere empties the
    /// result.
    pub fn overlap_all(&self, others: &[PeriodCollection]) -> Result<Self> {
        let mut overlap = self.clone();
        for other in others {
            overlap = overlap.overlap(other)?;
        }
        Ok(overlap)
    }

    /// The parts of each member not covered by any period of `other`.
    pub fn subtract(&self, other: &PeriodCollection) -> Result<Self> {
        if other.is_empty() {
            return Ok(self.clone());
        }

        let mut pieces = Vec::new();
        for period in &self.periods {
            pieces.extend(period.subtract_all(&other.periods)?);
        }
        Ok(Self::new(pieces))
    }

    fn overlap(&self, other: &PeriodCollection) -> Result<Self> {
        if other.is_empty() {
            return Ok(Self::empty());
        }

        let mut pieces = Vec::new();
        for period in &self.periods {
            pieces.extend(period.overlap_any(&other.periods)?);
        }
        Ok(Self::new(pieces))
    }
}

impl From<Vec<Period>> for PeriodCollection {
    fn from(periods: Vec<Period>) -> Self {
        Self::new(periods)
    }
}

impl FromIterator<Period> for PeriodCollection {
    fn from_iter<I: IntoIterator<Item = Period>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Extend<Period> for PeriodCollection {
    fn extend<I: IntoIterator<Item = Period>>(&mut self, iter: I) {
        self.periods.extend(iter);
    }
}

impl IntoIterator for PeriodCollection {
    type Item = Period;
    type IntoIter = std::vec::IntoIter<Period>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.into_iter()
    }
}

impl<'a> IntoIterator for &'a PeriodCollection {
    type Item = &'a Period;
    type IntoIter = slice::Iter<'a, Period>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}

impl Index<usize> for PeriodCollection {
    type Output = Period;

    fn index(&self, index: usize) -> &Self::Output {
        &self.periods[index]
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
