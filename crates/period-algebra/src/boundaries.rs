//! Boundary exclusion modes and period construction options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PeriodError, Result};
use crate::granularity::Granularity;

/// Which raw endpoints of a period are *excluded* from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundaries {
    /// Both endpoints are included: `[start, end]`.
    #[default]
    None,
    /// `(start, end]`
    Start,
    /// `[start, end)`
    End,
    /// `(start, end)`
    Both,
}

impl Boundaries {
    pub const ALL: [Boundaries; 4] = [
        Boundaries::None,
        Boundaries::Start,
        Boundaries::End,
        Boundaries::Both,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Boundaries::None => "none",
            Boundaries::Start => "start",
            Boundaries::End => "end",
            Boundaries::Both => "both",
        }
    }

    /// `(includes_start, includes_end)` for this mode.
    pub fn includes(self) -> (bool, bool) {
        match self {
            Boundaries::None => (true, true),
            Boundaries::Start => (false, true),
            Boundaries::End => (true, false),
            Boundaries::Both => (false, false),
        }
    }

    /// Inverse of [`Boundaries::includes`].
    pub fn from_includes(includes_start: bool, includes_end: bool) -> Self {
        match (includes_start, includes_end) {
            (false, false) => Boundaries::Both,
            (false, true) => Boundaries::Start,
            (true, false) => Boundaries::End,
            (true, true) => Boundaries::None,
        }
    }
}

impl fmt::Display for Boundaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Boundaries {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        Boundaries::ALL
            .into_iter()
            .find(|b| b.as_str() == normalized)
            .ok_or_else(|| PeriodError::InvalidBoundaries(s.to_string()))
    }
}

/// Options for [`Period::with_options`](crate::Period::with_options).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PeriodOptions {
    /// The unit every comparison and step is made at.
    pub granularity: Granularity,
    /// Which endpoints are exclusive.
    pub exclude_boundaries: Boundaries,
}

impl PeriodOptions {
    pub fn new(granularity: Granularity, exclude_boundaries: Boundaries) -> Self {
        Self {
            granularity,
            exclude_boundaries,
        }
    }

    /// Build options from their string names, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidGranularity`] or
    /// [`PeriodError::InvalidBoundaries`] for unknown names.
    pub fn parse(granularity: &str, exclude_boundaries: &str) -> Result<Self> {
        Ok(Self {
            granularity: granularity.parse()?,
            exclude_boundaries: exclude_boundaries.parse()?,
        })
    }
}
