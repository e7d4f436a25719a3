//! Error types for period-algebra operations.

use thiserror::Error;

/// Broad classification of a [`PeriodError`].
///
/// `InvalidArgument` means an input could not be understood at all;
/// `RuntimeConflict` means the inputs were understood but cannot be combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    RuntimeConflict,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Invalid granularity: {0}")]
    InvalidGranularity(String),

    #[error("Invalid boundaries: {0}")]
    InvalidBoundaries(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("The end date must be after the start date")]
    EndBeforeStart,

    #[error("Period granularities do not match")]
    GranularityMismatch,

    #[error("Date out of range: {0}")]
    OutOfRange(String),
}

impl PeriodError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PeriodError::InvalidGranularity(_)
            | PeriodError::InvalidBoundaries(_)
            | PeriodError::InvalidDatetime(_) => ErrorKind::InvalidArgument,
            PeriodError::EndBeforeStart
            | PeriodError::GranularityMismatch
            | PeriodError::OutOfRange(_) => ErrorKind::RuntimeConflict,
        }
    }
}

pub type Result<T> = std::result::Result<T, PeriodError>;
