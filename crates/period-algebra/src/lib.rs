//! # period-algebra
//!
//! Exact interval algebra over granularity-quantized time ranges.
//!
//! A [`Period`] is a single interval with configurable endpoint exclusion at a
//! fixed [`Granularity`]; a [`PeriodCollection`] is an ordered sequence of
//! periods. Together they provide overlap, subtraction, symmetric difference,
//! gaps, containment and adjacency, computed on the points each period
//! actually covers.
//!
//! ## Modules
//!
//! - [`granularity`] — Granularity-aware date comparison and arithmetic
//! - [`boundaries`] — Endpoint exclusion modes and construction options
//! - [`date`] — Conversion of strings and date values into endpoints
//! - [`period`] — The single-interval type and its pairwise operations
//! - [`collection`] — Ordered period collections and their combinators
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use period_algebra::{Boundaries, Period, PeriodCollection};
//!
//! let busy = PeriodCollection::new(vec![
//!     Period::new("2022-01-01", "2022-01-05").unwrap(),
//!     Period::new("2022-01-10", "2022-01-15").unwrap(),
//! ]);
//!
//! let free = busy.gaps().unwrap();
//! assert_eq!(free.len(), 1);
//! assert_eq!(free[0].to_string(), "(2022-01-05T00:00:00, 2022-01-10T00:00:00)");
//! assert_eq!(free[0].boundaries(), Boundaries::Both);
//! ```

pub mod boundaries;
pub mod collection;
pub mod date;
pub mod error;
pub mod granularity;
pub mod period;

pub use boundaries::{Boundaries, PeriodOptions};
pub use collection::PeriodCollection;
pub use date::{parse_datetime, IntoDateTime};
pub use error::{ErrorKind, PeriodError, Result};
pub use granularity::Granularity;
pub use period::{Period, PeriodIter};
