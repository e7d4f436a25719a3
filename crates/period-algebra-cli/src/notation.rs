//! Parsing of period arguments.

use anyhow::{bail, Context, Result};
use period_algebra::{Boundaries, Period, PeriodOptions};

/// Parse `START/END` (using `options`) or interval notation `[START,END)`.
///
/// In interval notation `[`/`]` include an endpoint and `(`/`)` exclude it,
/// overriding the boundary mode in `options`.
pub fn parse_period(arg: &str, options: &PeriodOptions) -> Result<Period> {
    let arg = arg.trim();

    let (start, end, options) = match split_bracketed(arg) {
        Some((includes_start, inner, includes_end)) => {
            let (start, end) = inner
                .split_once(',')
                .with_context(|| format!("expected a comma between endpoints in '{arg}'"))?;
            let options = PeriodOptions {
                exclude_boundaries: Boundaries::from_includes(includes_start, includes_end),
                ..*options
            };
            (start, end, options)
        }
        None => {
            let Some((start, end)) = arg.split_once('/') else {
                bail!("expected START/END or interval notation like [START,END), got '{arg}'");
            };
            (start, end, *options)
        }
    };

    Period::with_options(start.trim(), end.trim(), &options)
        .with_context(|| format!("invalid period '{arg}'"))
}

fn split_bracketed(arg: &str) -> Option<(bool, &str, bool)> {
    let includes_start = match arg.chars().next()? {
        '[' => true,
        '(' => false,
        _ => return None,
    };
    let includes_end = match arg.chars().last()? {
        ']' => true,
        ')' => false,
        _ => return None,
    };
    let inner = arg.get(1..arg.len().checked_sub(1)?)?;
    Some((includes_start, inner, includes_end))
}
