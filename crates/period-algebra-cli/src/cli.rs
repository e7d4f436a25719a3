use clap::{Parser, Subcommand};
use period_algebra::{Boundaries, Granularity, PeriodOptions};

/// Period arguments are written `START/END`, using `--granularity` and
/// `--exclude`, or in interval notation such as `[2022-01-01,2022-01-10)`,
/// where the brackets decide which endpoints are excluded.
#[derive(Parser, Debug)]
#[command(
    name = "period",
    about = "Interval algebra over time periods: overlaps, subtractions, gaps and iteration",
    version
)]
pub struct Cli {
    /// Unit for comparisons and steps: year, month, day, hour, minute or second
    #[arg(long, short, global = true, default_value = "day")]
    pub granularity: Granularity,

    /// Endpoints excluded from `START/END` periods: none, start, end or both
    #[arg(long, short, global = true, default_value = "none")]
    pub exclude: Boundaries,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn options(&self) -> PeriodOptions {
        PeriodOptions::new(self.granularity, self.exclude)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the bounds, length and point count of a period
    Info {
        period: String,
    },

    /// List every point covered by a period
    Dates {
        period: String,
    },

    /// Intersect a period with every following period
    Overlap {
        period: String,

        #[arg(required = true)]
        others: Vec<String>,
    },

    /// Remove every following period from the first one
    Subtract {
        period: String,

        #[arg(required = true)]
        others: Vec<String>,
    },

    /// The period strictly between two periods
    Gap {
        first: String,
        second: String,
    },

    /// The parts covered by exactly one of two periods
    Diff {
        first: String,
        second: String,
    },

    /// The uncovered stretches between a set of periods
    Gaps {
        #[arg(required = true)]
        periods: Vec<String>,
    },

    /// Whether one period starts where the other ends
    Touches {
        first: String,
        second: String,
    },

    /// The next period of the same length
    Renew {
        period: String,
    },
}
