//! Subcommand execution. Every command renders its result to a string so the
//! caller decides where it goes.

use anyhow::{Context, Result};
use period_algebra::{Period, PeriodCollection, PeriodOptions};
use serde::Serialize;
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::notation::parse_period;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Info<'a> {
    period: &'a Period,
    included_start: String,
    included_end: String,
    length: i64,
    count: usize,
}

pub fn run(cli: &Cli) -> Result<String> {
    let options = cli.options();
    debug!(
        granularity = %options.granularity,
        exclude = %options.exclude_boundaries,
        "running command"
    );

    match &cli.command {
        Commands::Info { period } => info(&parse_period(period, &options)?, cli.json),
        Commands::Dates { period } => dates(&parse_period(period, &options)?, cli.json),
        Commands::Overlap { period, others } => {
            let period = parse_period(period, &options)?;
            let others = parse_all(others, &options)?;
            let overlap = period.overlap_all(&others)?;
            render_option(overlap.as_ref(), cli.json)
        }
        Commands::Subtract { period, others } => {
            let period = parse_period(period, &options)?;
            let others = parse_all(others, &options)?;
            render_collection(&period.subtract_all(&others)?, cli.json)
        }
        Commands::Gap { first, second } => {
            let (first, second) = parse_pair(first, second, &options)?;
            render_option(first.gap(&second)?.as_ref(), cli.json)
        }
        Commands::Diff { first, second } => {
            let (first, second) = parse_pair(first, second, &options)?;
            render_collection(&first.diff_symmetric(&second)?, cli.json)
        }
        Commands::Gaps { periods } => {
            let collection = PeriodCollection::new(parse_all(periods, &options)?);
            render_collection(&collection.gaps()?, cli.json)
        }
        Commands::Touches { first, second } => {
            let (first, second) = parse_pair(first, second, &options)?;
            let touches = first.touches(&second)?;
            if cli.json {
                Ok(serde_json::to_string(&touches)?)
            } else {
                Ok(touches.to_string())
            }
        }
        Commands::Renew { period } => {
            let renewed = parse_period(period, &options)?.renew()?;
            render_option(Some(&renewed), cli.json)
        }
    }
}

fn parse_all(args: &[String], options: &PeriodOptions) -> Result<Vec<Period>> {
    args.iter()
        .enumerate()
        .map(|(i, arg)| {
            parse_period(arg, options).with_context(|| format!("period argument {}", i + 1))
        })
        .collect()
}

fn parse_pair(first: &str, second: &str, options: &PeriodOptions) -> Result<(Period, Period)> {
    Ok((parse_period(first, options)?, parse_period(second, options)?))
}

fn info(period: &Period, json: bool) -> Result<String> {
    let info = Info {
        period,
        included_start: period.included_start().format(DATE_FORMAT).to_string(),
        included_end: period.included_end().format(DATE_FORMAT).to_string(),
        length: period.length(),
        count: period.count(),
    };
    if json {
        return Ok(serde_json::to_string_pretty(&info)?);
    }
    Ok(format!(
        "period:         {}\ngranularity:    {}\nincluded start: {}\nincluded end:   {}\nlength:         {}\ncount:          {}",
        period,
        period.granularity(),
        info.included_start,
        info.included_end,
        info.length,
        info.count,
    ))
}

fn dates(period: &Period, json: bool) -> Result<String> {
    debug!(count = period.count(), "iterating period");
    let dates: Vec<String> = period
        .iter()
        .map(|date| date.format(DATE_FORMAT).to_string())
        .collect();
    if json {
        Ok(serde_json::to_string_pretty(&dates)?)
    } else {
        Ok(dates.join("\n"))
    }
}

fn render_option(period: Option<&Period>, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(&period)?);
    }
    Ok(period.map_or_else(|| "none".to_string(), Period::to_string))
}

fn render_collection(collection: &PeriodCollection, json: bool) -> Result<String> {
    debug!(len = collection.len(), "rendering collection");
    if json {
        return Ok(serde_json::to_string_pretty(collection)?);
    }
    if collection.is_empty() {
        return Ok("none".to_string());
    }
    Ok(collection
        .iter()
        .map(Period::to_string)
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("period").chain(args.iter().copied()))
            .unwrap();
        run(&cli)
    }

    #[test]
    fn test_overlap_text() {
        let out = run_args(&["overlap", "2022-01-01/2022-01-15", "2022-01-10/2022-01-20"]).unwrap();
        assert_eq!(out, "[2022-01-10T00:00:00, 2022-01-15T00:00:00]");
    }

    #[test]
    fn test_overlap_disjoint_is_none() {
        let out = run_args(&["overlap", "2022-01-01/2022-01-05", "2022-01-10/2022-01-20"]).unwrap();
        assert_eq!(out, "none");
    }

    #[test]
    fn test_subtract_pieces() {
        let out = run_args(&["subtract", "2022-01-01/2022-01-15", "2022-01-10/2022-01-20"]).unwrap();
        assert_eq!(out, "[2022-01-01T00:00:00, 2022-01-10T00:00:00)");
    }

    #[test]
    fn test_gap_inverts_exclusivity() {
        let out = run_args(&["gap", "2022-01-01/2022-01-10", "2022-01-15/2022-01-20"]).unwrap();
        assert_eq!(out, "(2022-01-10T00:00:00, 2022-01-15T00:00:00)");
    }

    #[test]
    fn test_gaps_of_collection() {
        let out = run_args(&[
            "gaps",
            "2022-01-01/2022-01-05",
            "2022-01-10/2022-01-15",
            "2022-01-20/2022-01-25",
        ])
        .unwrap();
        assert_eq!(
            out,
            "(2022-01-05T00:00:00, 2022-01-10T00:00:00)\n(2022-01-15T00:00:00, 2022-01-20T00:00:00)"
        );
    }

    #[test]
    fn test_touches() {
        let out = run_args(&["touches", "2022-01-01/2022-01-10", "2022-01-10/2022-01-20"]).unwrap();
        assert_eq!(out, "true");
        let out = run_args(&["touches", "2022-01-01/2022-01-09", "2022-01-10/2022-01-20"]).unwrap();
        assert_eq!(out, "false");
    }

    #[test]
    fn test_dates_hourly() {
        let out = run_args(&["--granularity", "hour", "dates", "2022-01-01/2022-01-02"]).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 25);
        assert_eq!(lines[0], "2022-01-01T00:00:00");
        assert_eq!(lines[24], "2022-01-02T00:00:00");
    }

    #[test]
    fn test_info_json() {
        let out = run_args(&["info", "--json", "[2022-01-01,2022-01-10)"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["count"], 9);
        assert_eq!(value["includedEnd"], "2022-01-09T00:00:00");
        assert_eq!(value["period"]["excludeBoundaries"], "end");
    }

    #[test]
    fn test_invalid_argument_has_context() {
        let err = run_args(&["gaps", "2022-01-01/2022-01-05", "2022-01-10/nope"]).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("period argument 2"), "got: {message}");
        assert!(message.contains("Invalid datetime"), "got: {message}");
    }

    #[test]
    fn test_renew_json() {
        let out = run_args(&["renew", "--json", "2022-01-01/2022-01-10"]).unwrap();
        let renewed: Period = serde_json::from_str(&out).unwrap();
        assert_eq!(renewed, Period::new("2022-01-10", "2022-01-19").unwrap());
    }
}
