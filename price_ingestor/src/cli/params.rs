//! Conversion of raw CLI arguments into a validated [`RunConfig`].

use std::time::Duration;

use chrono::Utc;

use super::commands::Cli;
use crate::analysis::AnalysisWindows;
use crate::config::{self, ConfigError, DateRangeSpec, RunConfig};

/// Validates the CLI arguments and resolves them into a run configuration.
///
/// Without `--start-date` or `--years` the run covers the trailing year.
pub fn build_config(cli: &Cli) -> Result<RunConfig, ConfigError> {
    let codes: Vec<String> = cli
        .countries
        .split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    let countries = config::resolve_countries(&codes)?;

    let range = match (cli.start_date, cli.years) {
        (Some(start), _) => DateRangeSpec::Explicit { start, end: cli.end_date },
        (None, Some(years)) => DateRangeSpec::TrailingYears(years),
        (None, None) => DateRangeSpec::TrailingYears(1),
    };
    let (start, end) = range.resolve(Utc::now())?;

    let taxes = config::load_taxes(cli.tax_config.as_deref())?;

    Ok(RunConfig {
        countries,
        start,
        end,
        local_time: cli.local_time,
        combined: cli.combined,
        out_dir: cli.out_dir.clone(),
        chunk_days: cli.chunk_days,
        max_retries: cli.max_retries,
        base_delay: Duration::from_millis(cli.base_delay_ms),
        analyze: cli.analyze,
        taxes,
        windows: AnalysisWindows::default(),
    })
}
