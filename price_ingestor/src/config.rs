//! Run configuration: validated countries, resolved date range, tariffs.
//!
//! Everything here is checked before any network call. A configuration
//! problem aborts the whole run; per-country problems are handled later in
//! the pipeline.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::analysis::AnalysisWindows;
use crate::models::country::{CountryProfile, TaxConfig, TaxTable};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown country code '{code}'; supported: {supported}")]
    UnknownCountry { code: String, supported: String },

    #[error("at least one country code is required")]
    NoCountries,

    #[error("empty date range: start {start} is not before end {end}")]
    EmptyRange { start: NaiveDate, end: NaiveDate },

    #[error("--years must be at least 1")]
    NonPositiveYears,

    #[error("failed to read tax config {path}: {source}")]
    TaxFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse tax config {path}: {source}")]
    TaxFileParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// How the retrieval window was specified on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangeSpec {
    /// Explicit start date, optionally bounded; an open end means "today".
    Explicit {
        start: NaiveDate,
        end: Option<NaiveDate>,
    },
    /// Trailing window of N years (365-day years) ending now.
    TrailingYears(u32),
}

impl DateRangeSpec {
    /// Resolves to a concrete half-open `[start, end)` UTC interval.
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<(DateTime<Utc>, DateTime<Utc>), ConfigError> {
        match *self {
            DateRangeSpec::Explicit { start, end } => {
                let end_date = end.unwrap_or_else(|| now.date_naive());
                if start >= end_date {
                    return Err(ConfigError::EmptyRange { start, end: end_date });
                }
                Ok((
                    start.and_time(chrono::NaiveTime::MIN).and_utc(),
                    end_date.and_time(chrono::NaiveTime::MIN).and_utc(),
                ))
            }
            DateRangeSpec::TrailingYears(years) => {
                if years == 0 {
                    return Err(ConfigError::NonPositiveYears);
                }
                let span = chrono::Duration::days(365 * i64::from(years));
                Ok((now - span, now))
            }
        }
    }
}

/// Immutable, validated configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub countries: Vec<&'static CountryProfile>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub local_time: bool,
    pub combined: bool,
    pub out_dir: PathBuf,
    pub chunk_days: u32,
    pub max_retries: u32,
    pub base_delay: Duration,
    pub analyze: bool,
    pub taxes: TaxTable,
    pub windows: AnalysisWindows,
}

/// Validates country codes against the built-in profile table.
pub fn resolve_countries(codes: &[String]) -> Result<Vec<&'static CountryProfile>, ConfigError> {
    if codes.is_empty() {
        return Err(ConfigError::NoCountries);
    }
    codes
        .iter()
        .map(|code| {
            CountryProfile::lookup(code).ok_or_else(|| ConfigError::UnknownCountry {
                code: code.clone(),
                supported: CountryProfile::supported_codes().join(", "),
            })
        })
        .collect()
}

/// Loads a TOML tax file of the form `[NL] energy_tax = 0.10880 ...`,
/// falling back to the built-in table when no path is given.
pub fn load_taxes(path: Option<&Path>) -> Result<TaxTable, ConfigError> {
    let Some(path) = path else {
        return Ok(TaxTable::builtin());
    };
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::TaxFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let entries: HashMap<String, TaxConfig> =
        toml::from_str(&text).map_err(|source| ConfigError::TaxFileParse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(TaxTable::from_entries(entries))
}
