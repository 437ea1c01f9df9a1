//! Export sinks and the tabular intermediate they consume.
//!
//! Everything upstream works on typed models; the sink boundary flattens
//! those into a [`RecordTable`] so a sink never needs to know which model
//! it is writing.

pub mod csv_sink;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

pub use csv_sink::CsvSink;

use crate::analysis::hourly::HourlyPattern;
use crate::models::daily_metric::DailyMetric;
use crate::models::observation::{PriceSeries, TimeRepresentation};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// Creating the output directory or file failed.
    #[snafu(display("I/O error writing {path}: {source}"))]
    Io {
        path: String,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// Serializing a record into the destination format failed.
    #[snafu(display("failed to encode CSV for {path}: {source}"))]
    Encode {
        path: String,
        source: csv::Error,
        backtrace: Backtrace,
    },
}

/// A flat table ready for serialization: a header row plus string cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RecordTable {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Appends another table's rows. Column sets must match.
    pub fn extend_from(&mut self, other: &RecordTable) {
        debug_assert_eq!(self.columns, other.columns);
        self.rows.extend(other.rows.iter().cloned());
    }
}

#[async_trait]
pub trait TableSink {
    /// What a successful write hands back, e.g. the path of the created file.
    type Output;

    async fn write_table(&self, name: &str, table: &RecordTable) -> Result<Self::Output, SinkError>;
}

/// Flattens daily metrics. The all-in price column only appears when at
/// least one metric carries the value; absent tax data must not surface as
/// a column of zeros.
pub fn metrics_table(metrics: &[DailyMetric]) -> RecordTable {
    let with_all_in = metrics.iter().any(|m| m.all_in_price_kwh.is_some());
    let mut columns = vec![
        "date",
        "country",
        "min_price_mwh",
        "max_price_mwh",
        "weighted_avg_mwh",
        "min_price_kwh",
        "max_price_kwh",
        "weighted_avg_kwh",
    ];
    if with_all_in {
        columns.push("weighted_avg_kwh_all_in_price");
    }
    let mut table = RecordTable::new(&columns);
    for m in metrics {
        let mut row = vec![
            m.date.to_string(),
            m.country.clone(),
            format_price(m.min_price_mwh),
            format_price(m.max_price_mwh),
            format_price(m.weighted_avg_mwh),
            format_price(m.min_price_kwh),
            format_price(m.max_price_kwh),
            format_price(m.weighted_avg_kwh),
        ];
        if with_all_in {
            row.push(m.all_in_price_kwh.map(format_price).unwrap_or_default());
        }
        table.push_row(row);
    }
    table
}

/// Flattens the raw observation series. A `timezone` column is added for
/// local representations so mixed-zone combined exports stay unambiguous.
pub fn raw_table(series: &PriceSeries) -> RecordTable {
    let zone = match series.representation {
        TimeRepresentation::Utc => None,
        TimeRepresentation::Local(tz) => Some(tz),
    };
    let columns: &[&str] = if zone.is_some() {
        &["datetime", "price", "country", "timezone"]
    } else {
        &["datetime", "price", "country"]
    };
    let mut table = RecordTable::new(columns);
    for obs in &series.observations {
        let mut row = vec![
            obs.timestamp.to_rfc3339(),
            format_price(obs.price),
            obs.country.clone(),
        ];
        if let Some(tz) = zone {
            // The IANA zone renders a proper abbreviation (CET/CEST); the
            // fixed offset on the timestamp alone cannot.
            row.push(obs.timestamp.with_timezone(&tz).format("%Z").to_string());
        }
        table.push_row(row);
    }
    table
}

/// Flattens the hour-of-day profile for the analysis artifact.
pub fn hourly_table(country: &str, pattern: &HourlyPattern) -> RecordTable {
    let mut table = RecordTable::new(&[
        "hour", "country", "mean", "median", "std_dev", "min", "max", "count",
    ]);
    for entry in &pattern.by_hour {
        let s = &entry.stats;
        table.push_row(vec![
            entry.hour.to_string(),
            country.to_string(),
            format_price(s.mean),
            format_price(s.median),
            format_price(s.std_dev),
            format_price(s.min),
            format_price(s.max),
            s.count.to_string(),
        ]);
    }
    table
}

fn format_price(value: f64) -> String {
    // Trim float noise without losing the 5-decimal tariff precision.
    let text = format!("{value:.5}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
