//! Per-country orchestration: retrieve, normalize, aggregate, export.
//!
//! Countries run concurrently but share one request pacer, so the total
//! request rate against the API stays bounded no matter how many countries
//! a run covers. One country failing never aborts the others.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::aggregate;
use crate::analysis::{self, report};
use crate::config::RunConfig;
use crate::errors::IngestError;
use crate::io::{self, CsvSink, RecordTable, TableSink};
use crate::models::country::CountryProfile;
use crate::models::daily_metric::DailyMetric;
use crate::models::observation::{PriceSeries, TimeRepresentation};
use crate::normalize;
use crate::providers::PriceProvider;
use crate::retrieval::{ChunkedRetriever, GovernorPacer};

/// Everything a run needs, assembled once in `main` and shared read-only.
pub struct AppContext {
    pub provider: Arc<dyn PriceProvider>,
    pub config: RunConfig,
}

/// What one successful country produced.
#[derive(Debug)]
pub struct CountryArtifacts {
    pub country: String,
    pub series: PriceSeries,
    pub metrics: Vec<DailyMetric>,
    pub files: Vec<PathBuf>,
    pub analysis_report: Option<String>,
}

/// Outcome of a whole run; per-country failures are collected, not raised.
#[derive(Debug, Default)]
pub struct RunReport {
    pub artifacts: Vec<CountryArtifacts>,
    /// Countries that retrieved zero observations over the whole range.
    pub skipped: Vec<String>,
    pub failures: Vec<(String, IngestError)>,
    pub combined_files: Vec<PathBuf>,
}

impl RunReport {
    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.artifacts
            .iter()
            .flat_map(|a| a.files.iter())
            .chain(self.combined_files.iter())
    }
}

/// Runs the full pipeline for every configured country.
pub async fn run(ctx: Arc<AppContext>) -> RunReport {
    let pacer = Arc::new(GovernorPacer::per_period(std::time::Duration::from_millis(500)));
    let retriever = ChunkedRetriever::new(Arc::clone(&ctx.provider), pacer)
        .with_chunk_days(i64::from(ctx.config.chunk_days))
        .with_retry_policy(ctx.config.max_retries, ctx.config.base_delay);
    let sink = CsvSink::new(&ctx.config.out_dir);

    let mut tasks = JoinSet::new();
    for profile in &ctx.config.countries {
        let ctx = Arc::clone(&ctx);
        let retriever = retriever.clone();
        let sink = sink.clone();
        let profile: &'static CountryProfile = *profile;
        tasks.spawn(async move { process_country(&ctx, profile, &retriever, &sink).await });
    }

    let mut report = RunReport::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(Some(artifacts)))) => report.artifacts.push(artifacts),
            Ok((country, Ok(None))) => report.skipped.push(country),
            Ok((country, Err(err))) => {
                warn!(country = %country, error = %err, "country failed");
                report.failures.push((country, err));
            }
            Err(join_err) => {
                warn!(error = %join_err, "country task panicked");
            }
        }
    }
    // Deterministic output order regardless of task completion order.
    report.artifacts.sort_by(|a, b| a.country.cmp(&b.country));
    report.skipped.sort();
    report.failures.sort_by(|a, b| a.0.cmp(&b.0));

    if ctx.config.combined && report.artifacts.len() > 1 {
        if let Err(err) = write_combined(&ctx, &sink, &mut report).await {
            warn!(error = %err, "combined export failed");
            report.failures.push(("combined".to_string(), err));
        }
    }
    report
}

/// One country, end to end. `Ok(None)` means the range held no data.
async fn process_country(
    ctx: &AppContext,
    profile: &'static CountryProfile,
    retriever: &ChunkedRetriever,
    sink: &CsvSink,
) -> (String, Result<Option<CountryArtifacts>, IngestError>) {
    let country = profile.code.to_string();
    let result = process_country_inner(ctx, profile, retriever, sink).await;
    (country, result)
}

async fn process_country_inner(
    ctx: &AppContext,
    profile: &'static CountryProfile,
    retriever: &ChunkedRetriever,
    sink: &CsvSink,
) -> Result<Option<CountryArtifacts>, IngestError> {
    let config = &ctx.config;
    let utc_series = retriever.retrieve(profile, config.start, config.end).await?;
    if utc_series.is_empty() {
        warn!(country = profile.code, "no observations in range, skipping");
        return Ok(None);
    }
    info!(
        country = profile.code,
        observations = utc_series.len(),
        "retrieved series"
    );

    let representation = if config.local_time {
        TimeRepresentation::Local(profile.timezone)
    } else {
        TimeRepresentation::Utc
    };
    let series = normalize::to_representation(&utc_series, representation);
    let suffix = series.representation.file_suffix();

    let metrics = aggregate::daily_metrics(&series, &config.taxes);
    // Artifact names carry the lowercase country code.
    let stem = profile.code.to_lowercase();
    let mut files = Vec::new();
    files.push(
        sink.write_table(
            &format!("{stem}_price_metrics_{suffix}.csv"),
            &io::metrics_table(&metrics),
        )
        .await?,
    );
    files.push(
        sink.write_table(
            &format!("{stem}_raw_prices_{suffix}.csv"),
            &io::raw_table(&series),
        )
        .await?,
    );

    let analysis_report = if config.analyze {
        let analysis = analysis::analyze(&series, &config.windows)?;
        files.push(
            sink.write_table(
                &format!("{stem}_hourly_pattern_{suffix}.csv"),
                &io::hourly_table(profile.code, &analysis.hourly),
            )
            .await?,
        );
        Some(report::render(profile.code, &analysis))
    } else {
        None
    };

    Ok(Some(CountryArtifacts {
        country: profile.code.to_string(),
        series,
        metrics,
        files,
        analysis_report,
    }))
}

/// Concatenated metrics and raw exports across all successful countries.
async fn write_combined(
    ctx: &AppContext,
    sink: &CsvSink,
    report: &mut RunReport,
) -> Result<(), IngestError> {
    let suffix = if ctx.config.local_time { "local_mixed" } else { "utc" };

    let all_metrics: Vec<DailyMetric> = report
        .artifacts
        .iter()
        .flat_map(|a| a.metrics.iter().cloned())
        .collect();
    let metrics_path = sink
        .write_table(
            &format!("combined_price_metrics_{suffix}.csv"),
            &io::metrics_table(&all_metrics),
        )
        .await?;

    let mut raw: Option<RecordTable> = None;
    for artifacts in &report.artifacts {
        let table = io::raw_table(&artifacts.series);
        match &mut raw {
            None => raw = Some(table),
            Some(existing) => existing.extend_from(&table),
        }
    }
    report.combined_files.push(metrics_path);
    if let Some(table) = raw {
        report.combined_files.push(
            sink.write_table(&format!("combined_raw_prices_{suffix}.csv"), &table)
                .await?,
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_report_lists_files_across_countries() {
        let report = RunReport {
            artifacts: vec![
                CountryArtifacts {
                    country: "DE".into(),
                    series: PriceSeries::empty("DE"),
                    metrics: Vec::new(),
                    files: vec![PathBuf::from("a.csv")],
                    analysis_report: None,
                },
                CountryArtifacts {
                    country: "NL".into(),
                    series: PriceSeries::empty("NL"),
                    metrics: Vec::new(),
                    files: vec![PathBuf::from("b.csv"), PathBuf::from("c.csv")],
                    analysis_report: None,
                },
            ],
            skipped: Vec::new(),
            failures: Vec::new(),
            combined_files: vec![PathBuf::from("combined.csv")],
        };
        assert_eq!(report.files().count(), 4);
    }
}
