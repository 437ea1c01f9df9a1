use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use secrecy::SecretString;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use price_ingestor::cli::{self, Cli};
use price_ingestor::errors::IngestError;
use price_ingestor::pipeline::{self, AppContext};
use price_ingestor::providers::entsoe::EntsoeProvider;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "run aborted");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode, IngestError> {
    let cli = Cli::parse();
    let config = cli::build_config(&cli)?;

    let provider = match &cli.api_key {
        Some(key) => EntsoeProvider::with_token(SecretString::new(key.clone().into()))?,
        None => EntsoeProvider::new()?,
    };
    let ctx = Arc::new(AppContext {
        provider: Arc::new(provider),
        config,
    });

    let report = pipeline::run(ctx).await;

    for artifacts in &report.artifacts {
        if let Some(text) = &artifacts.analysis_report {
            println!("{text}");
        }
    }
    // File paths go to stdout so scripts can pick them up.
    for path in report.files() {
        println!("{}", path.display());
    }
    for country in &report.skipped {
        info!(country = %country, "no data in range, nothing exported");
    }
    for (country, err) in &report.failures {
        error!(country = %country, error = %err, "export failed");
    }

    if report.artifacts.is_empty() && !report.failures.is_empty() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
