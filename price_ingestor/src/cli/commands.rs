use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

/// Fetches day-ahead electricity prices, aggregates them into daily
/// metrics, and exports everything as CSV.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Comma-separated country codes (e.g. "NL,DE,BE")
    #[arg(long, default_value = "NL")]
    pub countries: String,

    /// Start date in YYYY-MM-DD format
    #[arg(long, conflicts_with = "years")]
    pub start_date: Option<NaiveDate>,

    /// End date in YYYY-MM-DD format (defaults to today)
    #[arg(long, requires = "start_date")]
    pub end_date: Option<NaiveDate>,

    /// Trailing window in years instead of explicit dates
    #[arg(long)]
    pub years: Option<u32>,

    /// Render timestamps and group days in each country's local timezone
    #[arg(long)]
    pub local_time: bool,

    /// Also write combined multi-country exports
    #[arg(long)]
    pub combined: bool,

    /// Run the price pattern analysis and print the report
    #[arg(long)]
    pub analyze: bool,

    /// Output directory for CSV exports
    #[arg(long, default_value = "price_exports")]
    pub out_dir: PathBuf,

    /// Maximum days per API request chunk
    #[arg(long, default_value = "30")]
    pub chunk_days: u32,

    /// Maximum retries for transient API failures
    #[arg(long, default_value = "3")]
    pub max_retries: u32,

    /// Base delay in milliseconds for exponential retry backoff
    #[arg(long, default_value = "1000")]
    pub base_delay_ms: u64,

    /// API token; falls back to the ENTSOE_API_KEY environment variable
    #[arg(long)]
    pub api_key: Option<String>,

    /// TOML file overriding the built-in tax table
    #[arg(long)]
    pub tax_config: Option<PathBuf>,
}
