//! Ingestion and analysis pipeline for day-ahead electricity prices.
//!
//! The crate retrieves hourly day-ahead wholesale prices for European bidding
//! zones, normalizes them between UTC and each country's civil timezone,
//! derives daily metrics (min/max/average, tax-adjusted consumer price), and
//! computes descriptive statistics used to evaluate battery-storage arbitrage.
//!
//! Data flows strictly forward:
//! retrieval → normalization → aggregation → analysis → export.

pub mod aggregate;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod errors;
pub mod io;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
