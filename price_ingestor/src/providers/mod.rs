//! Provider abstraction for day-ahead price sources.
//!
//! This module defines the [`PriceProvider`] trait, a unified interface for
//! fetching hourly day-ahead price series from any market-data vendor. The
//! trait is async and object-safe (`dyn PriceProvider`) so the retriever and
//! pipeline can be exercised with scripted providers in tests.
//!
//! A provider returns raw UTC-stamped points. An explicit "no data for this
//! range" answer is `Ok(vec![])`, never an error: empty sub-ranges are a
//! legitimate result (market holidays, data not yet published).

pub mod entsoe;

use async_trait::async_trait;
use reqwest::StatusCode;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

use crate::models::{observation::PricePoint, request::PriceRequest};

/// Trait for fetching hourly day-ahead prices from a market data source.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetches the day-ahead price series for `request.domain` over
    /// `[request.start, request.end)`.
    ///
    /// Returns points ordered by timestamp. `Ok(vec![])` means the range has
    /// no published data and must not be treated as a failure.
    async fn fetch_day_ahead(&self, request: &PriceRequest)
    -> Result<Vec<PricePoint>, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// The API token environment variable is not set.
    #[snafu(display("Missing credentials: {source}"))]
    MissingToken {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// Failed to build the HTTP client.
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a [`PriceProvider`] implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// Transport-level failure (connection, timeout, body decode).
    #[snafu(display("API request failed: {source}"))]
    Transport {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The remote API answered with a non-success status.
    #[snafu(display("API error ({status}): {message}"))]
    Api {
        status: StatusCode,
        message: String,
        backtrace: Backtrace,
    },

    /// The response body could not be interpreted as a price series.
    #[snafu(display("Malformed provider response: {message}"))]
    Malformed {
        message: String,
        backtrace: Backtrace,
    },

    /// Provider construction failed.
    #[snafu(display("Provider initialization error: {source}"))]
    Init {
        #[snafu(backtrace)]
        source: ProviderInitError,
    },
}

impl ProviderError {
    /// Whether retrying the same request may succeed.
    ///
    /// Rate-limit (429) and server-side (5xx) answers, timeouts, and connect
    /// failures are transient; everything else fails fast.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Transport { source, .. } => {
                source.is_timeout() || source.is_connect()
            }
            ProviderError::Api { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            ProviderError::Malformed { .. } | ProviderError::Init { .. } => false,
        }
    }
}
