//! Chunked retrieval of day-ahead price series.
//!
//! Long date ranges are split into bounded sub-ranges (default 30 days) so
//! single requests stay within the upstream API's limits. Requests are paced
//! through a shared [`RequestPacer`], transient failures are retried with
//! exponential backoff, and chunk results are concatenated into one ordered
//! series with inclusive boundary overlap deduplicated (first occurrence
//! wins).

pub mod pacing;

pub use pacing::{GovernorPacer, NoPacing, RequestPacer};

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{
    country::CountryProfile,
    observation::{PriceObservation, PricePoint, PriceSeries, TimeRepresentation},
    request::PriceRequest,
};
use crate::providers::{PriceProvider, ProviderError};

/// A per-country retrieval failure, carrying the sub-range that failed.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// A chunk request failed with a non-retryable error.
    #[error("chunk {start}..{end} for {country} failed: {source}")]
    Chunk {
        country: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        source: ProviderError,
    },

    /// A chunk kept failing transiently until the retry budget ran out.
    #[error("retries exhausted for chunk {start}..{end} for {country}: {source}")]
    RetriesExhausted {
        country: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        source: ProviderError,
    },
}

/// Partitions `[start, end)` into consecutive, non-overlapping sub-ranges of
/// at most `max_span`. `start >= end` yields no ranges.
pub fn chunk_ranges(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    max_span: chrono::Duration,
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let mut ranges = Vec::new();
    let mut current = start;
    while current < end {
        let chunk_end = (current + max_span).min(end);
        ranges.push((current, chunk_end));
        current = chunk_end;
    }
    ranges
}

/// Retrieves a full date range for one country by issuing paced chunk
/// requests and assembling the results.
#[derive(Clone)]
pub struct ChunkedRetriever {
    provider: Arc<dyn PriceProvider>,
    pacer: Arc<dyn RequestPacer>,
    max_chunk_span: chrono::Duration,
    max_retries: u32,
    base_delay: Duration,
}

impl ChunkedRetriever {
    /// Default sub-range length.
    pub const DEFAULT_CHUNK_DAYS: i64 = 30;

    pub fn new(provider: Arc<dyn PriceProvider>, pacer: Arc<dyn RequestPacer>) -> Self {
        Self {
            provider,
            pacer,
            max_chunk_span: chrono::Duration::days(Self::DEFAULT_CHUNK_DAYS),
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
        }
    }

    /// Overrides the maximum sub-range length.
    pub fn with_chunk_days(mut self, days: i64) -> Self {
        self.max_chunk_span = chrono::Duration::days(days.max(1));
        self
    }

    /// Overrides the retry budget and backoff base delay.
    pub fn with_retry_policy(mut self, max_retries: u32, base_delay: Duration) -> Self {
        self.max_retries = max_retries.max(1);
        self.base_delay = base_delay;
        self
    }

    /// Retrieves `[start, end)` for `profile`'s market domain as a UTC series.
    ///
    /// An empty range returns an empty series without touching the network.
    /// Chunks that come back empty contribute nothing (market holidays, data
    /// not yet published). The whole retrieval fails fast on the first
    /// non-retryable error, identifying the failing sub-range.
    pub async fn retrieve(
        &self,
        profile: &CountryProfile,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PriceSeries, RetrievalError> {
        let ranges = chunk_ranges(start, end, self.max_chunk_span);
        if ranges.is_empty() {
            return Ok(PriceSeries::empty(profile.code));
        }

        info!(country = profile.code, %start, %end, chunks = ranges.len(),
              "retrieving day-ahead prices");

        let mut observations: Vec<PriceObservation> = Vec::new();
        for (chunk_start, chunk_end) in ranges {
            self.pacer.acquire().await;
            let points = self
                .fetch_chunk_with_retry(profile, chunk_start, chunk_end)
                .await?;
            if points.is_empty() {
                debug!(country = profile.code, %chunk_start, %chunk_end, "empty chunk");
                continue;
            }
            append_points(&mut observations, points, profile.code);
        }

        Ok(PriceSeries {
            country: profile.code.to_string(),
            representation: TimeRepresentation::Utc,
            observations,
        })
    }

    async fn fetch_chunk_with_retry(
        &self,
        profile: &CountryProfile,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PricePoint>, RetrievalError> {
        let request = PriceRequest {
            domain: profile.domain.to_string(),
            start,
            end,
        };

        let mut attempt = 0u32;
        loop {
            match self.provider.fetch_day_ahead(&request).await {
                Ok(points) => return Ok(points),
                Err(source) if source.is_transient() && attempt + 1 < self.max_retries => {
                    let delay = self.base_delay * 2u32.saturating_pow(attempt);
                    warn!(country = profile.code, %start, %end, attempt,
                          error = %source, ?delay, "transient error, backing off");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(source) if source.is_transient() => {
                    return Err(RetrievalError::RetriesExhausted {
                        country: profile.code.to_string(),
                        start,
                        end,
                        source,
                    });
                }
                Err(source) => {
                    return Err(RetrievalError::Chunk {
                        country: profile.code.to_string(),
                        start,
                        end,
                        source,
                    });
                }
            }
        }
    }
}

/// Appends a chunk's points, keeping timestamps strictly increasing.
///
/// Points are sorted per chunk, then any point not strictly after the last
/// kept observation is dropped: the keep-first dedup for inclusive
/// chunk-boundary overlap.
fn append_points(observations: &mut Vec<PriceObservation>, mut points: Vec<PricePoint>, country: &str) {
    points.sort_by_key(|p| p.timestamp);
    for point in points {
        if let Some(last) = observations.last()
            && point.timestamp.fixed_offset() <= last.timestamp
        {
            continue;
        }
        observations.push(PriceObservation {
            timestamp: point.timestamp.fixed_offset(),
            price: point.price,
            country: country.to_string(),
        });
    }
}
