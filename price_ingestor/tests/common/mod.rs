//! Scripted provider used by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use price_ingestor::models::observation::PricePoint;
use price_ingestor::models::request::PriceRequest;
use price_ingestor::providers::{PriceProvider, ProviderError};

/// Serves a fixed hourly dataset, optionally failing scripted calls first.
///
/// Like the real API, a request's end boundary is inclusive: a point sitting
/// exactly on a chunk boundary is returned by both neighboring chunks. The
/// retriever is expected to deduplicate that overlap.
pub struct MockProvider {
    data: Vec<PricePoint>,
    failures: Mutex<VecDeque<ProviderError>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<PriceRequest>>,
}

impl MockProvider {
    pub fn serving(data: Vec<PricePoint>) -> Self {
        Self {
            data,
            failures: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queues errors to be returned before any successful response.
    pub fn with_failures(mut self, failures: Vec<ProviderError>) -> Self {
        self.failures = Mutex::new(failures.into());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded_requests(&self) -> Vec<PriceRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceProvider for MockProvider {
    async fn fetch_day_ahead(
        &self,
        request: &PriceRequest,
    ) -> Result<Vec<PricePoint>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if let Some(err) = self.failures.lock().unwrap().pop_front() {
            return Err(err);
        }
        Ok(self
            .data
            .iter()
            .filter(|p| p.timestamp >= request.start && p.timestamp <= request.end)
            .cloned()
            .collect())
    }
}

/// `hours` consecutive hourly points from `start`, priced by index.
pub fn hourly_points(start: DateTime<Utc>, hours: usize) -> Vec<PricePoint> {
    (0..hours)
        .map(|h| PricePoint {
            timestamp: start + Duration::hours(h as i64),
            price: h as f64,
        })
        .collect()
}

pub fn api_error(status: reqwest::StatusCode) -> ProviderError {
    use snafu::GenerateImplicitData;
    ProviderError::Api {
        status,
        message: "scripted failure".to_string(),
        backtrace: snafu::Backtrace::generate(),
    }
}
