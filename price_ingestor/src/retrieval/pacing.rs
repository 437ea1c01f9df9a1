//! Request pacing behind a swappable interface.
//!
//! The retriever only knows [`RequestPacer`]; the concrete policy (fixed
//! spacing today, token-bucket or adaptive backoff tomorrow) is chosen at
//! assembly time. One pacer instance is shared by every country pipeline in
//! a run, so the external rate limit is respected in aggregate.

use std::time::Duration;

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;

/// Grants permission to issue one upstream request.
#[async_trait]
pub trait RequestPacer: Send + Sync {
    /// Waits until the next request may be sent.
    async fn acquire(&self);
}

/// Token-bucket pacer: at most one request per configured period.
///
/// The first acquisition on a fresh bucket is immediate, so a retrieval of N
/// chunks incurs exactly N-1 pacing delays.
pub struct GovernorPacer {
    limiter: DefaultDirectRateLimiter,
}

impl GovernorPacer {
    /// One request per `period`. A zero period degenerates to one request
    /// per second, the upstream's documented floor.
    pub fn per_period(period: Duration) -> Self {
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(nonzero!(1u32)))
            .allow_burst(nonzero!(1u32));
        Self { limiter: RateLimiter::direct(quota) }
    }
}

#[async_trait]
impl RequestPacer for GovernorPacer {
    async fn acquire(&self) {
        self.limiter.until_ready().await;
    }
}

/// No-op pacer for tests.
pub struct NoPacing;

#[async_trait]
impl RequestPacer for NoPacing {
    async fn acquire(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn first_acquire_is_immediate() {
        let pacer = GovernorPacer::per_period(Duration::from_secs(60));
        let started = Instant::now();
        pacer.acquire().await;
        assert!(started.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn second_acquire_waits_for_the_period() {
        let pacer = GovernorPacer::per_period(Duration::from_millis(50));
        pacer.acquire().await;
        let started = Instant::now();
        pacer.acquire().await;
        assert!(started.elapsed() >= Duration::from_millis(40));
    }
}
