//! Pacing abstraction for sequential batch operations.
//!
//! Batch loops are paced between items to respect third-party rate
//! limits. The literal sleep of earlier designs is replaced by an
//! injected token-bucket limiter so tests can run without wall-clock
//! delay.

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use std::sync::Arc;
use std::time::Duration;

type DefaultRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Paces sequential work between items.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Wait until the next item may proceed.
    async fn pace(&self);
}

/// Token-bucket pacer backed by the governor crate.
pub struct IntervalPacer {
    limiter: Arc<DefaultRateLimiter>,
}

impl IntervalPacer {
    /// Pacer allowing one item per `interval`.
    ///
    /// Intervals under one millisecond are treated as no pacing.
    pub fn new(interval: Duration) -> Self {
        let quota = Quota::with_period(interval)
            .unwrap_or_else(|| Quota::per_second(nonzero!(1000u32)))
            .allow_burst(nonzero!(1u32));
        Self {
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }
}

impl Default for IntervalPacer {
    /// ~100ms between items, matching the historical batch delay.
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

#[async_trait]
impl Pacer for IntervalPacer {
    async fn pace(&self) {
        self.limiter.until_ready().await;
    }
}

/// Pacer that never waits. For tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPacer;

#[async_trait]
impl Pacer for NoopPacer {
    async fn pace(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn interval_pacer_spaces_items() {
        let pacer = IntervalPacer::new(Duration::from_millis(20));
        let start = Instant::now();
        pacer.pace().await; // first permit is immediate
        pacer.pace().await;
        pacer.pace().await;
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn noop_pacer_is_immediate() {
        let pacer = NoopPacer;
        let start = Instant::now();
        for _ in 0..100 {
            pacer.pace().await;
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
