//! Sliding Window Rate Limiter
//!
//! Admits at most `max_requests` outbound requests in any trailing `window`.
//! The timestamp record is shared by every caller of one client.

use crate::config::RateLimitConfig;
use crate::error::Result;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Tracks recent request timestamps and delays callers over the limit
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,

    /// Admission times, oldest first; never longer than `max_requests`
    timestamps: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Create a limiter, rejecting limits that could never admit a request
    pub fn new(config: RateLimitConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            timestamps: Mutex::new(VecDeque::new()),
            config,
        })
    }

    /// Get the active limits
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Wait until a request may be sent, then record it
    ///
    /// Eviction, the capacity check and the append happen under one lock, so
    /// concurrent callers cannot jointly overshoot the limit. A caller that
    /// had to sleep checks again on waking.
    pub async fn throttle(&self) {
        loop {
            let wait = {
                let mut timestamps = self.timestamps.lock();
                let now = Instant::now();
                self.evict(&mut timestamps, now);

                if timestamps.len() < self.config.max_requests {
                    timestamps.push_back(now);
                    return;
                }

                self.wait_time(&timestamps, now)
            };

            debug!(
                wait_ms = wait.as_millis() as u64,
                max_requests = self.config.max_requests,
                "rate limit window full, delaying request"
            );
            tokio::time::sleep(wait).await;
        }
    }

    /// How long a request issued now would be delayed, without recording it
    pub fn pending_wait(&self) -> Option<Duration> {
        let mut timestamps = self.timestamps.lock();
        let now = Instant::now();
        self.evict(&mut timestamps, now);

        if timestamps.len() < self.config.max_requests {
            None
        } else {
            Some(self.wait_time(&timestamps, now))
        }
    }

    /// Number of requests recorded in the trailing window
    pub fn in_window(&self) -> usize {
        let mut timestamps = self.timestamps.lock();
        self.evict(&mut timestamps, Instant::now());
        timestamps.len()
    }

    /// Drop timestamps that have left the window
    fn evict(&self, timestamps: &mut VecDeque<Instant>, now: Instant) {
        while let Some(oldest) = timestamps.front() {
            if now.saturating_duration_since(*oldest) >= self.config.window {
                timestamps.pop_front();
            } else {
                break;
            }
        }
    }

    /// `window - (now - oldest) + safety_margin`
    fn wait_time(&self, timestamps: &VecDeque<Instant>, now: Instant) -> Duration {
        let elapsed = timestamps
            .front()
            .map(|oldest| now.saturating_duration_since(*oldest))
            .unwrap_or_default();

        self.config.window.saturating_sub(elapsed) + self.config.safety_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn limiter(max_requests: usize, window_ms: u64) -> RateLimiter {
        RateLimiter::new(RateLimitConfig {
            max_requests,
            window: Duration::from_millis(window_ms),
            safety_margin: Duration::from_millis(50),
        })
        .unwrap()
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let result = RateLimiter::new(RateLimitConfig {
            max_requests: 0,
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_limit_allocates_lazily() {
        let limiter = limiter(usize::MAX, 1_000);

        limiter.throttle().await;

        assert_eq!(limiter.in_window(), 1);
        assert!(limiter.pending_wait().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_under_limit_does_not_wait() {
        let limiter = limiter(10, 1_000);
        let start = Instant::now();

        for _ in 0..10 {
            limiter.throttle().await;
        }

        assert_eq!(Instant::now(), start);
        assert_eq!(limiter.in_window(), 10);
        assert!(limiter.pending_wait().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_third_call_waits_for_window_plus_margin() {
        let limiter = limiter(2, 1_000);
        let start = Instant::now();

        limiter.throttle().await;
        tokio::time::advance(Duration::from_millis(100)).await;
        limiter.throttle().await;
        tokio::time::advance(Duration::from_millis(200)).await;

        assert_eq!(limiter.pending_wait(), Some(Duration::from_millis(750)));

        limiter.throttle().await;

        assert!(Instant::now() - start >= Duration::from_millis(1_050));
        // the first request aged out; the second and third remain
        assert_eq!(limiter.in_window(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_window_stays_pending_until_margin_passes() {
        let limiter = limiter(1, 1_000);

        let mut first = tokio_test::task::spawn(limiter.throttle());
        tokio_test::assert_ready!(first.poll());

        let mut second = tokio_test::task::spawn(limiter.throttle());
        tokio_test::assert_pending!(second.poll());

        tokio::time::advance(Duration::from_millis(1_000)).await;
        tokio_test::assert_pending!(second.poll());

        tokio::time::advance(Duration::from_millis(50)).await;
        assert!(second.is_woken());
        tokio_test::assert_ready!(second.poll());
    }

    #[tokio::test(start_paused = true)]
    async fn test_old_timestamps_are_evicted() {
        let limiter = limiter(3, 1_000);

        for _ in 0..3 {
            limiter.throttle().await;
        }
        assert_eq!(limiter.in_window(), 3);

        tokio::time::advance(Duration::from_millis(1_000)).await;

        assert_eq!(limiter.in_window(), 0);
        assert!(limiter.pending_wait().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_never_exceed_limit() {
        let limiter = Arc::new(limiter(10, 1_000));
        let start = Instant::now();

        let handles: Vec<_> = (0..35)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move {
                    limiter.throttle().await;
                    Instant::now()
                })
            })
            .collect();

        let mut admitted = Vec::new();
        for handle in handles {
            admitted.push(handle.await.unwrap());
        }
        admitted.sort();

        // every trailing window holds at most 10 admissions
        for (i, t) in admitted.iter().enumerate() {
            let in_window = admitted[..=i]
                .iter()
                .filter(|earlier| *t - **earlier < Duration::from_millis(1_000))
                .count();
            assert!(in_window <= 10, "window ending at {:?} held {}", *t - start, in_window);
        }

        // 35 requests at 10 per second need at least three extra windows
        assert!(*admitted.last().unwrap() - start >= Duration::from_millis(3_000));
    }
}
