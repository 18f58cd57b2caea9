// Minimum-interval pacing for fallback API calls.
//
// Perspective's free tier allows 1 QPS, and a batch fan-out would
// otherwise burst every queued item at once. Callers acquire a slot
// before each request: whoever claims the slot stamps it, everyone
// else sleeps until the interval since the last stamp has passed and
// tries again. The interval itself is immutable, so only the stamp
// lives behind the lock.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

/// Enforces a minimum interval between requests across tasks.
#[derive(Clone)]
pub struct RateLimiter {
    interval: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    /// Create a limiter that spaces requests at least `interval` apart.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Wait until a request slot is free, claim it, and return.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut last = self.last_request.lock().await;
                match *last {
                    Some(prev) if prev.elapsed() < self.interval => self.interval - prev.elapsed(),
                    _ => {
                        *last = Some(Instant::now());
                        return;
                    }
                }
                // Lock drops here; sleeping while holding it would stall
                // every other waiter
            };
            tokio::time::sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_acquire_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_secs(1));
        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn second_acquire_waits_out_the_interval() {
        let limiter = RateLimiter::new(Duration::from_millis(500));
        limiter.acquire().await;
        let start = Instant::now();
        limiter.acquire().await;
        let elapsed = start.elapsed();
        assert!(
            elapsed >= Duration::from_millis(400),
            "Expected ~500ms delay, got {:?}",
            elapsed
        );
    }

    #[tokio::test]
    async fn clones_share_one_slot() {
        let limiter = RateLimiter::new(Duration::from_millis(300));
        let clone = limiter.clone();
        limiter.acquire().await;
        let start = Instant::now();
        clone.acquire().await;
        assert!(
            start.elapsed() >= Duration::from_millis(200),
            "clone should see the original's stamp, waited {:?}",
            start.elapsed()
        );
    }
}
