//! Client-side rate limiting for provider calls
//!
//! A sliding-window limiter shared by every in-flight generation. Callers
//! suspend until a slot frees up; no call is ever rejected. The window
//! check and the slot append happen under one lock acquisition with no
//! suspension point in between, and the wait loop is iterative rather than
//! recursive.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Sliding-window rate limiter: at most `max_calls` within `window`.
#[derive(Clone)]
pub struct RateLimiter {
    max_calls: usize,
    window: Duration,
    calls: Arc<Mutex<VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(max_calls: usize, window: Duration) -> Self {
        Self {
            max_calls: max_calls.max(1),
            window,
            calls: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Suspend until the window admits another call, then claim the slot.
    pub async fn wait_for_slot(&self) {
        loop {
            let wait = {
                let mut calls = self.calls.lock().await;
                let now = Instant::now();

                // Drop entries that have aged out of the window.
                while calls
                    .front()
                    .is_some_and(|&t| now.duration_since(t) >= self.window)
                {
                    calls.pop_front();
                }

                match calls.front().copied() {
                    _ if calls.len() < self.max_calls => {
                        calls.push_back(now);
                        return;
                    }
                    Some(oldest) => self.window.saturating_sub(now.duration_since(oldest)),
                    None => {
                        calls.push_back(now);
                        return;
                    }
                }
            };

            tracing::debug!(wait_ms = wait.as_millis() as u64, "Rate limit window full, waiting");
            tokio::time::sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn admits_calls_under_the_limit_immediately() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let started = Instant::now();
        for _ in 0..3 {
            limiter.wait_for_slot().await;
        }
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn blocks_until_the_window_advances() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let started = Instant::now();

        limiter.wait_for_slot().await;
        limiter.wait_for_slot().await;
        // Third call must wait for the first slot to age out.
        limiter.wait_for_slot().await;

        assert!(started.elapsed() >= Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn no_call_is_dropped_under_contention() {
        let limiter = RateLimiter::new(2, Duration::from_secs(10));
        let mut handles = Vec::new();
        for _ in 0..6 {
            let limiter = limiter.clone();
            handles.push(tokio::spawn(async move {
                limiter.wait_for_slot().await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
    }
}
