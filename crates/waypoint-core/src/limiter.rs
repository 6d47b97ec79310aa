//! Per-client sliding-window rate limiting.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Sliding-window rate limiter keyed by client identity.
///
/// Prune-expired and append happen under a single lock acquisition, so
/// concurrent requests from the same client cannot both slip under the
/// limit.
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    clients: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    /// Creates a limiter allowing `max_requests` per client per `window`.
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Records a request attempt for `client_id`, returning `false` when the
    /// client has exhausted its window.
    pub fn check(&self, client_id: &str) -> bool {
        let now = Instant::now();
        let mut clients = self
            .clients
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let timestamps = clients.entry(client_id.to_owned()).or_default();
        timestamps.retain(|stamp| now.duration_since(*stamp) < self.window);

        if timestamps.len() >= self.max_requests {
            return false;
        }
        timestamps.push(now);
        true
    }

    /// Seconds until the oldest window entry for `client_id` expires.
    ///
    /// Returns zero for clients with free capacity.
    pub fn retry_after_secs(&self, client_id: &str) -> u64 {
        let now = Instant::now();
        let clients = self
            .clients
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let Some(timestamps) = clients.get(client_id) else {
            return 0;
        };
        let live = timestamps
            .iter()
            .filter(|stamp| now.duration_since(**stamp) < self.window)
            .count();
        if live < self.max_requests {
            return 0;
        }
        timestamps
            .iter()
            .min()
            .map_or(0, |oldest| {
                self.window
                    .saturating_sub(now.duration_since(*oldest))
                    .as_secs()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_the_limit() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        assert!(limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));
    }

    #[test]
    fn clients_are_independent() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.check("a"));
        assert!(!limiter.check("a"));
        assert!(limiter.check("b"));
    }

    #[test]
    fn expired_entries_free_capacity() {
        let limiter = RateLimiter::new(1, Duration::from_millis(20));
        assert!(limiter.check("a"));
        assert!(!limiter.check("a"));
        std::thread::sleep(Duration::from_millis(30));
        assert!(limiter.check("a"));
    }

    #[test]
    fn retry_after_is_zero_with_capacity() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        limiter.check("a");
        assert_eq!(limiter.retry_after_secs("a"), 0);
        assert_eq!(limiter.retry_after_secs("unseen"), 0);
    }
}
