//! Token-bucket rate limiter
//!
//! Fixed-window refill keyed by caller-supplied strings. Injected behind
//! the `RateLimiter` trait so the coordinators never touch shared
//! mutable state directly.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::traits::RateLimiter;

struct Bucket {
    tokens: u32,
    last_refill: Instant,
}

/// Process-wide limiter; counters reset when a key's window elapses.
#[derive(Default)]
pub struct TokenBucketLimiter {
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl TokenBucketLimiter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateLimiter for TokenBucketLimiter {
    fn allow(&self, key: &str, limit: u32, window_ms: u64) -> bool {
        let now = Instant::now();
        let mut buckets = match self.buckets.lock() {
            Ok(guard) => guard,
            // Poisoned lock: deny rather than fail open.
            Err(_) => return false,
        };

        let bucket = buckets.entry(key.to_string()).or_insert(Bucket {
            tokens: limit,
            last_refill: now,
        });

        if now.duration_since(bucket.last_refill) > Duration::from_millis(window_ms) {
            bucket.tokens = limit;
            bucket.last_refill = now;
        }

        if bucket.tokens == 0 {
            return false;
        }
        bucket.tokens -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_limit_then_denies() {
        let limiter = TokenBucketLimiter::new();
        for _ in 0..3 {
            assert!(limiter.allow("k", 3, 60_000));
        }
        assert!(!limiter.allow("k", 3, 60_000));
    }

    #[test]
    fn keys_are_independent() {
        let limiter = TokenBucketLimiter::new();
        assert!(limiter.allow("a", 1, 60_000));
        assert!(!limiter.allow("a", 1, 60_000));
        assert!(limiter.allow("b", 1, 60_000));
    }

    #[test]
    fn window_elapse_refills_tokens() {
        let limiter = TokenBucketLimiter::new();
        assert!(limiter.allow("k", 1, 10));
        assert!(!limiter.allow("k", 1, 10));
        std::thread::sleep(Duration::from_millis(25));
        assert!(limiter.allow("k", 1, 10));
    }
}
