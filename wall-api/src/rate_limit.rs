//! Per-client submission rate limiting.
//!
//! Fixed window, fixed quota (5 per hour in the reference policy). State is
//! one mutex-guarded map of per-key windows, so the quota check and the
//! increment happen under a single lock acquisition: two concurrent
//! requests from the same client cannot both pass a check that only one of
//! them should survive.
//!
//! The limiter keys on the raw connecting IP. Anonymization is applied only
//! to the persisted record, not here.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

struct Window {
    started_at: DateTime<Utc>,
    count: u32,
}

pub struct RateLimiter {
    quota: u32,
    window: Duration,
    buckets: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(quota: u32, window_secs: u64) -> Self {
        RateLimiter {
            quota,
            window: Duration::seconds(window_secs as i64),
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Consumes one unit of quota for `key` if any remains in the current
    /// window. Returns `false` when the quota is exhausted.
    pub fn allow(&self, key: &str) -> bool {
        self.allow_at(key, Utc::now())
    }

    /// Clock-injected variant of [`allow`](Self::allow).
    pub fn allow_at(&self, key: &str, now: DateTime<Utc>) -> bool {
        let mut buckets = self
            .buckets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Opportunistic cleanup keeps the map bounded by active clients.
        if buckets.len() > 1024 {
            let window = self.window;
            buckets.retain(|_, w| now - w.started_at < window);
        }

        let window = buckets.entry(key.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if now - window.started_at >= self.window {
            window.started_at = now;
            window.count = 0;
        }

        if window.count >= self.quota {
            return false;
        }

        window.count += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_is_enforced() {
        let limiter = RateLimiter::new(5, 3600);
        for _ in 0..5 {
            assert!(limiter.allow("10.0.0.1"));
        }
        assert!(!limiter.allow("10.0.0.1"));
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::new(1, 3600);
        assert!(limiter.allow("10.0.0.1"));
        assert!(!limiter.allow("10.0.0.1"));
        assert!(limiter.allow("10.0.0.2"));
    }

    #[test]
    fn test_window_elapse_resets_quota() {
        let limiter = RateLimiter::new(2, 3600);
        let t0 = Utc::now();
        assert!(limiter.allow_at("10.0.0.1", t0));
        assert!(limiter.allow_at("10.0.0.1", t0));
        assert!(!limiter.allow_at("10.0.0.1", t0 + Duration::minutes(59)));
        assert!(limiter.allow_at("10.0.0.1", t0 + Duration::hours(1)));
    }

    #[test]
    fn test_concurrent_requests_never_overadmit() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicU32, Ordering};

        let limiter = Arc::new(RateLimiter::new(5, 3600));
        let admitted = Arc::new(AtomicU32::new(0));
        let handles: Vec<_> = (0..20)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                let admitted = Arc::clone(&admitted);
                std::thread::spawn(move || {
                    if limiter.allow("10.0.0.1") {
                        admitted.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(admitted.load(Ordering::SeqCst), 5);
    }
}
