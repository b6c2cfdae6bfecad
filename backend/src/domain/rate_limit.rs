//! Process-local request rate limiting.
//!
//! Fixed window per client key: at most [`DEFAULT_LIMIT`] admitted requests
//! per [`DEFAULT_WINDOW_SECS`] seconds. Windows reset lazily on access, so
//! there is no background sweeper, and a rejection never mutates the stored
//! count past the limit.
//!
//! State lives in one in-process table and is forgotten on restart. That is
//! an accepted limitation: limiting across independently scaled instances
//! would need an external shared counter store, which is out of scope. The
//! limiter is handed to handlers as an injected dependency so a shared
//! implementation could replace it without touching the endpoint.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// Admitted requests allowed per window for one client key.
pub const DEFAULT_LIMIT: u32 = 10;
/// Window length in seconds.
pub const DEFAULT_WINDOW_SECS: i64 = 60;

/// Outcome of a single admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    /// Whether the request may proceed.
    pub allowed: bool,
    /// Admissions left in the current window after this check.
    pub remaining: u32,
    /// Instant at which the current window ends and the quota resets.
    pub reset_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
struct WindowState {
    count: u32,
    window_start: DateTime<Utc>,
}

/// Fixed-window limiter keyed by client network address.
#[derive(Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    windows: Mutex<HashMap<String, WindowState>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    /// Construct a limiter with the service defaults (10 requests / 60 s).
    pub fn new() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            window: Duration::seconds(DEFAULT_WINDOW_SECS),
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Atomically record an admission attempt for `key` and decide it.
    ///
    /// Increment-and-check happens under one lock acquisition, so two
    /// concurrent requests at `count == limit - 1` can never both be
    /// admitted.
    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Utc::now())
    }

    fn check_at(&self, key: &str, now: DateTime<Utc>) -> RateDecision {
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");
        let state = windows.entry(key.to_owned()).or_insert(WindowState {
            count: 0,
            window_start: now,
        });

        if now - state.window_start >= self.window {
            state.count = 0;
            state.window_start = now;
        }

        let reset_at = state.window_start + self.window;
        if state.count < self.limit {
            state.count += 1;
            RateDecision {
                allowed: true,
                remaining: self.limit - state.count,
                reset_at,
            }
        } else {
            RateDecision {
                allowed: false,
                remaining: 0,
                reset_at,
            }
        }
    }
}
