//! In-process submission throttle: a sliding window of attempt timestamps
//! per identifier. State lives in this process only and is not shared across
//! instances; distinct identifiers are never evicted (accepted limitation
//! for a single-instance deployment).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Time source for the limiter, injectable so window expiry is
/// deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

pub struct SlidingWindowLimiter {
    attempts: Mutex<HashMap<String, Vec<Instant>>>,
    clock: Arc<dyn Clock>,
    max_attempts: usize,
    window: Duration,
}

impl SlidingWindowLimiter {
    pub fn new(max_attempts: usize, window: Duration) -> Self {
        Self::with_clock(max_attempts, window, Arc::new(SystemClock))
    }

    pub fn with_clock(max_attempts: usize, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            attempts: Mutex::new(HashMap::new()),
            clock,
            max_attempts,
            window,
        }
    }

    /// Whether a submission attempt for `identifier` is currently allowed.
    /// Prunes that identifier's expired attempts; repeated calls without
    /// `record_attempt` never change the outcome.
    pub fn can_submit(&self, identifier: &str) -> bool {
        let now = self.clock.now();
        let mut attempts = self.attempts.lock().unwrap();
        let recent = attempts.entry(identifier.to_string()).or_default();
        recent.retain(|at| now.duration_since(*at) < self.window);
        recent.len() < self.max_attempts
    }

    /// Record one real submission attempt. Call exactly once per attempt,
    /// after `can_submit` returned true.
    pub fn record_attempt(&self, identifier: &str) {
        let now = self.clock.now();
        self.attempts
            .lock()
            .unwrap()
            .entry(identifier.to_string())
            .or_default()
            .push(now);
    }

    /// Time until the oldest in-window attempt for `identifier` falls out of
    /// the window; zero when nothing is recorded.
    pub fn remaining_time(&self, identifier: &str) -> Duration {
        let now = self.clock.now();
        let mut attempts = self.attempts.lock().unwrap();
        let Some(recent) = attempts.get_mut(identifier) else {
            return Duration::ZERO;
        };
        recent.retain(|at| now.duration_since(*at) < self.window);
        match recent.iter().min() {
            Some(oldest) => self.window.saturating_sub(now.duration_since(*oldest)),
            None => Duration::ZERO,
        }
    }
}
