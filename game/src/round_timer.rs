use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Countdown for one round.
///
/// The timer only advances while running. It must be stopped before it is restarted
/// with a new limit, so two countdowns never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTimer {
    #[serde(with = "crate::serde_duration")]
    elapsed: Duration,
    #[serde(with = "crate::serde_duration")]
    limit: Duration,
    running: bool,
}

impl RoundTimer {
    pub fn new(limit: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            limit,
            running: false,
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stops the current countdown and starts a fresh one of `limit`.
    pub fn restart(&mut self, limit: Duration) {
        self.stop();
        self.limit = limit;
        self.elapsed = Duration::ZERO;
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.elapsed)
    }

    pub fn is_up(&self) -> bool {
        self.elapsed >= self.limit
    }

    /// Advances a running timer by `dt`. Returns `false` when the timer was stopped.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt).min(self.limit);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_timer_is_stopped() {
        let mut t = RoundTimer::new(Duration::from_secs(5));
        assert!(!t.is_running());
        assert!(!t.tick(Duration::from_secs(1)));
        assert_eq!(t.elapsed(), Duration::ZERO);
    }

    #[test]
    fn counts_down_to_zero_and_saturates() {
        let mut t = RoundTimer::new(Duration::ZERO);
        t.restart(Duration::from_millis(300));
        assert!(t.tick(Duration::from_millis(100)));
        assert_eq!(t.remaining(), Duration::from_millis(200));
        assert!(!t.is_up());

        t.tick(Duration::from_millis(250));
        assert!(t.is_up());
        assert_eq!(t.remaining(), Duration::ZERO);
        assert_eq!(t.elapsed(), Duration::from_millis(300));
    }

    #[test]
    fn stop_freezes_and_restart_resets() {
        let mut t = RoundTimer::new(Duration::ZERO);
        t.restart(Duration::from_millis(500));
        t.tick(Duration::from_millis(200));
        t.stop();
        t.tick(Duration::from_millis(200));
        assert_eq!(t.remaining(), Duration::from_millis(300));

        t.restart(Duration::from_millis(400));
        assert!(t.is_running());
        assert_eq!(t.remaining(), Duration::from_millis(400));
    }
}
