use std::time::Duration;

/// Converts variable frame deltas into whole fixed-size steps.
///
/// Hosts feed wall-clock `dt` once per frame and run the game's fixed tick as many times as
/// `advance` reports. A long stall (window drag, debugger pause) is capped at
/// `max_steps_per_advance` and the rest of the backlog is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStep {
    interval: Duration,
    accumulated: Duration,
    max_steps_per_advance: u32,
}

impl FixedStep {
    pub const DEFAULT_MAX_STEPS: u32 = 8;

    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            accumulated: Duration::ZERO,
            max_steps_per_advance: Self::DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps_per_advance = max_steps.max(1);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }

    /// Adds `dt` and returns how many fixed steps are now due.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.accumulated = self.accumulated.saturating_add(dt);

        let mut steps = 0;
        while self.accumulated >= self.interval {
            if steps == self.max_steps_per_advance {
                self.accumulated = Duration::ZERO;
                break;
            }
            self.accumulated -= self.interval;
            steps += 1;
        }
        steps
    }
}
