//! Sequence challenge engine.
//!
//! One live round at a time: a target sequence drawn from the library, a match cursor and a
//! countdown. Inputs are checked strictly in order; a full match starts the next round
//! immediately, an expired countdown starts it after a short restart delay. Every round
//! start shrinks the time budget by a fixed step down to a floor.
//!
//! The engine never renders and never schedules anything itself. Hosts call
//! [`DrillCore::tick`] on their own clock and read back [`DrillEvent`]s.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::direction::{Direction, glyphs};
use crate::library::{IconRef, SequenceLibrary};
use crate::round_timer::RoundTimer;

pub const DEFAULT_INITIAL_BUDGET: Duration = Duration::from_millis(5_000);
pub const DEFAULT_BUDGET_DECREMENT: Duration = Duration::from_millis(200);
pub const DEFAULT_MIN_BUDGET: Duration = Duration::from_millis(1_000);
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);
pub const DEFAULT_TIMEOUT_RESTART_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TuningError {
    #[error("tick step must be greater than zero")]
    ZeroTick,
    #[error("minimum round budget must be greater than zero")]
    ZeroMinBudget,
    #[error("minimum round budget {min:?} exceeds the initial budget {initial:?}")]
    MinAboveInitial { min: Duration, initial: Duration },
}

/// Timing and difficulty knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillTuning {
    /// Budget before the first decrement; round 1 gets `initial_budget - decrement`.
    #[serde(rename = "initial_budget_ms", with = "crate::serde_duration")]
    pub initial_budget: Duration,
    #[serde(rename = "decrement_ms", with = "crate::serde_duration")]
    pub decrement: Duration,
    #[serde(rename = "min_budget_ms", with = "crate::serde_duration")]
    pub min_budget: Duration,
    #[serde(rename = "tick_ms", with = "crate::serde_duration")]
    pub tick: Duration,
    #[serde(rename = "timeout_restart_delay_ms", with = "crate::serde_duration")]
    pub timeout_restart_delay: Duration,
}

impl Default for DrillTuning {
    fn default() -> Self {
        Self {
            initial_budget: DEFAULT_INITIAL_BUDGET,
            decrement: DEFAULT_BUDGET_DECREMENT,
            min_budget: DEFAULT_MIN_BUDGET,
            tick: DEFAULT_TICK,
            timeout_restart_delay: DEFAULT_TIMEOUT_RESTART_DELAY,
        }
    }
}

impl DrillTuning {
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.tick.is_zero() {
            return Err(TuningError::ZeroTick);
        }
        if self.min_budget.is_zero() {
            return Err(TuningError::ZeroMinBudget);
        }
        if self.min_budget > self.initial_budget {
            return Err(TuningError::MinAboveInitial {
                min: self.min_budget,
                initial: self.initial_budget,
            });
        }
        Ok(())
    }

    /// Budget of the `round`-th round (1-based): `initial - round * decrement`, floored.
    pub fn budget_for_round(&self, round: u32) -> Duration {
        self.initial_budget
            .saturating_sub(self.decrement.saturating_mul(round))
            .max(self.min_budget)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrillEvent {
    RoundStarted {
        round: u32,
        library_index: usize,
        name: String,
        sequence: Vec<Direction>,
        icon: IconRef,
        budget: Duration,
    },
    StepResult {
        index: usize,
        outcome: StepOutcome,
    },
    RoundComplete {
        round: u32,
        remaining: Duration,
    },
    RoundTimedOut {
        round: u32,
    },
    Tick {
        remaining: Duration,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum RoundPhase {
    /// No round has started yet, or the engine was shut down.
    Idle,
    Matching,
    /// Countdown expired; the next round starts once `restart_in` has elapsed.
    TimedOut {
        #[serde(rename = "restart_in_ms", with = "crate::serde_duration")]
        restart_in: Duration,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Running { remaining: Duration },
    TimedOut,
    Waiting { restart_in: Duration },
    Restarted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillStats {
    pub rounds_started: u32,
    pub rounds_completed: u32,
    pub rounds_timed_out: u32,
    pub correct_inputs: u32,
    pub incorrect_inputs: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    number: u32,
    library_index: usize,
    sequence: Vec<Direction>,
    icon: IconRef,
    match_index: usize,
}

impl Round {
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn library_index(&self) -> usize {
        self.library_index
    }

    pub fn sequence(&self) -> &[Direction] {
        &self.sequence
    }

    pub fn icon(&self) -> &IconRef {
        &self.icon
    }

    pub fn match_index(&self) -> usize {
        self.match_index
    }

    pub fn is_complete(&self) -> bool {
        self.match_index >= self.sequence.len()
    }

    /// Direction the player has to enter next.
    pub fn expected(&self) -> Option<Direction> {
        self.sequence.get(self.match_index).copied()
    }
}

/// Serializable per-frame view of the engine, for recordings and debugging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillSnapshot {
    pub round: Option<u32>,
    pub library_index: Option<usize>,
    pub sequence: String,
    pub match_index: usize,
    #[serde(rename = "remaining_ms", with = "crate::serde_duration")]
    pub remaining: Duration,
    #[serde(rename = "budget_ms", with = "crate::serde_duration")]
    pub budget: Duration,
    #[serde(flatten)]
    pub phase: RoundPhase,
    pub stats: DrillStats,
}

#[derive(Debug, Clone)]
pub struct DrillCore {
    library: Arc<SequenceLibrary>,
    tuning: DrillTuning,
    rng: StdRng,
    round: Option<Round>,
    phase: RoundPhase,
    timer: RoundTimer,
    round_budget: Duration,
    stats: DrillStats,
    events: Vec<DrillEvent>,
}

impl DrillCore {
    pub fn new(
        library: impl Into<Arc<SequenceLibrary>>,
        tuning: DrillTuning,
        seed: u64,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(library.into(), tuning, seed))
    }

    /// Engine over the built-in library with default tuning.
    pub fn standard(seed: u64) -> Self {
        Self::build(
            Arc::new(SequenceLibrary::standard()),
            DrillTuning::default(),
            seed,
        )
    }

    fn build(library: Arc<SequenceLibrary>, tuning: DrillTuning, seed: u64) -> Self {
        Self {
            library,
            tuning,
            rng: StdRng::seed_from_u64(seed),
            round: None,
            phase: RoundPhase::Idle,
            timer: RoundTimer::new(tuning.initial_budget),
            round_budget: tuning.initial_budget,
            stats: DrillStats::default(),
            events: Vec::new(),
        }
    }

    /// Same engine with a different round-selection stream.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn library(&self) -> &SequenceLibrary {
        &self.library
    }

    pub fn tuning(&self) -> &DrillTuning {
        &self.tuning
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn stats(&self) -> DrillStats {
        self.stats
    }

    /// Time allotted to the current round.
    pub fn round_budget(&self) -> Duration {
        self.round_budget
    }

    pub fn remaining(&self) -> Duration {
        self.timer.remaining()
    }

    pub fn is_clock_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn expected_direction(&self) -> Option<Direction> {
        match self.phase {
            RoundPhase::Matching => self.round.as_ref().and_then(Round::expected),
            _ => None,
        }
    }

    pub fn events(&self) -> &[DrillEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<DrillEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Replaces the live round with a freshly drawn one and restarts the countdown.
    pub fn start_round(&mut self) {
        self.timer.stop();

        let library_index = self.rng.gen_range(0..self.library.len());
        let entry = &self.library.entries()[library_index];
        self.stats.rounds_started += 1;
        self.round_budget = self.tuning.budget_for_round(self.stats.rounds_started);

        let round = Round {
            number: self.stats.rounds_started,
            library_index,
            sequence: entry.steps().to_vec(),
            icon: entry.icon().clone(),
            match_index: 0,
        };
        info!(
            round = round.number,
            name = entry.name(),
            sequence = %glyphs(&round.sequence),
            budget_ms = self.round_budget.as_millis() as u64,
            "round started"
        );
        self.events.push(DrillEvent::RoundStarted {
            round: round.number,
            library_index,
            name: entry.name().to_string(),
            sequence: round.sequence.clone(),
            icon: round.icon.clone(),
            budget: self.round_budget,
        });

        self.round = Some(round);
        self.phase = RoundPhase::Matching;
        self.timer.restart(self.round_budget);
    }

    /// Checks one directional input against the live round.
    ///
    /// Returns `None` when the input was ignored: no live round, round already matched, or
    /// the countdown has expired.
    pub fn submit_input(&mut self, direction: Direction) -> Option<StepOutcome> {
        if self.phase != RoundPhase::Matching {
            return None;
        }
        let round = self.round.as_mut()?;
        let expected = round.expected()?;
        let index = round.match_index;

        if direction != expected {
            self.stats.incorrect_inputs += 1;
            debug!(index, %direction, %expected, "incorrect");
            self.events.push(DrillEvent::StepResult {
                index,
                outcome: StepOutcome::Incorrect,
            });
            return Some(StepOutcome::Incorrect);
        }

        round.match_index += 1;
        let complete = round.is_complete();
        let number = round.number;
        self.stats.correct_inputs += 1;
        debug!(index, %direction, "correct");
        self.events.push(DrillEvent::StepResult {
            index,
            outcome: StepOutcome::Correct,
        });

        if complete {
            self.timer.stop();
            self.stats.rounds_completed += 1;
            let remaining = self.timer.remaining();
            info!(
                round = number,
                remaining_ms = remaining.as_millis() as u64,
                "sequence complete"
            );
            self.events.push(DrillEvent::RoundComplete {
                round: number,
                remaining,
            });
            self.start_round();
        }
        Some(StepOutcome::Correct)
    }

    /// Advances the engine clock by `dt`.
    pub fn tick(&mut self, dt: Duration) -> TickOutcome {
        match self.phase {
            RoundPhase::Idle => TickOutcome::Idle,
            RoundPhase::Matching => {
                self.timer.tick(dt);
                let remaining = self.timer.remaining();
                self.events.push(DrillEvent::Tick { remaining });
                if self.timer.is_up() {
                    self.time_out();
                    return TickOutcome::TimedOut;
                }
                TickOutcome::Running { remaining }
            }
            RoundPhase::TimedOut { restart_in } => {
                let restart_in = restart_in.saturating_sub(dt);
                if restart_in.is_zero() {
                    self.start_round();
                    return TickOutcome::Restarted;
                }
                self.phase = RoundPhase::TimedOut { restart_in };
                TickOutcome::Waiting { restart_in }
            }
        }
    }

    /// Advances by one configured tick step.
    pub fn tick_step(&mut self) -> TickOutcome {
        self.tick(self.tuning.tick)
    }

    fn time_out(&mut self) {
        self.timer.stop();
        self.stats.rounds_timed_out += 1;
        let round = self.round.as_ref().map_or(0, Round::number);
        info!(round, "time's up");
        self.events.push(DrillEvent::RoundTimedOut { round });

        if self.tuning.timeout_restart_delay.is_zero() {
            self.start_round();
        } else {
            self.phase = RoundPhase::TimedOut {
                restart_in: self.tuning.timeout_restart_delay,
            };
        }
    }

    /// Stops the countdown, drops pending events and returns to `Idle`.
    /// The current round stays readable but accepts no more input.
    pub fn shutdown(&mut self) {
        self.timer.stop();
        self.events.clear();
        self.phase = RoundPhase::Idle;
    }

    pub fn snapshot(&self) -> DrillSnapshot {
        DrillSnapshot {
            round: self.round.as_ref().map(Round::number),
            library_index: self.round.as_ref().map(Round::library_index),
            sequence: self
                .round
                .as_ref()
                .map(|r| glyphs(&r.sequence))
                .unwrap_or_default(),
            match_index: self.round.as_ref().map_or(0, Round::match_index),
            remaining: self.timer.remaining(),
            budget: self.round_budget,
            phase: self.phase,
            stats: self.stats,
        }
    }
}
