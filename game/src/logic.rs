use std::sync::Arc;

use engine::GameLogic;

use crate::direction::Direction;
use crate::drill_core::{DrillCore, DrillTuning, TuningError};
use crate::library::SequenceLibrary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillInput {
    Noop,
    Press(Direction),
    /// One configured tick step of the countdown.
    Tick,
}

/// Deterministic step function over [`DrillCore`] for `engine::HeadlessRunner`.
///
/// Each recorded state only carries the events produced by the step that created it.
#[derive(Debug, Clone)]
pub struct DrillLogic {
    prototype: DrillCore,
}

impl DrillLogic {
    pub fn new(
        library: impl Into<Arc<SequenceLibrary>>,
        tuning: DrillTuning,
        seed: u64,
    ) -> Result<Self, TuningError> {
        Ok(Self {
            prototype: DrillCore::new(library, tuning, seed)?,
        })
    }

    pub fn standard(seed: u64) -> Self {
        Self {
            prototype: DrillCore::standard(seed),
        }
    }

    pub fn tuning(&self) -> &DrillTuning {
        self.prototype.tuning()
    }
}

impl GameLogic for DrillLogic {
    type State = DrillCore;
    type Input = DrillInput;

    fn initial_state(&self) -> Self::State {
        let mut core = self.prototype.clone();
        core.start_round();
        core
    }

    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State {
        let mut next = state.clone();
        next.clear_events();
        match input {
            DrillInput::Noop => {}
            DrillInput::Press(direction) => {
                next.submit_input(direction);
            }
            DrillInput::Tick => {
                next.tick_step();
            }
        }
        next
    }
}
