//! Text scripts for driving a drill without a window.
//!
//! One character per step: a direction symbol presses that direction, `.` advances one
//! tick step and `*` presses whatever the live round expects next. Whitespace and any
//! other character are skipped.

use crate::direction::Direction;
use crate::drill_core::DrillCore;
use crate::logic::DrillInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    Press(Direction),
    Tick,
    PressExpected,
}

impl ScriptStep {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(ScriptStep::Tick),
            '*' => Some(ScriptStep::PressExpected),
            other => Direction::from_symbol(other).map(ScriptStep::Press),
        }
    }

    /// Concrete input for this step against `state`. `*` with no live round is a no-op.
    pub fn resolve(self, state: &DrillCore) -> DrillInput {
        match self {
            ScriptStep::Press(direction) => DrillInput::Press(direction),
            ScriptStep::Tick => DrillInput::Tick,
            ScriptStep::PressExpected => state
                .expected_direction()
                .map_or(DrillInput::Noop, DrillInput::Press),
        }
    }
}

pub fn parse_script(text: &str) -> Vec<ScriptStep> {
    text.chars().filter_map(ScriptStep::from_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_unknown_characters() {
        assert_eq!(
            parse_script("D s ⭡ . *x\n"),
            vec![
                ScriptStep::Press(Direction::Down),
                ScriptStep::Press(Direction::Down),
                ScriptStep::Press(Direction::Up),
                ScriptStep::Tick,
                ScriptStep::PressExpected,
            ]
        );
    }

    #[test]
    fn press_expected_follows_the_live_round() {
        let mut core = DrillCore::standard(5);
        assert_eq!(ScriptStep::PressExpected.resolve(&core), DrillInput::Noop);

        core.start_round();
        let expected = core.expected_direction().expect("live round");
        assert_eq!(
            ScriptStep::PressExpected.resolve(&core),
            DrillInput::Press(expected)
        );
    }
}
