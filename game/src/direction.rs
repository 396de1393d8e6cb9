use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Arrow glyph used in logs and text output.
    pub fn glyph(self) -> char {
        match self {
            Direction::Up => '⭡',
            Direction::Down => '⭣',
            Direction::Left => '⭠',
            Direction::Right => '⭢',
        }
    }

    /// Parses a single input symbol. Anything outside the four directions is `None`.
    ///
    /// Accepts the arrow glyphs, ASCII arrows (`^ v < >`), initials (`U D L R`) and `W A S`
    /// from the WASD layout. `D` is the initial of Down here, not the WASD Right key.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            '⭡' | '↑' | '^' | 'U' | 'W' => Some(Direction::Up),
            '⭣' | '↓' | 'V' | 'D' | 'S' => Some(Direction::Down),
            '⭠' | '←' | '<' | 'L' | 'A' => Some(Direction::Left),
            '⭢' | '→' | '>' | 'R' => Some(Direction::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Renders a sequence as arrow glyphs, e.g. `⭣⭣⭡⭢`.
pub fn glyphs(steps: &[Direction]) -> String {
    steps.iter().map(|d| d.glyph()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_map_to_directions() {
        assert_eq!(Direction::from_symbol('⭣'), Some(Direction::Down));
        assert_eq!(Direction::from_symbol('↑'), Some(Direction::Up));
        assert_eq!(Direction::from_symbol('a'), Some(Direction::Left));
        assert_eq!(Direction::from_symbol('>'), Some(Direction::Right));
        assert_eq!(Direction::from_symbol('d'), Some(Direction::Down));
    }

    #[test]
    fn d_is_down_and_only_was_follow_wasd() {
        assert_eq!(Direction::from_symbol('w'), Some(Direction::Up));
        assert_eq!(Direction::from_symbol('s'), Some(Direction::Down));
        assert_eq!(Direction::from_symbol('a'), Some(Direction::Left));
        assert_eq!(Direction::from_symbol('D'), Some(Direction::Down));
        assert_eq!(Direction::from_symbol('r'), Some(Direction::Right));
    }

    #[test]
    fn unknown_symbols_are_rejected() {
        for c in ['x', '.', ' ', '7', '⭧'] {
            assert_eq!(Direction::from_symbol(c), None, "{c:?} should not parse");
        }
    }

    #[test]
    fn glyph_round_trips_through_from_symbol() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_symbol(d.glyph()), Some(d));
        }
        assert_eq!(
            glyphs(&[Direction::Down, Direction::Down, Direction::Up, Direction::Right]),
            "⭣⭣⭡⭢"
        );
    }
}
