use engine::app::InputFrame;
use winit::event::VirtualKeyCode;

use crate::direction::Direction;

/// What a fresh key press means to the windowed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Direction(Direction),
    Start,
    TogglePause,
    Back,
    Restart,
    Quit,
}

pub fn map_key_to_direction(key: VirtualKeyCode) -> Option<Direction> {
    match key {
        VirtualKeyCode::Up | VirtualKeyCode::W => Some(Direction::Up),
        VirtualKeyCode::Down | VirtualKeyCode::S => Some(Direction::Down),
        VirtualKeyCode::Left | VirtualKeyCode::A => Some(Direction::Left),
        VirtualKeyCode::Right | VirtualKeyCode::D => Some(Direction::Right),
        _ => None,
    }
}

pub fn map_key_to_command(key: VirtualKeyCode) -> Option<KeyCommand> {
    if let Some(direction) = map_key_to_direction(key) {
        return Some(KeyCommand::Direction(direction));
    }
    match key {
        VirtualKeyCode::Return | VirtualKeyCode::Space => Some(KeyCommand::Start),
        VirtualKeyCode::Escape | VirtualKeyCode::P => Some(KeyCommand::TogglePause),
        VirtualKeyCode::Back => Some(KeyCommand::Back),
        VirtualKeyCode::R => Some(KeyCommand::Restart),
        VirtualKeyCode::Q => Some(KeyCommand::Quit),
        _ => None,
    }
}

/// Commands for this frame's fresh presses, in press order. Unmapped keys are dropped.
pub fn commands_from_frame(input: &InputFrame) -> Vec<KeyCommand> {
    input
        .keys_pressed
        .iter()
        .filter_map(|&key| map_key_to_command(key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::ElementState;

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        assert_eq!(map_key_to_direction(VirtualKeyCode::Up), Some(Direction::Up));
        assert_eq!(map_key_to_direction(VirtualKeyCode::S), Some(Direction::Down));
        assert_eq!(map_key_to_direction(VirtualKeyCode::A), Some(Direction::Left));
        assert_eq!(map_key_to_direction(VirtualKeyCode::D), Some(Direction::Right));
        assert_eq!(map_key_to_direction(VirtualKeyCode::X), None);
    }

    #[test]
    fn frame_commands_keep_press_order_and_skip_unmapped_and_repeats() {
        let mut input = InputFrame::default();
        input.on_key(VirtualKeyCode::Down, ElementState::Pressed);
        input.on_key(VirtualKeyCode::Z, ElementState::Pressed);
        input.on_key(VirtualKeyCode::Down, ElementState::Pressed);
        input.on_key(VirtualKeyCode::Escape, ElementState::Pressed);

        assert_eq!(
            commands_from_frame(&input),
            vec![
                KeyCommand::Direction(Direction::Down),
                KeyCommand::TogglePause,
            ]
        );
    }
}
