//! Game action definitions
//!
//! Retro handheld layout: d-pad, four face buttons, start and select.

use macroquad::input::KeyCode;
use super::gamepad_state::button;

/// Everything a game can ask the input layer about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    X,
    Y,
    Start,
    Select,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::A,
        Action::B,
        Action::X,
        Action::Y,
        Action::Start,
        Action::Select,
    ];

    /// Standard-mapping button index for this action
    pub fn button(&self) -> usize {
        match self {
            Action::Up => button::DPAD_UP,
            Action::Down => button::DPAD_DOWN,
            Action::Left => button::DPAD_LEFT,
            Action::Right => button::DPAD_RIGHT,
            Action::A => button::A,
            Action::B => button::B,
            Action::X => button::X,
            Action::Y => button::Y,
            Action::Start => button::START,
            Action::Select => button::SELECT,
        }
    }

    /// Keyboard keys bound to this action
    pub fn keys(&self) -> &'static [KeyCode] {
        match self {
            Action::Up => &[KeyCode::Up, KeyCode::W],
            Action::Down => &[KeyCode::Down, KeyCode::S],
            Action::Left => &[KeyCode::Left, KeyCode::A],
            Action::Right => &[KeyCode::Right, KeyCode::D],
            Action::A => &[KeyCode::Z],
            Action::B => &[KeyCode::X],
            Action::X => &[KeyCode::C],
            Action::Y => &[KeyCode::V],
            Action::Start => &[KeyCode::Enter],
            Action::Select => &[KeyCode::Tab],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_are_unique() {
        let mut seen: Vec<usize> = Action::ALL.iter().map(|a| a.button()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), Action::ALL.len());
    }
}
