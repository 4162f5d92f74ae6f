//! Standard-mapping gamepad snapshot
//!
//! Same shape as a Web Gamepad API `Gamepad` object. The virtual pad owns one
//! of these for its whole lifetime; physical devices are copied into fresh
//! snapshots on every poll.

/// Number of button slots in a snapshot (standard mapping plus one spare)
pub const BUTTON_COUNT: usize = 18;

/// Number of axes in a snapshot (left stick x/y, right stick x/y)
pub const AXIS_COUNT: usize = 4;

// Standard gamepad button indices (Web Gamepad API standard mapping)
pub mod button {
    pub const A: usize = 0;           // South
    pub const B: usize = 1;           // East
    pub const X: usize = 2;           // West
    pub const Y: usize = 3;           // North
    pub const LB: usize = 4;
    pub const RB: usize = 5;
    pub const LT: usize = 6;
    pub const RT: usize = 7;
    pub const SELECT: usize = 8;
    pub const START: usize = 9;
    pub const L3: usize = 10;
    pub const R3: usize = 11;
    pub const DPAD_UP: usize = 12;
    pub const DPAD_DOWN: usize = 13;
    pub const DPAD_LEFT: usize = 14;
    pub const DPAD_RIGHT: usize = 15;
    pub const GUIDE: usize = 16;

    /// Short display name for a button index
    pub fn name(index: usize) -> &'static str {
        match index {
            A => "A",
            B => "B",
            X => "X",
            Y => "Y",
            LB => "LB",
            RB => "RB",
            LT => "LT",
            RT => "RT",
            SELECT => "Select",
            START => "Start",
            L3 => "L3",
            R3 => "R3",
            DPAD_UP => "Up",
            DPAD_DOWN => "Down",
            DPAD_LEFT => "Left",
            DPAD_RIGHT => "Right",
            GUIDE => "Guide",
            _ => "-",
        }
    }
}

/// State of one button
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ButtonState {
    pub pressed: bool,
    pub touched: bool,
    pub value: f32,
}

/// Button layout reported by a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamepadMapping {
    #[default]
    Standard,
}

impl GamepadMapping {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamepadMapping::Standard => "standard",
        }
    }
}

/// Snapshot of a gamepad in standard-mapping form
#[derive(Debug, Clone, PartialEq)]
pub struct GamepadState {
    pub connected: bool,
    pub axes: [f32; AXIS_COUNT],
    pub buttons: [ButtonState; BUTTON_COUNT],
    pub id: String,
    pub index: usize,
    pub mapping: GamepadMapping,
    /// Milliseconds since the Unix epoch of the last input change
    pub timestamp: f64,
}

impl GamepadState {
    /// Connected gamepad with every button released and axes centered
    pub fn new(id: impl Into<String>, index: usize, now: f64) -> Self {
        Self {
            connected: true,
            axes: [0.0; AXIS_COUNT],
            buttons: [ButtonState::default(); BUTTON_COUNT],
            id: id.into(),
            index,
            mapping: GamepadMapping::Standard,
            timestamp: now,
        }
    }

    /// Clear the pressed flag of every button
    pub fn release_all(&mut self) {
        for b in self.buttons.iter_mut() {
            b.pressed = false;
        }
    }

    /// Mark a button pressed. Out-of-range indices are ignored.
    pub fn press(&mut self, button: usize) {
        if let Some(b) = self.buttons.get_mut(button) {
            b.pressed = true;
        }
    }

    pub fn is_pressed(&self, button: usize) -> bool {
        self.buttons.get(button).map_or(false, |b| b.pressed)
    }

    /// Pressed buttons as a bitmask (bit N = button N)
    pub fn button_mask(&self) -> u32 {
        self.buttons
            .iter()
            .enumerate()
            .filter(|(_, b)| b.pressed)
            .fold(0u32, |mask, (i, _)| mask | (1 << i))
    }

    /// Indices of all pressed buttons, ascending
    pub fn pressed_buttons(&self) -> Vec<usize> {
        (0..BUTTON_COUNT).filter(|&i| self.is_pressed(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_gamepad_is_released() {
        let gp = GamepadState::new("pad", 0, 1000.0);
        assert!(gp.connected);
        assert_eq!(gp.buttons.len(), BUTTON_COUNT);
        assert_eq!(gp.axes, [0.0; AXIS_COUNT]);
        assert_eq!(gp.button_mask(), 0);
        assert_eq!(gp.mapping.as_str(), "standard");
        assert_eq!(gp.timestamp, 1000.0);
    }

    #[test]
    fn test_press_and_mask() {
        let mut gp = GamepadState::new("pad", 0, 0.0);
        gp.press(button::A);
        gp.press(button::DPAD_RIGHT);
        gp.press(99);
        assert!(gp.is_pressed(button::A));
        assert!(!gp.is_pressed(99));
        assert_eq!(gp.button_mask(), (1 << button::A) | (1 << button::DPAD_RIGHT));
        assert_eq!(gp.pressed_buttons(), vec![button::A, button::DPAD_RIGHT]);

        gp.release_all();
        assert_eq!(gp.button_mask(), 0);
    }

    #[test]
    fn test_press_leaves_touched_and_value_alone() {
        let mut gp = GamepadState::new("pad", 0, 0.0);
        gp.press(button::B);
        assert!(!gp.buttons[button::B].touched);
        assert_eq!(gp.buttons[button::B].value, 0.0);
    }
}
