//! Gamepad query adapter
//!
//! The game loop asks a [`GamepadSource`] for gamepads instead of a global
//! platform function. Which source it gets is decided once from config:
//! physical devices, or the single virtual touch pad.
//!
//! Native: physical devices come from gilrs
//! WASM: physical devices come from the Web Gamepad API via web/vpad_plugin.js

use super::gamepad_state::GamepadState;
use super::vpad::VirtualGamepad;

/// Connection change reported by a source
#[derive(Debug, Clone, PartialEq)]
pub enum GamepadEvent {
    Connected(GamepadState),
    /// Index of the device that went away
    Disconnected(usize),
}

/// Anything that can answer "which gamepads are there and what are they doing"
pub trait GamepadSource {
    /// Refresh device state. `now` is milliseconds since the Unix epoch.
    fn poll(&mut self, now: f64);

    /// Current snapshot of every connected gamepad
    fn get_gamepads(&self) -> &[GamepadState];

    /// Connection events since the last call
    fn take_events(&mut self) -> Vec<GamepadEvent>;
}

// ============================================================================
// WASM Implementation (Web Gamepad API)
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::*;
    use crate::input::gamepad_state::{ButtonState, AXIS_COUNT, BUTTON_COUNT};

    // FFI bindings to JavaScript functions in web/vpad_plugin.js
    extern "C" {
        fn vpad_gamepad_count() -> usize;
        fn vpad_gamepad_index(slot: usize) -> usize;
        fn vpad_gamepad_id_len(slot: usize) -> usize;
        fn vpad_gamepad_copy_id(slot: usize, dest: *mut u8, max_len: usize) -> usize;
        fn vpad_gamepad_button_mask(slot: usize) -> u32;
        fn vpad_gamepad_axis(slot: usize, axis: usize) -> i32;
    }

    pub struct DeviceReader;

    impl DeviceReader {
        pub fn new() -> Self {
            DeviceReader
        }

        pub fn read(&mut self, now: f64) -> Vec<GamepadState> {
            let count = unsafe { vpad_gamepad_count() };
            (0..count).map(|slot| read_slot(slot, now)).collect()
        }
    }

    fn read_slot(slot: usize, now: f64) -> GamepadState {
        let len = unsafe { vpad_gamepad_id_len(slot) };
        let mut buf = vec![0u8; len];
        let written = unsafe { vpad_gamepad_copy_id(slot, buf.as_mut_ptr(), len) };
        buf.truncate(written);

        let index = unsafe { vpad_gamepad_index(slot) };
        let mut state = GamepadState::new(String::from_utf8_lossy(&buf), index, now);

        let mask = unsafe { vpad_gamepad_button_mask(slot) };
        for i in 0..BUTTON_COUNT {
            let pressed = (mask & (1 << i)) != 0;
            state.buttons[i] = ButtonState {
                pressed,
                touched: pressed,
                value: if pressed { 1.0 } else { 0.0 },
            };
        }
        for axis in 0..AXIS_COUNT {
            // Plugin scales axes to -10000..10000
            state.axes[axis] = unsafe { vpad_gamepad_axis(slot, axis) } as f32 / 10000.0;
        }
        state
    }
}

// ============================================================================
// Native Implementation (gilrs)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::*;
    use crate::input::gamepad_state::{button, ButtonState};
    use gilrs::{Axis, Button as GilrsButton, Gilrs};
    use macroquad::logging::warn;

    const BUTTONS: [(GilrsButton, usize); 17] = [
        (GilrsButton::South, button::A),
        (GilrsButton::East, button::B),
        (GilrsButton::West, button::X),
        (GilrsButton::North, button::Y),
        (GilrsButton::LeftTrigger, button::LB),
        (GilrsButton::RightTrigger, button::RB),
        (GilrsButton::LeftTrigger2, button::LT),
        (GilrsButton::RightTrigger2, button::RT),
        (GilrsButton::Select, button::SELECT),
        (GilrsButton::Start, button::START),
        (GilrsButton::LeftThumb, button::L3),
        (GilrsButton::RightThumb, button::R3),
        (GilrsButton::DPadUp, button::DPAD_UP),
        (GilrsButton::DPadDown, button::DPAD_DOWN),
        (GilrsButton::DPadLeft, button::DPAD_LEFT),
        (GilrsButton::DPadRight, button::DPAD_RIGHT),
        (GilrsButton::Mode, button::GUIDE),
    ];

    pub struct DeviceReader {
        gilrs: Option<Gilrs>,
    }

    impl DeviceReader {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(g) => Some(g),
                Err(e) => {
                    warn!("Gamepad backend unavailable: {}", e);
                    None
                }
            };
            Self { gilrs }
        }

        pub fn read(&mut self, now: f64) -> Vec<GamepadState> {
            let Some(gilrs) = self.gilrs.as_mut() else { return Vec::new() };
            // Drain events so gilrs updates its cached state
            while gilrs.next_event().is_some() {}

            gilrs
                .gamepads()
                .map(|(id, gp)| {
                    let mut state = GamepadState::new(gp.name(), usize::from(id), now);
                    for (gilrs_button, index) in BUTTONS {
                        let pressed = gp.is_pressed(gilrs_button);
                        state.buttons[index] = ButtonState {
                            pressed,
                            touched: pressed,
                            value: if pressed { 1.0 } else { 0.0 },
                        };
                    }
                    // Web API convention: stick y grows downward
                    state.axes = [
                        gp.value(Axis::LeftStickX),
                        -gp.value(Axis::LeftStickY),
                        gp.value(Axis::RightStickX),
                        -gp.value(Axis::RightStickY),
                    ];
                    state
                })
                .collect()
        }
    }
}

/// Real devices attached to the machine or browser
pub struct PhysicalGamepads {
    /// Opened on first poll
    reader: Option<platform::DeviceReader>,
    pads: Vec<GamepadState>,
    pending: Vec<GamepadEvent>,
}

impl PhysicalGamepads {
    pub fn new() -> Self {
        Self {
            reader: None,
            pads: Vec::new(),
            pending: Vec::new(),
        }
    }
}

impl Default for PhysicalGamepads {
    fn default() -> Self {
        Self::new()
    }
}

/// Connection events between two device lists, keyed by device index
pub fn diff_connections(before: &[GamepadState], after: &[GamepadState]) -> Vec<GamepadEvent> {
    let mut events: Vec<GamepadEvent> = before
        .iter()
        .filter(|old| !after.iter().any(|new| new.index == old.index))
        .map(|old| GamepadEvent::Disconnected(old.index))
        .collect();
    events.extend(
        after
            .iter()
            .filter(|new| !before.iter().any(|old| old.index == new.index))
            .map(|new| GamepadEvent::Connected(new.clone())),
    );
    events
}

/// Keep the previous timestamp of every device whose buttons and axes did not
/// change, so `timestamp` marks the last input change rather than the last read.
pub fn carry_timestamps(before: &[GamepadState], after: &mut [GamepadState]) {
    for new in after.iter_mut() {
        let unchanged = before
            .iter()
            .find(|old| old.index == new.index)
            .filter(|old| old.buttons == new.buttons && old.axes == new.axes);
        if let Some(old) = unchanged {
            new.timestamp = old.timestamp;
        }
    }
}

impl GamepadSource for PhysicalGamepads {
    fn poll(&mut self, now: f64) {
        let reader = self.reader.get_or_insert_with(platform::DeviceReader::new);
        let mut pads = reader.read(now);
        carry_timestamps(&self.pads, &mut pads);
        self.pending.extend(diff_connections(&self.pads, &pads));
        self.pads = pads;
    }

    fn get_gamepads(&self) -> &[GamepadState] {
        &self.pads
    }

    fn take_events(&mut self) -> Vec<GamepadEvent> {
        std::mem::take(&mut self.pending)
    }
}

/// Source picked at startup. Once virtual, physical pads are not consulted.
pub enum GamepadBackend {
    Physical(PhysicalGamepads),
    Virtual(VirtualGamepad),
}

impl GamepadBackend {
    pub fn is_virtual(&self) -> bool {
        matches!(self, GamepadBackend::Virtual(_))
    }

    pub fn virtual_pad(&self) -> Option<&VirtualGamepad> {
        match self {
            GamepadBackend::Virtual(pad) => Some(pad),
            GamepadBackend::Physical(_) => None,
        }
    }

    pub fn virtual_pad_mut(&mut self) -> Option<&mut VirtualGamepad> {
        match self {
            GamepadBackend::Virtual(pad) => Some(pad),
            GamepadBackend::Physical(_) => None,
        }
    }

    pub fn source(&self) -> &dyn GamepadSource {
        match self {
            GamepadBackend::Physical(p) => p,
            GamepadBackend::Virtual(v) => v,
        }
    }

    pub fn source_mut(&mut self) -> &mut dyn GamepadSource {
        match self {
            GamepadBackend::Physical(p) => p,
            GamepadBackend::Virtual(v) => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::gamepad_state::button;
    use crate::input::vpad::VIRTUAL_GAMEPAD_ID;
    use crate::overlay::OverlayRects;
    use macroquad::math::Rect;

    fn pad(index: usize) -> GamepadState {
        GamepadState::new(format!("pad {}", index), index, 0.0)
    }

    #[test]
    fn test_diff_connect_and_disconnect() {
        let events = diff_connections(&[pad(0), pad(1)], &[pad(1), pad(2)]);
        assert_eq!(
            events,
            vec![GamepadEvent::Disconnected(0), GamepadEvent::Connected(pad(2))]
        );
    }

    #[test]
    fn test_diff_unchanged_is_quiet() {
        assert!(diff_connections(&[pad(0)], &[pad(0)]).is_empty());
        assert!(diff_connections(&[], &[]).is_empty());
    }

    #[test]
    fn test_carry_timestamps_only_when_unchanged() {
        let before = vec![pad(0), pad(1)];

        let mut idle = GamepadState::new("pad 0", 0, 500.0);
        let mut pressed = GamepadState::new("pad 1", 1, 500.0);
        pressed.press(button::A);
        let mut stick = GamepadState::new("pad 2", 2, 500.0);
        stick.axes[0] = 0.5;

        let mut after = vec![idle.clone(), pressed, stick];
        carry_timestamps(&before, &mut after);
        assert_eq!(after[0].timestamp, 0.0);
        assert_eq!(after[1].timestamp, 500.0);
        // New device keeps its own reading
        assert_eq!(after[2].timestamp, 500.0);

        idle.axes[1] = -1.0;
        let mut moved = vec![idle];
        carry_timestamps(&before, &mut moved);
        assert_eq!(moved[0].timestamp, 500.0);
    }

    #[test]
    fn test_virtual_backend_ignores_physical_pads() {
        let physical = PhysicalGamepads {
            reader: None,
            pads: vec![pad(0), pad(1), pad(2)],
            pending: Vec::new(),
        };
        assert_eq!(physical.get_gamepads().len(), 3);

        let rects = OverlayRects {
            canvas: Rect::new(0.0, 0.0, 400.0, 640.0),
            cross: Rect::new(0.0, 700.0, 100.0, 100.0),
            button: Rect::new(300.0, 700.0, 100.0, 100.0),
        };
        let mut backend = GamepadBackend::Virtual(VirtualGamepad::new(rects, 0.0));
        backend.source_mut().poll(1.0);

        let pads = backend.source().get_gamepads();
        assert_eq!(pads.len(), 1);
        assert_eq!(pads[0].id, VIRTUAL_GAMEPAD_ID);
        assert_eq!(pads[0].index, 0);
        assert!(backend.virtual_pad().is_some());
    }
}
