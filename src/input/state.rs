//! Input state management
//!
//! Polls the keyboard (macroquad) and the configured gamepad source,
//! combining them into a unified action-based API.

use macroquad::prelude::*;
use macroquad::logging::info;
use super::source::{GamepadBackend, GamepadEvent, GamepadSource, PhysicalGamepads};
use super::touch::{to_logical, translate, TouchPolicy};
use super::vpad::VirtualGamepad;
use super::Action;

/// Milliseconds since the Unix epoch, the unit of gamepad timestamps
pub fn now_ms() -> f64 {
    macroquad::miniquad::date::now() * 1000.0
}

/// Unified input state that handles both keyboard and gamepad
pub struct InputState {
    backend: GamepadBackend,
    /// Analog stick deadzone (0.0-1.0)
    pub stick_deadzone: f32,
    mask: u32,
    last_mask: u32,
}

impl InputState {
    /// Use the virtual pad when one was activated, physical devices otherwise
    pub fn new(vpad: Option<VirtualGamepad>, stick_deadzone: f32) -> Self {
        let backend = match vpad {
            Some(pad) => GamepadBackend::Virtual(pad),
            None => GamepadBackend::Physical(PhysicalGamepads::new()),
        };
        Self::with_backend(backend, stick_deadzone)
    }

    pub fn with_backend(backend: GamepadBackend, stick_deadzone: f32) -> Self {
        Self {
            backend,
            stick_deadzone,
            mask: 0,
            last_mask: 0,
        }
    }

    /// Call once per frame before checking actions
    pub fn poll(&mut self) {
        // macroquad reports touches in framebuffer pixels; zones are laid out
        // in screen_width()/screen_height() units
        let touches = to_logical(&touches(), screen_dpi_scale());
        self.poll_with(&touches, now_ms());
    }

    /// Poll with an explicit frame of touches (logical pixels) and clock reading
    pub fn poll_with(&mut self, touches: &[Touch], now: f64) {
        if let Some(pad) = self.backend.virtual_pad_mut() {
            for event in translate(touches) {
                pad.handle(&event, now);
            }
        }

        let source = self.backend.source_mut();
        source.poll(now);
        for event in source.take_events() {
            match event {
                GamepadEvent::Connected(gp) => info!("Connected: {}", gp.id),
                GamepadEvent::Disconnected(index) => info!("Disconnected: gamepad {}", index),
            }
        }

        self.last_mask = self.mask;
        self.mask = self.gamepad_mask();
    }

    /// Buttons held on the first gamepad
    fn gamepad_mask(&self) -> u32 {
        self.backend
            .source()
            .get_gamepads()
            .first()
            .map_or(0, |gp| gp.button_mask())
    }

    /// The gamepad query handed to game code
    pub fn gamepads(&self) -> &dyn GamepadSource {
        self.backend.source()
    }

    pub fn backend(&self) -> &GamepadBackend {
        &self.backend
    }

    pub fn virtual_pad(&self) -> Option<&VirtualGamepad> {
        self.backend.virtual_pad()
    }

    pub fn touch_policy(&self) -> TouchPolicy {
        self.virtual_pad().map_or(TouchPolicy::PageDefault, |p| p.touch_policy())
    }

    pub fn has_gamepad(&self) -> bool {
        !self.gamepads().get_gamepads().is_empty()
    }

    /// Check if action is currently held down
    pub fn action_down(&self, action: Action) -> bool {
        self.gamepad_down(action) || action.keys().iter().any(|&k| is_key_down(k))
    }

    /// Check if action was just pressed this frame
    pub fn action_pressed(&self, action: Action) -> bool {
        self.gamepad_pressed(action) || action.keys().iter().any(|&k| is_key_pressed(k))
    }

    fn gamepad_down(&self, action: Action) -> bool {
        (self.mask & (1 << action.button())) != 0
    }

    fn gamepad_pressed(&self, action: Action) -> bool {
        let bit = 1 << action.button();
        (self.mask & bit) != 0 && (self.last_mask & bit) == 0
    }

    /// Left stick as Vec2, y up. Keyboard arrows win over a smaller stick deflection.
    pub fn left_stick(&self) -> Vec2 {
        let mut result = Vec2::ZERO;
        if is_key_down(KeyCode::Up) { result.y += 1.0; }
        if is_key_down(KeyCode::Down) { result.y -= 1.0; }
        if is_key_down(KeyCode::Left) { result.x -= 1.0; }
        if is_key_down(KeyCode::Right) { result.x += 1.0; }

        let stick = self.gamepad_stick();
        if stick.length() > result.length() {
            result = stick;
        }
        if result.length() > 1.0 {
            result = result.normalize();
        }
        result
    }

    fn gamepad_stick(&self) -> Vec2 {
        match self.gamepads().get_gamepads().first() {
            // Axes follow the Web API (y down), flip for game space
            Some(gp) => apply_deadzone(gp.axes[0], -gp.axes[1], self.stick_deadzone),
            None => Vec2::ZERO,
        }
    }
}

/// Apply radial deadzone with linear rescaling
pub fn apply_deadzone(x: f32, y: f32, deadzone: f32) -> Vec2 {
    let len = (x * x + y * y).sqrt();
    if len < deadzone || len == 0.0 {
        return Vec2::ZERO;
    }
    // Rescale from deadzone..1.0 to 0.0..1.0
    let scale = (len - deadzone) / (1.0 - deadzone) / len;
    Vec2::new(x * scale, y * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::vpad::VIRTUAL_GAMEPAD_ID;
    use crate::overlay::OverlayRects;

    fn virtual_input() -> InputState {
        let rects = OverlayRects {
            canvas: Rect::new(0.0, 0.0, 400.0, 640.0),
            cross: Rect::new(0.0, 700.0, 100.0, 100.0),
            button: Rect::new(300.0, 700.0, 100.0, 100.0),
        };
        InputState::new(Some(VirtualGamepad::new(rects, 0.0)), 0.15)
    }

    fn touch(id: u64, phase: TouchPhase, x: f32, y: f32) -> Touch {
        Touch { id, phase, position: vec2(x, y) }
    }

    #[test]
    fn test_virtual_backend_is_the_only_device() {
        let input = virtual_input();
        assert!(input.backend().is_virtual());
        assert!(input.has_gamepad());
        assert_eq!(input.gamepads().get_gamepads().len(), 1);
        assert_eq!(input.gamepads().get_gamepads()[0].id, VIRTUAL_GAMEPAD_ID);
        assert_eq!(input.touch_policy(), TouchPolicy::All);
    }

    #[test]
    fn test_touch_drives_actions_with_edges() {
        let mut input = virtual_input();
        // Up on the d-pad
        input.poll_with(&[touch(1, TouchPhase::Started, 50.0, 710.0)], 1.0);
        assert!(input.gamepad_down(Action::Up));
        assert!(input.gamepad_pressed(Action::Up));

        // Held: still down, no longer a fresh press
        input.poll_with(&[touch(1, TouchPhase::Stationary, 50.0, 710.0)], 2.0);
        assert!(input.gamepad_down(Action::Up));
        assert!(!input.gamepad_pressed(Action::Up));

        // Lift clears it
        input.poll_with(&[touch(1, TouchPhase::Ended, 50.0, 710.0)], 3.0);
        assert!(!input.gamepad_down(Action::Up));
        assert_eq!(input.gamepads().get_gamepads()[0].timestamp, 3.0);
    }

    #[test]
    fn test_second_finger_lifting_clears_all() {
        let mut input = virtual_input();
        input.poll_with(
            &[
                touch(1, TouchPhase::Started, 50.0, 790.0),  // d-pad down
                touch(2, TouchPhase::Started, 390.0, 750.0), // B
            ],
            1.0,
        );
        assert!(input.gamepad_down(Action::Down));
        assert!(input.gamepad_down(Action::B));

        input.poll_with(
            &[
                touch(1, TouchPhase::Stationary, 50.0, 790.0),
                touch(2, TouchPhase::Ended, 390.0, 750.0),
            ],
            2.0,
        );
        assert!(!input.gamepad_down(Action::Down));
        assert!(!input.gamepad_down(Action::B));
    }

    #[test]
    fn test_high_dpi_touch_presses_up() {
        // 400x800 logical screen at dpi 2, default 98px pad with 16px margin
        let rects = OverlayRects {
            canvas: Rect::new(0.0, 0.0, 400.0, 640.0),
            cross: Rect::new(16.0, 686.0, 98.0, 98.0),
            button: Rect::new(286.0, 686.0, 98.0, 98.0),
        };
        let mut input = InputState::new(Some(VirtualGamepad::new(rects, 0.0)), 0.15);

        let physical = [touch(1, TouchPhase::Started, 130.0, 1391.6)];
        input.poll_with(&to_logical(&physical, 2.0), 1.0);
        assert!(input.gamepad_down(Action::Up));
        assert!(!input.gamepad_down(Action::Down));

        // Fed unconverted, the same touch lands far outside the cross
        let mut raw = InputState::new(Some(VirtualGamepad::new(rects, 0.0)), 0.15);
        raw.poll_with(&physical, 1.0);
        assert_eq!(raw.gamepad_mask(), 0);
    }

    #[test]
    fn test_physical_backend_has_page_default_policy() {
        let input = InputState::with_backend(
            GamepadBackend::Physical(PhysicalGamepads::default()),
            0.15,
        );
        assert_eq!(input.touch_policy(), TouchPolicy::PageDefault);
        assert!(!input.backend().is_virtual());
    }

    #[test]
    fn test_deadzone() {
        assert_eq!(apply_deadzone(0.1, 0.0, 0.15), Vec2::ZERO);
        assert_eq!(apply_deadzone(0.0, 0.0, 0.0), Vec2::ZERO);
        let full = apply_deadzone(1.0, 0.0, 0.15);
        assert!((full.x - 1.0).abs() < 1e-6);
    }
}
