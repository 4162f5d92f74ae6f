//! Touch-driven virtual gamepad
//!
//! Two circular zones on screen (d-pad bottom-left, face buttons
//! bottom-right) are hit-tested against every active touch and turned into
//! presses on a single standard-mapping gamepad. Game code reads it through
//! [`GamepadSource`] exactly like a physical controller.

use macroquad::math::{Rect, Vec2};
use crate::config::{PlayerConfig, VpadMode};
use crate::device::DeviceInfo;
use crate::overlay::OverlayRects;
use super::gamepad_state::GamepadState;
use super::source::{GamepadEvent, GamepadSource};
use super::touch::{TouchEvent, TouchPolicy};
use super::zone::TouchZone;

/// Device id reported by the virtual pad
pub const VIRTUAL_GAMEPAD_ID: &str = "Virtual Gamepad (touch)";

/// The one virtual gamepad. Created on activation, mutated by touch events,
/// never destroyed.
pub struct VirtualGamepad {
    state: GamepadState,
    dpad: TouchZone,
    face: TouchZone,
    rects: OverlayRects,
    pending: Vec<GamepadEvent>,
}

/// Set up the virtual pad if the config asks for it and the device is a
/// touch-capable mobile. Otherwise returns `None` and touches nothing.
///
/// Zones are captured from the layout at this moment and are not updated on
/// resize or rotation.
pub fn activate(
    config: &PlayerConfig,
    device: &DeviceInfo,
    screen: Rect,
    now: f64,
) -> Option<VirtualGamepad> {
    if config.vpad != VpadMode::Enabled || !device.is_mobile() {
        return None;
    }
    let rects = OverlayRects::compute(screen, &config.layout);
    Some(VirtualGamepad::new(rects, now))
}

impl VirtualGamepad {
    pub fn new(rects: OverlayRects, now: f64) -> Self {
        let state = GamepadState::new(VIRTUAL_GAMEPAD_ID, 0, now);
        let pending = vec![GamepadEvent::Connected(state.clone())];
        Self {
            state,
            dpad: TouchZone::dpad(rects.cross),
            face: TouchZone::face(rects.button),
            rects,
            pending,
        }
    }

    pub fn state(&self) -> &GamepadState {
        &self.state
    }

    pub fn rects(&self) -> &OverlayRects {
        &self.rects
    }

    /// Browser defaults are suppressed for every touch while the pad is up
    pub fn touch_policy(&self) -> TouchPolicy {
        TouchPolicy::All
    }

    /// Touch start and touch move: recompute every button from scratch
    pub fn on_touch_start(&mut self, points: &[Vec2], now: f64) {
        self.state.release_all();
        for &point in points {
            for zone in [&self.dpad, &self.face] {
                for index in zone.buttons_at(point) {
                    self.state.press(index);
                }
            }
        }
        self.state.timestamp = now;
    }

    /// Any finger lifting releases everything, even with other fingers down
    pub fn on_touch_end(&mut self, now: f64) {
        self.state.release_all();
        self.state.timestamp = now;
    }

    pub fn handle(&mut self, event: &TouchEvent, now: f64) {
        match event {
            TouchEvent::Start(points) | TouchEvent::Move(points) => self.on_touch_start(points, now),
            TouchEvent::End => self.on_touch_end(now),
        }
    }
}

impl GamepadSource for VirtualGamepad {
    fn poll(&mut self, _now: f64) {
        // State only changes through touch events
    }

    fn get_gamepads(&self) -> &[GamepadState] {
        std::slice::from_ref(&self.state)
    }

    fn take_events(&mut self) -> Vec<GamepadEvent> {
        std::mem::take(&mut self.pending)
    }
}
