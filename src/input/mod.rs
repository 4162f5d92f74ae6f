//! Input handling with gamepad support
//!
//! Provides an action-based input system that works with both the keyboard
//! and a gamepad. The gamepad is either a physical controller or, on touch
//! devices with the virtual pad enabled, a synthetic one driven by touches.
//!
//! Native: Uses gilrs crate for physical gamepads
//! WASM: Uses the Web Gamepad API through the vpad JS plugin

mod actions;
mod gamepad_state;
mod source;
mod state;
mod touch;
mod vpad;
mod zone;

pub use actions::Action;
pub use gamepad_state::{button, ButtonState, GamepadMapping, GamepadState, AXIS_COUNT, BUTTON_COUNT};
pub use source::{carry_timestamps, diff_connections, GamepadBackend, GamepadEvent, GamepadSource, PhysicalGamepads};
pub use state::{apply_deadzone, now_ms, InputState};
pub use touch::{to_logical, translate, TouchEvent, TouchPolicy};
pub use vpad::{activate, VirtualGamepad, VIRTUAL_GAMEPAD_ID};
pub use zone::{Arc, Sector, TouchZone, DPAD_SECTORS, FACE_SECTORS};
