//! vpad-player: a game player shell with a touch-driven virtual gamepad
//!
//! On phones and tablets the player can draw a d-pad and four face buttons
//! over the bottom of the screen and feed touches into a synthetic
//! standard-mapping gamepad, so game code written for a controller works
//! unchanged.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod debug;
pub mod device;
pub mod input;
pub mod overlay;
