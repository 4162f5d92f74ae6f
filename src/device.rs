//! Host device detection
//!
//! WASM: asks the page through the `vpad` JS plugin (web/vpad_plugin.js)
//! Native: Android builds report a phone, everything else a desktop

use crate::input::TouchPolicy;

/// What the player knows about the device it runs on
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceInfo {
    pub user_agent: String,
    /// Whether the page exposes touch-end events (`"ontouchend" in document`)
    pub touch_end_supported: bool,
}

impl DeviceInfo {
    pub fn new(user_agent: impl Into<String>, touch_end_supported: bool) -> Self {
        Self {
            user_agent: user_agent.into(),
            touch_end_supported,
        }
    }

    /// Touch-capable mobile device.
    ///
    /// iPadOS reports a desktop Safari user agent, so "macintosh" only counts
    /// when touch events exist.
    pub fn is_mobile(&self) -> bool {
        let ua = self.user_agent.to_lowercase();
        ua.contains("iphone")
            || ua.contains("ipad")
            || ua.contains("android")
            || (ua.contains("macintosh") && self.touch_end_supported)
    }
}

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::*;

    extern "C" {
        fn vpad_user_agent_len() -> usize;
        fn vpad_copy_user_agent(dest: *mut u8, max_len: usize) -> usize;
        fn vpad_has_touch_end() -> i32;
        fn vpad_set_touch_policy(suppress_all: i32);
    }

    pub fn detect() -> DeviceInfo {
        let len = unsafe { vpad_user_agent_len() };
        let mut buf = vec![0u8; len];
        let written = unsafe { vpad_copy_user_agent(buf.as_mut_ptr(), len) };
        buf.truncate(written);
        DeviceInfo {
            user_agent: String::from_utf8_lossy(&buf).into_owned(),
            touch_end_supported: unsafe { vpad_has_touch_end() } != 0,
        }
    }

    pub fn apply_touch_policy(policy: TouchPolicy) {
        unsafe { vpad_set_touch_policy(policy.suppress_all_flag()) }
    }
}

#[cfg(all(not(target_arch = "wasm32"), target_os = "android"))]
mod platform {
    use super::*;

    pub fn detect() -> DeviceInfo {
        DeviceInfo::new("Android", true)
    }

    pub fn apply_touch_policy(_policy: TouchPolicy) {
        // No browser defaults to suppress outside a page
    }
}

#[cfg(all(not(target_arch = "wasm32"), not(target_os = "android")))]
mod platform {
    use super::*;

    pub fn detect() -> DeviceInfo {
        DeviceInfo::new(std::env::consts::OS, false)
    }

    pub fn apply_touch_policy(_policy: TouchPolicy) {}
}

pub use platform::{apply_touch_policy, detect};
