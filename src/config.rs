//! Player configuration
//!
//! One typed struct, filled either from a RON file or from HTML-style
//! `name=value` attributes, and validated once when it is built.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Default config file looked up next to the binary / page
pub const CONFIG_FILE: &str = "vpad.ron";

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    UnknownAttribute(String),
    InvalidValue { name: String, value: String },
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::UnknownAttribute(name) => write!(f, "Unknown attribute: {}", name),
            ConfigError::InvalidValue { name, value } => {
                write!(f, "Invalid value for {}: {:?}", name, value)
            }
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Whether the on-screen gamepad may be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VpadMode {
    Enabled,
    #[default]
    Disabled,
}

impl FromStr for VpadMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enabled" => Ok(VpadMode::Enabled),
            "disabled" => Ok(VpadMode::Disabled),
            other => Err(ConfigError::InvalidValue {
                name: "vpad".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Placement of the on-screen controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Width and height of each control image in pixels
    pub pad_size: f32,
    /// Gap between a control and the screen edges
    pub margin: f32,
    /// Fraction of the screen height left to the game canvas
    pub canvas_ratio: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            pad_size: 98.0,
            margin: 16.0,
            canvas_ratio: 0.8,
        }
    }
}

/// Image paths for the on-screen controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayAssets {
    pub cross: String,
    pub button: String,
}

impl Default for OverlayAssets {
    fn default() -> Self {
        Self {
            cross: "assets/vpad/vpad_cross_98x98.png".to_string(),
            button: "assets/vpad/vpad_button_98x98.png".to_string(),
        }
    }
}

/// Everything the player needs to know before the first frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub title: String,
    pub vpad: VpadMode,
    /// Radial deadzone for physical analog sticks (0.0-1.0)
    pub stick_deadzone: f32,
    pub layout: OverlayConfig,
    pub assets: OverlayAssets,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            title: "vpad-player".to_string(),
            vpad: VpadMode::Disabled,
            stick_deadzone: 0.15,
            layout: OverlayConfig::default(),
            assets: OverlayAssets::default(),
        }
    }
}

fn parse_f32(name: &str, value: &str) -> Result<f32, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}

impl PlayerConfig {
    /// Parse a RON document. Missing fields take their defaults.
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and parse a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)?;
        Self::from_ron(&source)
    }

    /// Build from `(name, value)` attribute pairs, starting from the defaults
    pub fn from_attributes<'a, I>(attributes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        for (name, value) in attributes {
            match name {
                "title" => config.title = value.to_string(),
                "vpad" => config.vpad = value.parse()?,
                "stick-deadzone" => config.stick_deadzone = parse_f32(name, value)?,
                "pad-size" => config.layout.pad_size = parse_f32(name, value)?,
                "margin" => config.layout.margin = parse_f32(name, value)?,
                "canvas-ratio" => config.layout.canvas_ratio = parse_f32(name, value)?,
                "cross-image" => config.assets.cross = value.to_string(),
                "button-image" => config.assets.button = value.to_string(),
                other => return Err(ConfigError::UnknownAttribute(other.to_string())),
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Build from `name=value` arguments, e.g. the process command line
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, ConfigError> {
        let args: Vec<String> = args.into_iter().collect();
        let mut pairs = Vec::with_capacity(args.len());
        for arg in &args {
            match arg.split_once('=') {
                Some((name, value)) => pairs.push((name, value)),
                None => return Err(ConfigError::InvalidValue {
                    name: arg.clone(),
                    value: String::new(),
                }),
            }
        }
        Self::from_attributes(pairs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        if !(layout.canvas_ratio > 0.0 && layout.canvas_ratio <= 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "canvas_ratio {} must be in (0, 1]",
                layout.canvas_ratio
            )));
        }
        if !layout.pad_size.is_finite() || layout.pad_size <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "pad_size {} must be positive",
                layout.pad_size
            )));
        }
        if !layout.margin.is_finite() || layout.margin < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "margin {} must not be negative",
                layout.margin
            )));
        }
        if !(self.stick_deadzone >= 0.0 && self.stick_deadzone < 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "stick_deadzone {} must be in [0, 1)",
                self.stick_deadzone
            )));
        }
        Ok(())
    }
}
