//! Serialized description of a rating control.
//!
//! A `RatingConfig` is the second construction path for [`RatingWidget`]:
//! a host can ship a JSON layout description instead of calling every
//! setter by hand. Missing fields fall back to the control's defaults.
//!
//! [`RatingWidget`]: crate::widget::RatingWidget

use crate::color::SerializableColor;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Every user-facing property of the rating control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Number of stars, also the maximum value.
    pub star_count: usize,
    /// Lowest value a gesture can produce.
    pub minimum_value: f64,
    /// Current value.
    pub value: f64,
    /// Gap between stars and at both row ends.
    pub spacing: f64,
    pub allows_half_stars: bool,
    pub read_only: bool,
    pub show_value_label: bool,
    pub normal_color: SerializableColor,
    pub accent_color: SerializableColor,
    /// Fixed width of the numeric readout.
    pub label_width: f64,
    /// Control bounds. `None` uses the intrinsic size.
    pub frame: Option<Size>,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            star_count: 5,
            minimum_value: 1.0,
            value: 0.0,
            spacing: 5.0,
            allows_half_stars: false,
            read_only: false,
            show_value_label: false,
            normal_color: SerializableColor::normal(),
            accent_color: SerializableColor::accent(),
            label_width: 50.0,
            frame: None,
        }
    }
}

impl RatingConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json).map_err(|e| match e {
            ConfigError::Parse(msg) => {
                ConfigError::Parse(format!("Failed to parse {}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Write the configuration to a file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let json = self.to_json()?;
        fs::write(path, json)
            .map_err(|e| ConfigError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }
}
