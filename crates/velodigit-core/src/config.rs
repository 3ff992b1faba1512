//! Scene configuration.
//!
//! Every field has a default matching the stock overlay, so a config file only
//! needs the fields it changes.

use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::frame::Rgba;

/// 30 fps for 15 seconds.
pub const DEFAULT_FRAMES_PER_LOOP: u32 = 30 * 15;

/// Placement and colour of one labelled readout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    /// Anchor of the label cell, top-left of the first glyph.
    pub position: [f32; 2],
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Period of the animation step counter.
    pub frames_per_loop: u32,
    pub clear_color: Rgba,
    pub clear_depth: f32,
    /// `V = ...` readout.
    pub speed: LabelStyle,
    /// `M = ...` readout.
    pub average_speed: LabelStyle,
    /// Colour restored after the overlay is drawn.
    pub reset_color: Rgba,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            frames_per_loop: DEFAULT_FRAMES_PER_LOOP,
            clear_color: Rgba::TRANSPARENT,
            clear_depth: 1.0,
            speed: LabelStyle {
                position: [0.25, 0.8],
                color: Rgba::RED,
            },
            average_speed: LabelStyle {
                position: [0.25, 0.45],
                color: Rgba::ORANGE,
            },
            reset_color: Rgba::WHITE,
        }
    }
}

impl SceneConfig {
    /// Parse a JSON config. A zero loop period is bumped to 1.
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        let mut config: Self = serde_json::from_str(json)?;
        if config.frames_per_loop == 0 {
            tracing::warn!("frames_per_loop = 0 is invalid, using 1");
            config.frames_per_loop = 1;
        }
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
