//! Editor configuration.
//!
//! All sizes are in CSS pixels of the editor surface unless noted otherwise.
//! Hosts can pass a partial config object; any missing field falls back to
//! its default.

use std::f64::consts::FRAC_PI_4;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::MIN_CROP_SIZE;

/// Tunable parameters for [`HotspotEditor`](crate::HotspotEditor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Space kept free around the image for handles to overhang
    pub margin_px: f64,
    /// Side length of each crop handle's square hit target
    pub crop_handle_hit_size: f64,
    /// Visual radius of the hotspot resize handle
    pub hotspot_handle_radius: f64,
    /// Hit radius of the hotspot resize handle (larger than the visual)
    pub hotspot_handle_hit_radius: f64,
    /// Where the hotspot handle sits on the ellipse, in radians (y down)
    pub hotspot_handle_angle: f64,
    /// Distance moved by one arrow key press
    pub keyboard_step_px: f64,
    /// Step multiplier while Shift is held
    pub shift_multiplier: f64,
    /// Keyboard inactivity before a keyboard edit is committed
    pub commit_debounce_ms: u32,
    /// Smallest crop size as a fraction of the image dimension
    pub min_crop_size: f64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            margin_px: 8.0,
            crop_handle_hit_size: 20.0,
            hotspot_handle_radius: 5.0,
            hotspot_handle_hit_radius: 12.0,
            hotspot_handle_angle: FRAC_PI_4,
            keyboard_step_px: 1.0,
            shift_multiplier: 5.0,
            commit_debounce_ms: 300,
            min_crop_size: MIN_CROP_SIZE,
        }
    }
}

impl ToolConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyboard commit debounce as a `Duration`.
    pub fn commit_debounce(&self) -> Duration {
        Duration::from_millis(u64::from(self.commit_debounce_ms))
    }
}
