//! Tunable constants for the swap interaction and its animations.
//!
//! Every size is in CSS pixels and every duration in milliseconds. The host
//! can override any subset from JSON; missing fields fall back to defaults.

use crate::error::SwapError;
use serde::{Deserialize, Serialize};

/// Configuration for the swap engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SwapConfig {
    /// Diameter of the circular drag avatar. Default: **60**.
    pub avatar_diameter: f64,

    /// Stroke width of the white circular border around avatar and mask. Default: **4**.
    pub border_width: f64,

    /// Total swap animation, from drop to commit. Default: **500**.
    pub swap_duration_ms: u32,

    /// Time for the avatar to travel from drop point to tile center.
    /// The mask reveal starts after this. Default: **150**.
    pub move_to_center_ms: u32,

    /// Press avatar scale-in. Default: **200**.
    pub avatar_scale_in_ms: u32,

    /// Ripple growth on press. Default: **150**.
    pub ripple_grow_ms: u32,

    /// Ripple fade-out on release. Default: **100**.
    pub ripple_fade_ms: u32,

    /// Final ripple scale relative to its diameter. Default: **4**.
    pub ripple_scale: f64,

    /// Drag-over overlay fade-in / fade-out. Defaults: **200** / **100**.
    pub overlay_fade_in_ms: u32,
    pub overlay_fade_out_ms: u32,

    /// Drag-over overlay peak opacity. Default: **0.5**.
    pub overlay_opacity: f64,

    /// Tile size used by the page layout. Defaults: **270 × 151**.
    pub tile_width: f64,
    pub tile_height: f64,

    /// Maximum undo depth for committed swaps. Default: **100**.
    pub history_depth: usize,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            avatar_diameter: 60.0,
            border_width: 4.0,
            swap_duration_ms: 500,
            move_to_center_ms: 150,
            avatar_scale_in_ms: 200,
            ripple_grow_ms: 150,
            ripple_fade_ms: 100,
            ripple_scale: 4.0,
            overlay_fade_in_ms: 200,
            overlay_fade_out_ms: 100,
            overlay_opacity: 0.5,
            tile_width: 270.0,
            tile_height: 151.0,
            history_depth: 100,
        }
    }
}

impl SwapConfig {
    /// Parse a (possibly partial) JSON object and validate it.
    pub fn from_json(json: &str) -> Result<Self, SwapError> {
        let config: SwapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    /// `SwapError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), SwapError> {
        let positive = [
            ("avatarDiameter", self.avatar_diameter),
            ("rippleScale", self.ripple_scale),
            ("tileWidth", self.tile_width),
            ("tileHeight", self.tile_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SwapError::InvalidConfig(format!(
                    "`{name}` must be a positive number, got {value}"
                )));
            }
        }
        if !(self.border_width.is_finite() && self.border_width >= 0.0) {
            return Err(SwapError::InvalidConfig(format!(
                "`borderWidth` must be non-negative, got {}",
                self.border_width
            )));
        }
        if !(0.0..=1.0).contains(&self.overlay_opacity) {
            return Err(SwapError::InvalidConfig(format!(
                "`overlayOpacity` must be within 0..=1, got {}",
                self.overlay_opacity
            )));
        }
        if self.move_to_center_ms > self.swap_duration_ms {
            return Err(SwapError::InvalidConfig(format!(
                "`moveToCenterMs` ({}) exceeds `swapDurationMs` ({})",
                self.move_to_center_ms, self.swap_duration_ms
            )));
        }
        Ok(())
    }

    /// Extra mask diameter so the border stroke never clips the tile corners.
    pub fn border_compensation(&self) -> f64 {
        self.border_width * 2.0
    }

    /// Duration of the mask reveal, which starts after the move-to-center.
    pub fn mask_reveal_ms(&self) -> u32 {
        self.swap_duration_ms.saturating_sub(self.move_to_center_ms)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
