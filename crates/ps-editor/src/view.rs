//! Render description handed to the presentational layer.
//!
//! A `TileView` is everything the host needs to draw one tile: which image
//! sits underneath, and which animated layers are mounted with their
//! geometry and tweens. Tweens are sampled against the time since the layer
//! appeared; `exit` tweens play when a layer disappears.

use crate::tile::SwappableTile;
use ps_core::geometry::{self, MaskGeometry};
use ps_core::{Easing, ImageId, ImageState, Point, Size, SwapConfig, Transition, Tween};
use serde::Serialize;

/// Ripple at the press point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RippleLayer {
    pub origin: Point,
    pub diameter: f64,
    pub scale: Tween<f64>,
    pub opacity: Tween<f64>,
    pub exit_opacity: Tween<f64>,
}

/// Circular avatar of the tile's own image, scaling in under the pointer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PressAvatarLayer {
    pub image: ImageId,
    pub origin: Point,
    pub diameter: f64,
    pub border_width: f64,
    pub scale: Tween<f64>,
    pub exit_scale: Tween<f64>,
    /// The native drag image takes over once dragging.
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PressLayer {
    pub ripple: RippleLayer,
    pub avatar: PressAvatarLayer,
}

/// Translucent highlight while a drag hovers the tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayLayer {
    pub opacity: Tween<f64>,
    pub exit_opacity: Tween<f64>,
}

/// Drop-target animation: avatar glides to center, then a circular mask
/// grows from it to uncover the incoming image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementLayer {
    pub image: ImageId,
    pub avatar_diameter: f64,
    pub border_width: f64,
    pub avatar_position: Tween<Point>,
    pub avatar_hidden: bool,
    /// The mask is not mounted until the avatar reaches the center.
    pub mask_delay_ms: u32,
    pub mask_start: MaskGeometry,
    pub mask_end: MaskGeometry,
    pub mask_diameter: Tween<f64>,
    pub mask_origin: Tween<Point>,
}

/// Drag-source animation: the incoming image fades in over a white backdrop.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FadeLayer {
    pub image: ImageId,
    pub opacity: Tween<f64>,
    pub backdrop_opacity: Tween<f64>,
}

/// Full description of one tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileView {
    pub base_image: ImageId,
    pub size: Size,
    pub draggable: bool,
    pub press: Option<PressLayer>,
    pub overlay: Option<OverlayLayer>,
    pub replacement: Option<ReplacementLayer>,
    pub fade: Option<FadeLayer>,
}

impl TileView {
    pub fn build(
        state: &ImageState,
        tile: &SwappableTile,
        size: Size,
        config: &SwapConfig,
    ) -> Self {
        let overlay = tile.overlay_visible().then(|| overlay_layer(config));

        match *state {
            ImageState::Default { image } => Self {
                base_image: image,
                size,
                draggable: true,
                press: tile.armed().map(|armed| PressLayer {
                    ripple: RippleLayer {
                        origin: armed.ripple.origin,
                        diameter: armed.ripple.diameter,
                        scale: Tween::new(
                            0.0,
                            config.ripple_scale,
                            Transition::new(config.ripple_grow_ms, Easing::EaseInOut),
                        ),
                        opacity: Tween::new(
                            1.0,
                            0.5,
                            Transition::new(config.ripple_grow_ms, Easing::EaseInOut),
                        ),
                        exit_opacity: Tween::new(
                            0.5,
                            0.0,
                            Transition::new(config.ripple_fade_ms, Easing::EaseInOut),
                        ),
                    },
                    avatar: PressAvatarLayer {
                        image,
                        origin: armed.avatar_origin,
                        diameter: config.avatar_diameter,
                        border_width: config.border_width,
                        scale: Tween::new(
                            0.0,
                            1.0,
                            Transition::new(config.avatar_scale_in_ms, Easing::EaseInOut),
                        ),
                        exit_scale: Tween::new(
                            1.0,
                            0.0,
                            Transition::new(config.avatar_scale_in_ms, Easing::EaseInOut),
                        ),
                        hidden: tile.is_dragging(),
                    },
                }),
                overlay,
                replacement: None,
                fade: None,
            },
            ImageState::ReplacingRipple {
                original,
                replacement,
                drop_x,
                drop_y,
            } => {
                let travel = geometry::move_to_center(
                    Point::new(drop_x, drop_y),
                    size,
                    config.avatar_diameter,
                );
                let mask_start = geometry::mask_start(size, config.avatar_diameter);
                let mask_end = geometry::reveal_mask(size, config.border_width);
                let reveal = Transition::new(config.mask_reveal_ms(), Easing::EaseInOut)
                    .delayed(config.move_to_center_ms);

                Self {
                    base_image: original,
                    size,
                    draggable: false,
                    press: None,
                    overlay,
                    replacement: Some(ReplacementLayer {
                        image: replacement,
                        avatar_diameter: config.avatar_diameter,
                        border_width: config.border_width,
                        avatar_position: Tween::new(
                            travel.start,
                            travel.end,
                            Transition::new(config.move_to_center_ms, Easing::EaseInOut),
                        ),
                        avatar_hidden: tile.is_dragging(),
                        mask_delay_ms: config.move_to_center_ms,
                        mask_start,
                        mask_end,
                        mask_diameter: Tween::new(mask_start.diameter, mask_end.diameter, reveal),
                        mask_origin: Tween::new(mask_start.origin(), mask_end.origin(), reveal),
                    }),
                    fade: None,
                }
            }
            ImageState::ReplacingFade {
                original,
                replacement,
            } => {
                let fade_in = Transition::new(config.swap_duration_ms, Easing::EaseInOut);
                Self {
                    base_image: original,
                    size,
                    draggable: false,
                    press: None,
                    overlay,
                    replacement: None,
                    fade: Some(FadeLayer {
                        image: replacement,
                        opacity: Tween::new(0.0, 1.0, fade_in),
                        backdrop_opacity: Tween::new(0.0, 1.0, fade_in),
                    }),
                }
            }
        }
    }
}

fn overlay_layer(config: &SwapConfig) -> OverlayLayer {
    OverlayLayer {
        opacity: Tween::new(
            0.0,
            config.overlay_opacity,
            Transition::new(config.overlay_fade_in_ms, Easing::EaseInOut),
        ),
        exit_opacity: Tween::new(
            config.overlay_opacity,
            0.0,
            Transition::new(config.overlay_fade_out_ms, Easing::EaseInOut),
        ),
    }
}
