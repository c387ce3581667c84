//! Per-tile interaction state machine.
//!
//! A `SwappableTile` turns normalized `TileEvent`s into a few orthogonal
//! flags plus `TileEffect`s for the host to carry out. It holds no opinion
//! about which image it shows; that arrives as the derived `ImageState` on
//! every call.
//!
//! | Flag        | Set by                          | Cleared by                        |
//! |-------------|---------------------------------|-----------------------------------|
//! | `armed`     | primary press on a default tile | pointer-up, drag-end, drag-exit   |
//! | `dragging`  | drag-start on a default tile    | drag-end, drag-exit               |
//! | `drag_over` | drag-enter                      | drag-leave, drop, drag-end/exit   |
//!
//! `armed` and `drag_over` may both be set on the source tile while the drag
//! passes over it; the overlay is only shown when the tile is not armed.

use crate::input::{PointerButton, TileEvent};
use crate::layout::TileLayout;
use ps_core::geometry::{self, RippleGeometry};
use ps_core::{DropInfo, ImageId, ImageState, Point, SwapConfig};
use serde::Serialize;

/// MIME type of the drag payload (the dragged tile's image identifier).
pub const DRAG_PAYLOAD_MIME: &str = "text/plain";

/// Geometry captured at press time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGeometry {
    /// Press position, client coordinates.
    pub pointer: Point,
    /// Tile top-left at press time.
    pub offset: Point,
    pub ripple: RippleGeometry,
    /// Top-left of the press avatar, tile-relative.
    pub avatar_origin: Point,
}

/// Side effects the host must perform on the native drag session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TileEffect {
    /// `dataTransfer.clearData()`.
    ClearPayload,
    /// `dataTransfer.setData(mime, image)`.
    SetPayload { mime: &'static str, image: ImageId },
    /// `dataTransfer.setDragImage(..)` with the circular avatar of `image`.
    SetDragAvatar { image: ImageId, hotspot: Point },
    /// Move the native drag-avatar element back off screen.
    HideDragAvatar,
    /// `preventDefault()` on dragover so the tile is a valid drop zone.
    AcceptDrop,
    /// Report a drop to the page.
    Dropped(DropInfo),
}

/// Interaction state of one tile.
#[derive(Debug, Clone, Default)]
pub struct SwappableTile {
    armed: Option<DragGeometry>,
    dragging: bool,
    drag_over: bool,
}

impl SwappableTile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn armed(&self) -> Option<&DragGeometry> {
        self.armed.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    /// The hover overlay is subordinate to the press ripple.
    pub fn overlay_visible(&self) -> bool {
        self.drag_over && self.armed.is_none()
    }

    /// Drop every transient flag. Single cancellation path for drag state.
    pub fn reset(&mut self) {
        self.armed = None;
        self.dragging = false;
        self.drag_over = false;
    }

    /// Handle one event against the tile's current derived state.
    pub fn handle(
        &mut self,
        event: &TileEvent,
        state: &ImageState,
        layout: &dyn TileLayout,
        config: &SwapConfig,
    ) -> Vec<TileEffect> {
        match event {
            TileEvent::PointerDown { x, y, button } => {
                if *button != PointerButton::Primary {
                    return vec![];
                }
                match state {
                    ImageState::Default { image } => {
                        let pointer = Point::new(*x, *y);
                        let offset = layout.offset();
                        self.armed = Some(DragGeometry {
                            pointer,
                            offset,
                            ripple: geometry::ripple_at(pointer, offset, layout.size()),
                            avatar_origin: geometry::avatar_press_origin(
                                pointer,
                                offset,
                                config.avatar_diameter,
                            ),
                        });
                        log::debug!("tile {image}: armed at ({x}, {y})");
                    }
                    ImageState::ReplacingRipple { .. } | ImageState::ReplacingFade { .. } => {}
                }
                vec![]
            }
            TileEvent::PointerUp { .. } => {
                self.armed = None;
                vec![TileEffect::HideDragAvatar]
            }
            TileEvent::DragStart => match state {
                ImageState::Default { image } => {
                    self.dragging = true;
                    log::debug!("tile {image}: drag started");
                    let half = config.avatar_diameter / 2.0;
                    vec![
                        TileEffect::ClearPayload,
                        TileEffect::SetDragAvatar {
                            image: *image,
                            hotspot: Point::new(half, half),
                        },
                        TileEffect::SetPayload {
                            mime: DRAG_PAYLOAD_MIME,
                            image: *image,
                        },
                    ]
                }
                ImageState::ReplacingRipple { .. } | ImageState::ReplacingFade { .. } => vec![],
            },
            TileEvent::DragEnter => {
                self.drag_over = true;
                vec![]
            }
            TileEvent::DragLeave => {
                self.drag_over = false;
                vec![]
            }
            TileEvent::DragOver => vec![TileEffect::AcceptDrop],
            TileEvent::Drop { x, y, payload } => {
                self.drag_over = false;
                let own = match state {
                    ImageState::Default { image } => *image,
                    ImageState::ReplacingRipple { .. } | ImageState::ReplacingFade { .. } => {
                        log::debug!("drop ignored: tile is mid-swap");
                        return vec![];
                    }
                };
                let Some(payload) = payload.as_deref() else {
                    return vec![];
                };

                // A payload that was never interned cannot name a tile.
                let Some(incoming) = ImageId::lookup(payload) else {
                    log::debug!("tile {own}: drop ignored, foreign payload {payload:?}");
                    return vec![];
                };
                if incoming == own {
                    log::debug!("tile {own}: self-drop ignored");
                    return vec![];
                }

                let at = geometry::drop_point(Point::new(*x, *y), layout.offset());
                log::debug!("tile {own}: received {incoming} at ({}, {})", at.x, at.y);
                vec![TileEffect::Dropped(DropInfo {
                    image: incoming,
                    drop_x: at.x,
                    drop_y: at.y,
                })]
            }
            TileEvent::DragEnd | TileEvent::DragExit => {
                self.reset();
                vec![]
            }
        }
    }
}
