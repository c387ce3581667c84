//! Pure geometry for the swap animations.
//!
//! All coordinates are CSS pixels. Positions inside a tile are relative to
//! the tile's top-left corner; `pointer` arguments are client (viewport)
//! coordinates and `offset` is the tile's measured top-left in the same space.

use kurbo::{Point, Size, Vec2};
use serde::Serialize;

/// Ripple shown at the press point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RippleGeometry {
    /// Top-left of the ripple's bounding square, tile-relative.
    pub origin: Point,
    pub diameter: f64,
}

/// Avatar travel from the drop point to the tile center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoveToCenter {
    pub start: Point,
    pub end: Point,
}

/// A circular clip region, positioned by its bounding square.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaskGeometry {
    pub diameter: f64,
    pub top: f64,
    pub left: f64,
}

impl MaskGeometry {
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

/// Top-left of a circle of `diameter` centered on `center`.
pub fn centered_origin(center: Point, diameter: f64) -> Point {
    center - Vec2::new(diameter / 2.0, diameter / 2.0)
}

/// Ripple diameter covers the larger tile side.
pub fn ripple_diameter(size: Size) -> f64 {
    size.width.max(size.height)
}

/// Ripple centered on the press point.
pub fn ripple_at(pointer: Point, offset: Point, size: Size) -> RippleGeometry {
    let diameter = ripple_diameter(size);
    RippleGeometry {
        origin: centered_origin(pointer - offset.to_vec2(), diameter),
        diameter,
    }
}

/// Where the press avatar appears before scaling in (left = x, top = y).
pub fn avatar_press_origin(pointer: Point, offset: Point, avatar_diameter: f64) -> Point {
    centered_origin(pointer - offset.to_vec2(), avatar_diameter)
}

/// Drop position relative to the target tile's container.
pub fn drop_point(pointer: Point, container_offset: Point) -> Point {
    pointer - container_offset.to_vec2()
}

/// Center of a tile, tile-relative.
pub fn tile_center(size: Size) -> Point {
    Point::new(size.width / 2.0, size.height / 2.0)
}

pub fn move_to_center(drop: Point, size: Size, avatar_diameter: f64) -> MoveToCenter {
    MoveToCenter {
        start: centered_origin(drop, avatar_diameter),
        end: centered_origin(tile_center(size), avatar_diameter),
    }
}

/// Mask at the start of the reveal: avatar-sized, centered in the tile.
pub fn mask_start(size: Size, avatar_diameter: f64) -> MaskGeometry {
    let origin = centered_origin(tile_center(size), avatar_diameter);
    MaskGeometry {
        diameter: avatar_diameter,
        top: origin.y,
        left: origin.x,
    }
}

/// Mask at the end of the reveal: a circle over the tile diagonal plus the
/// border on both sides, centered on the tile.
pub fn reveal_mask(size: Size, border_width: f64) -> MaskGeometry {
    let (w, h) = (size.width, size.height);
    let diameter = (w * w + h * h).sqrt() + 2.0 * border_width;
    MaskGeometry {
        diameter,
        top: -(diameter - h) / 2.0,
        left: -(diameter - w) / 2.0,
    }
}
