//! Layout measurement seam.
//!
//! The tile never reads the DOM. Whoever drives it supplies the element's
//! current bounds through `TileLayout`, so the geometry stays pure.

use ps_core::{Point, Rect, Size};

/// Access to a tile element's measured bounds, in client coordinates.
pub trait TileLayout {
    fn bounds(&self) -> Rect;

    /// Top-left of the element.
    fn offset(&self) -> Point {
        self.bounds().origin()
    }

    fn size(&self) -> Size {
        self.bounds().size()
    }
}

/// A bounding box measured by the host at event time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredTile {
    pub offset: Point,
    pub size: Size,
}

impl MeasuredTile {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            offset: Point::new(left, top),
            size: Size::new(width, height),
        }
    }
}

impl TileLayout for MeasuredTile {
    fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.offset, self.size)
    }

    fn offset(&self) -> Point {
        self.offset
    }

    fn size(&self) -> Size {
        self.size
    }
}

impl TileLayout for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}
