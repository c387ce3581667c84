//! Input abstraction layer.
//!
//! Normalizes DOM mouse and drag-and-drop events on a tile into a single
//! `TileEvent` enum consumed by the tile state machine.

/// Which mouse button a pointer event came from (DOM `MouseEvent.button`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
    Other(i16),
}

impl PointerButton {
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// A normalized event targeting one tile. Coordinates are client coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum TileEvent {
    /// Mouse pressed on the tile.
    PointerDown { x: f64, y: f64, button: PointerButton },

    /// Mouse released without the browser starting a drag.
    PointerUp { x: f64, y: f64 },

    /// Native drag session started from this tile.
    DragStart,

    /// A drag entered this tile.
    DragEnter,

    /// A drag left this tile.
    DragLeave,

    /// A drag is hovering this tile.
    DragOver,

    /// Something was dropped on this tile. `payload` is the plain-text data.
    Drop {
        x: f64,
        y: f64,
        payload: Option<String>,
    },

    /// The drag session ended (fires on the source).
    DragEnd,

    /// The drag session was abandoned.
    DragExit,
}

impl TileEvent {
    /// Create a PointerDown from a web MouseEvent.
    pub fn from_pointer_down(x: f64, y: f64, button: i16) -> Self {
        Self::PointerDown {
            x,
            y,
            button: PointerButton::from_dom(button),
        }
    }

    pub fn from_pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }

    /// Create a Drop from a web DragEvent. An empty payload counts as missing.
    pub fn from_drop(x: f64, y: f64, payload: &str) -> Self {
        Self::Drop {
            x,
            y,
            payload: (!payload.is_empty()).then(|| payload.to_string()),
        }
    }
}
