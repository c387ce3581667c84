//! Error type shared by the swap engine.
//!
//! Benign no-ops (self-drop, drop on a tile mid-animation, drop while a swap
//! is pending) are reported as outcomes by the editor, never as errors. Every
//! variant here is either bad input at construction time or a broken
//! invariant that must abort the operation.

use crate::id::ImageId;
use crate::model::Slot;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SwapError {
    /// The same image identifier appears in two slots.
    #[error("image `{image}` appears twice (at {first} and {second})")]
    DuplicateImage {
        image: ImageId,
        first: Slot,
        second: Slot,
    },

    /// An image identifier could not be located in any entry.
    #[error("image `{0}` is not present in any entry")]
    ImageNotFound(ImageId),

    /// A configuration value is out of range.
    #[error("invalid swap config: {0}")]
    InvalidConfig(String),

    /// Malformed JSON input (entries or config).
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
