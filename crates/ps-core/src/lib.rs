pub mod anim;
pub mod config;
pub mod error;
pub mod geometry;
pub mod id;
pub mod model;

pub use anim::{Easing, Lerp, Transition, Tween};
pub use config::SwapConfig;
pub use error::SwapError;
pub use id::ImageId;
pub use model::*;

// Re-export kurbo types so downstream crates don't need a direct dependency
pub use kurbo::{Point, Rect, Size};
