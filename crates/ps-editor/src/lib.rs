pub mod history;
pub mod input;
pub mod layout;
pub mod page;
pub mod schedule;
pub mod tile;
pub mod view;

pub use history::{SwapHistory, SwapRecord};
pub use input::{PointerButton, TileEvent};
pub use layout::{MeasuredTile, TileLayout};
pub use page::{DropOutcome, IgnoreReason, PrintPage};
pub use schedule::{CommitScheduler, ScheduledCommit};
pub use tile::{DRAG_PAYLOAD_MIME, DragGeometry, SwappableTile, TileEffect};
pub use view::TileView;
