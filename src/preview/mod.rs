//! Preview pane and editor-to-preview scroll synchronization

mod pane;
mod sync_scroll;

pub use pane::{PreviewPane, RENDER_ERROR_PLACEHOLDER};
pub use sync_scroll::{should_forward, ScrollMetrics};
