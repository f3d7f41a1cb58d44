//! Terminal UI for sprig.
//!
//! - [render]: the per-frame entry point and the pane layout.
//! - [panes]: the tree pane and the preview pane.
//! - [widgets]: pane blocks and the overlay dialogs.
//! - [overlays]: the overlay stack drawn above the panes.

pub mod overlays;
pub mod panes;
pub mod render;
pub mod widgets;

pub use render::render;
