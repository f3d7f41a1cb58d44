//! Application state and input handling for sprig.
//!
//! - [state]: the [AppState] context passed to the event loop and the ui.
//! - [handlers]: key action handlers implemented on [AppState].
//! - [keymap]: config keys to [keymap::Action].
//! - [nav]: cursor over the visible rows of the tree.
//! - [preview]: content, title and scroll of the preview pane.
//! - [focus]: which surface owns input, including the editor cycle.

pub mod focus;
pub mod handlers;
pub mod keymap;
pub mod nav;
pub mod preview;
pub mod state;

pub use focus::{FocusMachine, FocusState, PendingEdit};
pub use nav::NavState;
pub use preview::{PreviewData, PreviewState};
pub use state::{AppState, KeypressResult, LayoutMetrics};
