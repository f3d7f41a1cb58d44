//! Configuration for sprig.
//!
//! The `sprig.toml` file is split into sections, one module each:
//! - [general]: how directory listings become tree children
//! - [display]: pane layout and preview rendering
//! - [theme]: colors
//! - [input]: key bindings and the editor command
//! - [load]: locating, reading and generating the file
//!
//! Every option has a default, a missing file is not an error.

pub mod display;
pub mod general;
pub mod input;
pub mod load;
pub mod theme;

pub use display::{BorderShape, Display};
pub use general::{EntryOrder, General};
pub use input::{Editor, Keys};
pub use load::Config;
pub use theme::Theme;
