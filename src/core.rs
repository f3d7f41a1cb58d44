//! Core runtime logic for sprig.
//!
//! This module contains the non-UI pieces used by the application:
//! - [fs]: the filesystem seam and its local implementation.
//! - [tree]: the lazily materialized tree model.
//! - [highlight]: language detection, tokenizing and color markup for the preview.
//! - [editor]: editor resolution and the suspend/run/resume cycle.
//! - [formatter]: entry ordering and width-safe text helpers.
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.
//! - [error]: error types shared by the above.

pub mod editor;
pub mod error;
pub mod formatter;
pub mod fs;
pub mod highlight;
pub mod terminal;
pub mod tree;

pub use error::{EditorError, FsError, RenderError};
pub use formatter::{Formatter, clip_to_width, expand_tabs};
pub use fs::{DirEntryInfo, EntryKind, FileSystem, LocalFs};
pub use highlight::TokenRenderer;
pub use tree::{NodeId, Tree, TreeNode};
