//! Miscellaneous utility functions for sprig.
//!
//! - [cli]: command-line parsing
//! - [helpers]: color parsing, path helpers
//! - [logging]: tracing setup
//!
//! All of these utilities are used throughout sprig for convenience and code clarity.

pub mod cli;
pub mod helpers;
pub mod logging;

pub use helpers::{
    get_home, is_listable_directory, parse_color, resolve_initial_dir, shorten_home_path,
};
