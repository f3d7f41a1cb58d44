//! Input configuration options for sprig
//!
//! This module defines the input configuration options which are read from the sprig.toml
//! configuration file.

use serde::Deserialize;

/// Input configuration options of all actions
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Keys {
    select: Vec<String>,
    up: Vec<String>,
    down: Vec<String>,
    expand: Vec<String>,
    collapse: Vec<String>,
    top: Vec<String>,
    bottom: Vec<String>,
    page_up: Vec<String>,
    page_down: Vec<String>,
    toggle_focus: Vec<String>,
    edit: Vec<String>,
    help: Vec<String>,
    quit: Vec<String>,
}

/// Editor configuration options
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Editor {
    cmd: String,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    select,
    up,
    down,
    expand,
    collapse,
    top,
    bottom,
    page_up,
    page_down,
    toggle_focus,
    edit,
    help,
    quit,
);

/// Default input configuration options
impl Default for Keys {
    fn default() -> Self {
        Keys {
            select: vec!["Enter".into(), "Space".into()],
            up: vec!["k".into(), "Up".into()],
            down: vec!["j".into(), "Down".into()],
            expand: vec!["l".into(), "Right".into()],
            collapse: vec!["h".into(), "Left".into()],
            top: vec!["g".into(), "Home".into()],
            bottom: vec!["G".into(), "End".into()],
            page_up: vec!["PageUp".into(), "Ctrl+u".into()],
            page_down: vec!["PageDown".into(), "Ctrl+d".into()],
            toggle_focus: vec!["Tab".into()],
            edit: vec!["e".into()],
            help: vec!["?".into()],
            quit: vec!["q".into(), "Ctrl+c".into()],
        }
    }
}

impl Editor {
    /// The configured command line, None when blank.
    #[inline]
    pub fn cmd(&self) -> Option<&str> {
        let trimmed = self.cmd.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}
