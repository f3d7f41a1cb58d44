//! Display configuration options for sprig
//!
//! This module defines the display configuration options which are read from the sprig.toml
//! configuration file.

use ratatui::widgets::BorderType;
use serde::Deserialize;

/// Narrowest tree pane the layout accepts.
pub const MIN_TREE_WIDTH: u16 = 10;

/// Display configuration options
///
/// Pane sizes, the syntax theme used for previews and how preview text is laid out.
/// Default values are provided for all options.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Display {
    tree_width: u16,
    syntax_theme: String,
    border_shape: BorderShape,
    wrap_preview: bool,
    tab_width: usize,
}

impl Display {
    /// Clamped to [MIN_TREE_WIDTH].
    #[inline]
    pub fn tree_width(&self) -> u16 {
        self.tree_width.max(MIN_TREE_WIDTH)
    }

    #[inline]
    pub fn syntax_theme(&self) -> &str {
        &self.syntax_theme
    }

    #[inline]
    pub fn border_shape(&self) -> &BorderShape {
        &self.border_shape
    }

    #[inline]
    pub fn wrap_preview(&self) -> bool {
        self.wrap_preview
    }

    /// Zero is read as one.
    #[inline]
    pub fn tab_width(&self) -> usize {
        self.tab_width.max(1)
    }
}

impl Default for Display {
    fn default() -> Self {
        Display {
            tree_width: 40,
            syntax_theme: crate::core::highlight::DEFAULT_STYLE.into(),
            border_shape: BorderShape::Plain,
            wrap_preview: true,
            tab_width: 4,
        }
    }
}

/// Border shape options
/// This enum defines the different border shapes that can be used in the UI
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BorderShape {
    #[default]
    Plain,
    Rounded,
    Double,
}

impl BorderShape {
    pub fn as_border_type(&self) -> BorderType {
        match self {
            BorderShape::Plain => BorderType::Plain,
            BorderShape::Rounded => BorderType::Rounded,
            BorderShape::Double => BorderType::Double,
        }
    }
}
