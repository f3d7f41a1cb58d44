//! Theme configuration options for sprig
//!
//! This module defines the theme configuration options which are read from the sprig.toml
//! configuration file.
//!
//! Colors accept terminal color names ("cyan", "lightred") or hex codes ("#RRGGBB", "#RGB").

use crate::utils::parse_color;

use ratatui::style::{Color, Style};
use serde::Deserialize;

/// Theme configuration options
/// # Examples
/// ```toml
/// [theme]
/// directory = "blue"
/// selection = "#3a3a3a"
/// ```
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Theme {
    #[serde(deserialize_with = "deserialize_color_field")]
    root: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    directory: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    file: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    selection: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    accent: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            root: Color::Red,
            directory: Color::Green,
            file: Color::Reset,
            selection: Color::Rgb(0x30, 0x30, 0x30),
            accent: Color::Cyan,
            error: Color::Red,
        }
    }
}

impl Theme {
    #[inline]
    pub fn root_style(&self) -> Style {
        Style::default().fg(self.root)
    }

    #[inline]
    pub fn directory_style(&self) -> Style {
        Style::default().fg(self.directory)
    }

    #[inline]
    pub fn file_style(&self) -> Style {
        Style::default().fg(self.file)
    }

    #[inline]
    pub fn selection_style(&self) -> Style {
        Style::default().bg(self.selection)
    }

    #[inline]
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Foreground of error text shown in the preview and in messages.
    #[inline]
    pub fn error_color(&self) -> Color {
        self.error
    }
}

// Helper function to deserialize Theme colors
fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}
