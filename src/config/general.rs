//! The general configuration settings for sprig.
//!
//! This module defines the [General] struct for deserializing
//! general settings from the sprig.toml configuration file.
//!
//! It covers how directory listings are turned into tree children and whether
//! already loaded directories are listed again when they are re-expanded.

use serde::Deserialize;

/// Order in which the entries of a directory become tree children.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EntryOrder {
    /// Whatever order the filesystem driver returns.
    #[default]
    Native,
    /// Case-insensitive name order.
    Name,
    /// Directories first, then case-insensitive name order.
    DirsFirst,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct General {
    show_hidden: bool,
    entry_order: EntryOrder,
    refresh_on_expand: bool,
}

impl Default for General {
    fn default() -> Self {
        General {
            show_hidden: true,
            entry_order: EntryOrder::Native,
            refresh_on_expand: false,
        }
    }
}

impl General {
    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    #[inline]
    pub fn entry_order(&self) -> EntryOrder {
        self.entry_order
    }

    #[inline]
    pub fn refresh_on_expand(&self) -> bool {
        self.refresh_on_expand
    }
}
