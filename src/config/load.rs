//! The main config loading module for sprig.
//!
//! Handles loading and deserializing settings from `sprig.toml`.
//!
//! Provides the main [Config] struct. Also implements default config initialization when
//! `sprig.toml` is not present.

use crate::config::{Display, Editor, General, Keys, Theme};
use crate::core::tree::ListingOptions;
use crate::utils::get_home;

use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// Main configuration struct for sprig
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    general: General,
    display: Display,
    theme: Theme,
    editor: Editor,
    keys: Keys,
}

/// Public methods for loading and accessing the configuration
impl Config {
    /// Load configuration from `path`, or from [Config::default_path] when None.
    /// If the file does not exist or fails to parse, returns the default configuration.
    ///
    /// Called by entry point to load config at startup, before the terminal is taken over.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map_or_else(Self::default_path, Path::to_path_buf);

        if !path.exists() {
            eprintln!(
                "No sprig.toml config file found. Using internal defaults. (Tip: run 'sprig --init' to generate a config file.)"
            );
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "loaded config");
                    config
                }
                Err(e) => {
                    eprintln!("Error parsing config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    #[inline]
    pub fn display(&self) -> &Display {
        &self.display
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    pub fn listing_options(&self) -> ListingOptions {
        ListingOptions {
            show_hidden: self.general.show_hidden(),
            order: self.general.entry_order(),
        }
    }

    /// Determine the default configuration file path.
    /// Checks the SPRIG_CONFIG environment variable first,
    /// Checks for XDG_CONFIG_HOME after,
    /// then defaults to ~/.config/sprig/sprig.toml,
    pub fn default_path() -> PathBuf {
        config_path_from(
            std::env::var_os("SPRIG_CONFIG"),
            std::env::var_os("XDG_CONFIG_HOME"),
            get_home(),
        )
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {:?}", path);
        Ok(())
    }
}

fn config_path_from(
    config_env: Option<OsString>,
    xdg_config: Option<OsString>,
    home: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = config_env.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    if let Some(xdg_config) = xdg_config.filter(|p| !p.is_empty()) {
        return PathBuf::from(xdg_config).join("sprig/sprig.toml");
    }

    if let Some(home) = home {
        return home.join(".config/sprig/sprig.toml");
    }
    PathBuf::from("sprig.toml")
}

pub(crate) const DEFAULT_TOML: &str = r##"# sprig.toml - default configuration for sprig

# Note:
# Commented values are the internal defaults of sprig
# Use hex codes (eg. "#RRGGBB") or terminal colors ("cyan")

[general]
# show_hidden = true
# entry_order = "native"     # "native", "name", "dirs_first"
# refresh_on_expand = false

[display]
# tree_width = 40
# syntax_theme = "base16-ocean.dark"
# border_shape = "plain"     # "plain", "rounded", "double"
# wrap_preview = true
# tab_width = 4

[theme]
# root = "red"
# directory = "green"
# file = "default"
# selection = "#303030"
# accent = "cyan"
# error = "red"

[editor]
# Consulted after $EDITOR. Arguments are allowed, eg. "code --wait".
# cmd = ""

[keys]
# select = ["Enter", "Space"]
# up = ["k", "Up"]
# down = ["j", "Down"]
# expand = ["l", "Right"]
# collapse = ["h", "Left"]
# top = ["g", "Home"]
# bottom = ["G", "End"]
# page_up = ["PageUp", "Ctrl+u"]
# page_down = ["PageDown", "Ctrl+d"]
# toggle_focus = ["Tab"]
# edit = ["e"]
# help = ["?"]
# quit = ["q", "Ctrl+c"]
"##;
