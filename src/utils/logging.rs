//! Tracing subscriber setup for sprig.
//!
//! Logs go to a file, never to the terminal the UI is drawn on. The filter is read from
//! `SPRIG_LOG` with the usual EnvFilter syntax and defaults to `info`.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_ENV: &str = "SPRIG_LOG";

/// `<state dir>/sprig/sprig.log`, falling back to the cache dir and then the temp dir.
pub fn default_log_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("sprig")
        .join("sprig.log")
}

/// Installs the global subscriber writing to `path`.
///
/// Setup failures are returned so the caller can report them and run without logging.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
        .with(env_filter(std::env::var(LOG_ENV).ok().as_deref()))
        .try_init()
        .map_err(io::Error::other)
}

fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
