//! Error types for sprig.
//!
//! [FsError] covers listing, reading and stat failures, and entries whose kind changed since they
//! were listed. They are recovered by the caller and shown as preview text.
//! [RenderError] never reaches the user: the renderer falls back to the literal content.
//! [EditorError] covers editor resolution and the suspend/launch/resume cycle.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("Cannot list {}: {source}", path.display())]
    List { path: PathBuf, source: io::Error },

    #[error("Cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Cannot access {}: {source}", path.display())]
    Stat { path: PathBuf, source: io::Error },

    #[error("Cannot open {}: it changed type since it was listed", path.display())]
    Changed { path: PathBuf },
}

impl FsError {
    /// The underlying io error kind, used to tell permission errors from vanished paths.
    pub fn kind(&self) -> Option<io::ErrorKind> {
        match self {
            FsError::List { source, .. }
            | FsError::Read { source, .. }
            | FsError::Stat { source, .. } => Some(source.kind()),
            FsError::Changed { .. } => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown style '{0}'")]
    UnknownStyle(String),

    #[error("tokenizer failed: {0}")]
    Tokenize(String),

    #[error("invalid scope operation: {0}")]
    Scope(String),
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("No editor available (set $EDITOR or install one of: {candidates})")]
    NoEditor { candidates: String },

    #[error("Failed to launch '{program}': {source}")]
    Launch { program: String, source: io::Error },

    #[error("Terminal hand-off failed: {0}")]
    Terminal(#[source] io::Error),
}
