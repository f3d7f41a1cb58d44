//! External editor hand-off for sprig.
//!
//! Resolves which editor to run, suspends the terminal UI while it runs and resumes it on every
//! exit path. The terminal and the child process sit behind the [UiSuspend] and [EditorLauncher]
//! traits so the cycle can be exercised without a real terminal.

use crate::core::error::EditorError;

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Editors tried in order when neither `$EDITOR` nor the config names one.
pub const EDITOR_CANDIDATES: &[&str] = &["nvim", "vim", "vi", "nano", "emacs"];

/// Program plus leading arguments. The file path is always appended last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    program: String,
    args: Vec<String>,
}

impl EditorCommand {
    /// Splits a command line on whitespace. None when it is blank.
    pub fn parse(cmd: &str) -> Option<Self> {
        let mut parts = cmd.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(EditorCommand {
            program,
            args: parts.collect(),
        })
    }

    #[inline]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[inline]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Picks the editor: `$EDITOR`, then the configured command, then [EDITOR_CANDIDATES].
///
/// `lookup` resolves a program name on PATH. A configured command that does not resolve is
/// skipped with a warning.
pub fn resolve_editor(
    env_value: Option<String>,
    configured: Option<&str>,
    lookup: impl Fn(&str) -> Option<PathBuf>,
) -> Result<EditorCommand, EditorError> {
    if let Some(cmd) = env_value.as_deref().and_then(EditorCommand::parse) {
        return Ok(cmd);
    }

    if let Some(cmd) = configured.and_then(EditorCommand::parse) {
        if lookup(cmd.program()).is_some() {
            return Ok(cmd);
        }
        tracing::warn!(program = cmd.program(), "configured editor not found on PATH");
    }

    EDITOR_CANDIDATES
        .iter()
        .copied()
        .find(|&name| lookup(name).is_some())
        .and_then(EditorCommand::parse)
        .ok_or_else(|| EditorError::NoEditor {
            candidates: EDITOR_CANDIDATES.join(", "),
        })
}

/// [resolve_editor] against the real environment. `$EDITOR` is read on every call.
pub fn resolve_system_editor(configured: Option<&str>) -> Result<EditorCommand, EditorError> {
    let env_value = std::env::var_os("EDITOR").map(|v| v.to_string_lossy().into_owned());
    resolve_editor(env_value, configured, |name| which::which(name).ok())
}

/// How the editor process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorExit {
    pub success: bool,
    pub code: Option<i32>,
}

/// Runs an editor on a file and waits for it.
pub trait EditorLauncher {
    fn run(&mut self, cmd: &EditorCommand, path: &Path) -> io::Result<EditorExit>;
}

/// [EditorLauncher] spawning a child process with inherited stdio.
#[derive(Debug, Default)]
pub struct ProcessLauncher;

impl EditorLauncher for ProcessLauncher {
    fn run(&mut self, cmd: &EditorCommand, path: &Path) -> io::Result<EditorExit> {
        let status = Command::new(cmd.program())
            .args(cmd.args())
            .arg(path)
            .status()?;
        Ok(EditorExit {
            success: status.success(),
            code: status.code(),
        })
    }
}

/// A terminal UI that can hand the terminal to another process and take it back.
pub trait UiSuspend {
    fn suspend(&mut self) -> io::Result<()>;
    fn resume(&mut self) -> io::Result<()>;
}

/// Guard over a suspended UI. Dropping it resumes the UI if [SuspendedUi::release] was not
/// called, including while unwinding.
pub struct SuspendedUi<'a> {
    ui: &'a mut dyn UiSuspend,
    active: bool,
}

impl<'a> SuspendedUi<'a> {
    /// Suspends the UI. A failed suspend is rolled back before the error is returned.
    pub fn enter(ui: &'a mut dyn UiSuspend) -> io::Result<Self> {
        if let Err(e) = ui.suspend() {
            if let Err(resume_err) = ui.resume() {
                tracing::error!(error = %resume_err, "failed to restore terminal after suspend error");
            }
            return Err(e);
        }
        Ok(SuspendedUi { ui, active: true })
    }

    /// Resumes the UI and reports the outcome.
    pub fn release(mut self) -> io::Result<()> {
        self.active = false;
        self.ui.resume()
    }
}

impl Drop for SuspendedUi<'_> {
    fn drop(&mut self) {
        if self.active
            && let Err(e) = self.ui.resume()
        {
            tracing::error!(error = %e, "failed to resume terminal");
        }
    }
}

/// Suspends the UI, runs the editor on `path` and resumes the UI.
///
/// The UI is resumed whether or not the editor could be launched.
pub fn run_editor(
    launcher: &mut dyn EditorLauncher,
    ui: &mut dyn UiSuspend,
    cmd: &EditorCommand,
    path: &Path,
) -> Result<EditorExit, EditorError> {
    let suspended = SuspendedUi::enter(ui).map_err(EditorError::Terminal)?;

    tracing::info!(program = cmd.program(), path = %path.display(), "launching editor");
    let exit = launcher.run(cmd, path);
    let resumed = suspended.release();

    let exit = exit.map_err(|source| EditorError::Launch {
        program: cmd.program().to_string(),
        source,
    })?;
    resumed.map_err(EditorError::Terminal)?;

    tracing::info!(success = exit.success, code = ?exit.code, "editor exited");
    Ok(exit)
}
