//! Focus and mode state machine for sprig.
//!
//! Exactly one surface owns input at a time: the tree, the preview, or an external editor
//! that has the terminal while the UI is suspended. Transitions happen only through the
//! methods here. [PendingEdit] mutably borrows the machine for the length of one edit, so a
//! second edit cannot start while one is pending, and dropping it always returns to the tree.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    TreeFocused,
    PreviewFocused,
    EditorSuspended,
}

#[derive(Debug, Default)]
pub struct FocusMachine {
    state: FocusState,
}

impl FocusMachine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> FocusState {
        self.state
    }

    #[inline]
    pub fn tree_focused(&self) -> bool {
        self.state == FocusState::TreeFocused
    }

    #[inline]
    pub fn preview_focused(&self) -> bool {
        self.state == FocusState::PreviewFocused
    }

    /// Tree and preview swap focus unconditionally.
    pub fn toggle_preview(&mut self) {
        self.state = match self.state {
            FocusState::TreeFocused => FocusState::PreviewFocused,
            FocusState::PreviewFocused | FocusState::EditorSuspended => FocusState::TreeFocused,
        };
    }

    pub fn focus_preview(&mut self) {
        self.state = FocusState::PreviewFocused;
    }

    pub fn focus_tree(&mut self) {
        self.state = FocusState::TreeFocused;
    }

    /// Enters [FocusState::EditorSuspended] for the lifetime of the returned guard.
    pub fn begin_edit(&mut self, path: &Path) -> PendingEdit<'_> {
        tracing::debug!(path = %path.display(), from = ?self.state, "edit session started");
        self.state = FocusState::EditorSuspended;
        PendingEdit {
            machine: self,
            path: path.to_path_buf(),
        }
    }
}

/// One edit cycle between suspend and resume.
#[derive(Debug)]
pub struct PendingEdit<'a> {
    machine: &'a mut FocusMachine,
    path: PathBuf,
}

impl PendingEdit<'_> {
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn state(&self) -> FocusState {
        self.machine.state
    }
}

impl Drop for PendingEdit<'_> {
    fn drop(&mut self) {
        self.machine.state = FocusState::TreeFocused;
        tracing::debug!(path = %self.path.display(), "edit session ended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_the_tree() {
        assert_eq!(FocusMachine::new().state(), FocusState::TreeFocused);
    }

    #[test]
    fn toggle_swaps_tree_and_preview() {
        let mut focus = FocusMachine::new();
        focus.toggle_preview();
        assert!(focus.preview_focused());
        focus.toggle_preview();
        assert!(focus.tree_focused());
    }

    #[test]
    fn edit_session_returns_to_tree() {
        let mut focus = FocusMachine::new();
        focus.focus_preview();
        {
            let pending = focus.begin_edit(Path::new("/tmp/a.txt"));
            assert_eq!(pending.state(), FocusState::EditorSuspended);
            assert_eq!(pending.path(), Path::new("/tmp/a.txt"));
        }
        assert_eq!(focus.state(), FocusState::TreeFocused);
    }

    #[test]
    fn unwinding_edit_session_returns_to_tree() {
        let mut focus = FocusMachine::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _pending = focus.begin_edit(Path::new("f"));
            panic!("editor blew up");
        }));
        assert!(result.is_err());
        assert_eq!(focus.state(), FocusState::TreeFocused);
    }
}
