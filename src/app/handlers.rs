//! Input action handler methods for sprig.
//!
//! This module implements [AppState] methods that process key actions: tree navigation,
//! selection of directories and files, preview scrolling, focus changes and the edit cycle.

use crate::app::NavState;
use crate::app::keymap::{FocusAction, NavAction, SystemAction};
use crate::app::state::{AppState, KeypressResult};
use crate::core::editor::{EditorExit, UiSuspend, run_editor};
use crate::core::error::{EditorError, FsError};
use crate::core::fs::EntryKind;
use crate::core::highlight::paint;
use crate::core::tree::NodeId;
use crate::ui::overlays::Overlay;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const MESSAGE_DURATION: Duration = Duration::from_secs(5);
const WHEEL_LINES: usize = 3;

/// AppState input and action handlers
impl<'a> AppState<'a> {
    // AppState core handlers

    /// Handles navigation actions.
    ///
    /// While the preview has focus the movement actions scroll the preview instead.
    pub(super) fn handle_nav_action(&mut self, action: NavAction) -> KeypressResult {
        if self.focus.preview_focused() {
            return self.handle_preview_scroll(action);
        }

        let page = self.metrics.tree_height.max(1);
        match action {
            NavAction::Select => self.select_current(),
            NavAction::Up => self.move_nav_if_possible(|nav| nav.move_up()),
            NavAction::Down => self.move_nav_if_possible(|nav| nav.move_down()),
            NavAction::Expand => self.handle_expand(),
            NavAction::Collapse => self.handle_collapse(),
            NavAction::Top => self.nav.move_to_top(),
            NavAction::Bottom => self.nav.move_to_bottom(),
            NavAction::PageUp => self.nav.page_up(page),
            NavAction::PageDown => self.nav.page_down(page),
        }
        KeypressResult::Continue
    }

    pub(super) fn handle_focus_action(
        &mut self,
        action: FocusAction,
        ui: &mut dyn UiSuspend,
    ) -> KeypressResult {
        match action {
            FocusAction::Toggle => {
                self.focus.toggle_preview();
                KeypressResult::Consumed
            }
            FocusAction::Edit => self.handle_edit(ui),
        }
    }

    pub(super) fn handle_sys_action(&mut self, action: SystemAction) -> KeypressResult {
        match action {
            SystemAction::Quit => KeypressResult::Quit,
            SystemAction::Help => {
                self.toggle_keybind_help();
                KeypressResult::Consumed
            }
        }
    }

    /// Esc closes the help overlay first, then hands focus back to the tree.
    pub(super) fn handle_esc(&mut self) -> KeypressResult {
        if self
            .overlays()
            .iter()
            .any(|o| matches!(o, Overlay::KeybindHelp))
        {
            self.overlays_mut()
                .retain(|o| !matches!(o, Overlay::KeybindHelp));
            return KeypressResult::Consumed;
        }

        if self.focus.preview_focused() {
            self.focus.focus_tree();
            return KeypressResult::Consumed;
        }
        KeypressResult::Continue
    }

    /// Routes mouse input by the pane under the pointer.
    ///
    /// A left click on a tree row focuses the tree and selects the row, a click on the preview
    /// focuses it. The wheel scrolls the preview or moves the tree cursor.
    pub(super) fn handle_mouse_event(&mut self, mouse: MouseEvent) -> KeypressResult {
        let pos = Position::new(mouse.column, mouse.row);
        let in_tree = self.metrics.tree_area.contains(pos);
        let in_preview = self.metrics.preview_area.contains(pos);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if in_tree => self.click_tree_row(mouse.row),
            MouseEventKind::Down(MouseButton::Left) if in_preview => {
                self.focus.focus_preview();
                KeypressResult::Consumed
            }
            MouseEventKind::ScrollDown if in_preview => {
                self.preview.scroll_down(WHEEL_LINES);
                KeypressResult::Consumed
            }
            MouseEventKind::ScrollUp if in_preview => {
                self.preview.scroll_up(WHEEL_LINES);
                KeypressResult::Consumed
            }
            MouseEventKind::ScrollDown if in_tree => {
                self.nav.page_down(1);
                KeypressResult::Consumed
            }
            MouseEventKind::ScrollUp if in_tree => {
                self.nav.page_up(1);
                KeypressResult::Consumed
            }
            _ => KeypressResult::Continue,
        }
    }

    fn click_tree_row(&mut self, screen_row: u16) -> KeypressResult {
        // rows start below the top border
        let top = self.metrics.tree_area.y.saturating_add(1);
        let Some(line) = screen_row.checked_sub(top).map(usize::from) else {
            return KeypressResult::Continue;
        };
        if line >= self.metrics.tree_height {
            return KeypressResult::Continue;
        }

        let idx = self.nav.scroll_offset(self.metrics.tree_height) + line;
        let Some(id) = self.nav.rows().get(idx).map(|row| row.id.clone()) else {
            return KeypressResult::Continue;
        };

        self.focus.focus_tree();
        self.nav.select_id(&id);
        self.select_node(&id);
        KeypressResult::Consumed
    }

    // Selection

    /// Selects the node under the cursor.
    fn select_current(&mut self) {
        if let Some(id) = self.nav.selected_id().cloned() {
            self.select_node(&id);
        }
    }

    /// Directories are expanded or collapsed, files are shown in the preview.
    ///
    /// The path is checked first so entries that vanished or changed kind since listing
    /// report an error instead of acting on stale state.
    pub(crate) fn select_node(&mut self, id: &NodeId) {
        let Some((path, listed)) = self
            .tree
            .node(id)
            .map(|n| (n.path().to_path_buf(), n.kind()))
        else {
            return;
        };
        tracing::debug!(path = %path.display(), "selected");

        match self.fs.stat(&path) {
            Ok(kind) if kind != listed => self.handle_kind_change(id, path, kind),
            Ok(EntryKind::Directory) => self.activate_directory(id),
            Ok(EntryKind::File) => self.show_file(&path),
            Err(source) => self.show_error(&FsError::Stat { path, source }),
        }
    }

    /// Lists the parent of `id` again so the node is rebuilt with its current kind, and keeps
    /// the cursor on it.
    fn handle_kind_change(&mut self, id: &NodeId, path: PathBuf, now: EntryKind) {
        tracing::warn!(path = %path.display(), now = ?now, "entry changed kind since listing");

        if let Some(parent) = id.parent() {
            self.relist(&parent);
            let idx = self
                .tree
                .node(&parent)
                .and_then(|p| p.children().iter().position(|c| c.path() == path.as_path()));
            if let Some(idx) = idx {
                self.nav.select_id(&parent.child(idx));
            }
        }
        self.show_error(&FsError::Changed { path });
    }

    fn relist(&mut self, id: &NodeId) {
        let opts = self.config.listing_options();
        let fs = self.fs.as_ref();
        let Some(node) = self.tree.node_mut(id) else {
            return;
        };

        if let Err(err) = node.refresh_children(fs, &opts) {
            tracing::warn!(error = %err, kind = ?err.kind(), "directory could not be listed");
        }
        self.nav.sync(&self.tree);
    }

    fn activate_directory(&mut self, id: &NodeId) {
        let opts = self.config.listing_options();
        let refresh = self.config.general().refresh_on_expand();
        let fs = self.fs.as_ref();
        let Some(node) = self.tree.node_mut(id) else {
            return;
        };

        let result = if !node.is_materialized() {
            node.materialize_children(fs, &opts).map(|()| node.expand())
        } else if !node.is_expanded() && refresh {
            node.refresh_children(fs, &opts).map(|()| node.expand())
        } else {
            node.toggle_expansion();
            Ok(())
        };

        if let Err(err) = result {
            tracing::warn!(error = %err, kind = ?err.kind(), "directory could not be listed");
            self.show_error(&err);
        }
        self.nav.sync(&self.tree);
    }

    fn show_file(&mut self, path: &Path) {
        match self.fs.read_file(path) {
            Ok(bytes) => {
                let markup = self.renderer.render(&bytes, path);
                self.preview.set_file(path, markup);
            }
            Err(source) => self.show_error(&FsError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Reads the file again after an edit, keeping the scroll position.
    fn reload_preview(&mut self, path: &Path) {
        match self.fs.read_file(path) {
            Ok(bytes) => {
                let markup = self.renderer.render(&bytes, path);
                self.preview.reload_file(path, markup);
            }
            Err(source) => self.show_error(&FsError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn show_error(&mut self, err: &FsError) {
        let color = self.config.theme().error_color();
        self.preview.set_error(paint(&err.to_string(), color));
    }

    // Handlers

    fn move_nav_if_possible<F>(&mut self, f: F)
    where
        F: FnOnce(&mut NavState) -> bool,
    {
        if !f(&mut self.nav) {
            tracing::trace!("no rows to move over");
        }
    }

    /// Opens a collapsed directory, or steps into the first child of an open one.
    fn handle_expand(&mut self) {
        let Some(node) = self.current_node() else {
            return;
        };

        if !node.is_dir() || !node.is_expanded() {
            self.select_current();
        } else if !node.children().is_empty() {
            self.nav.move_down();
        }
    }

    /// Closes an open directory, otherwise moves to the parent row.
    fn handle_collapse(&mut self) {
        let Some(id) = self.nav.selected_id().cloned() else {
            return;
        };

        let is_open = self
            .tree
            .node(&id)
            .is_some_and(|n| n.is_dir() && n.is_expanded());

        if is_open {
            if let Some(node) = self.tree.node_mut(&id) {
                node.collapse();
            }
            self.nav.sync(&self.tree);
        } else if let Some(parent) = id.parent() {
            self.nav.select_id(&parent);
        }
    }

    fn handle_preview_scroll(&mut self, action: NavAction) -> KeypressResult {
        let page = self.metrics.preview_height.max(1);
        match action {
            NavAction::Up => self.preview.scroll_up(1),
            NavAction::Down => self.preview.scroll_down(1),
            NavAction::PageUp => self.preview.scroll_up(page),
            NavAction::PageDown => self.preview.scroll_down(page),
            NavAction::Top => self.preview.scroll_to_top(),
            NavAction::Bottom => self.preview.scroll_to_bottom(),
            NavAction::Select | NavAction::Expand | NavAction::Collapse => {
                return KeypressResult::Continue;
            }
        }
        KeypressResult::Consumed
    }

    // Editing

    /// Edits the file under the cursor. Only the tree can start an edit.
    fn handle_edit(&mut self, ui: &mut dyn UiSuspend) -> KeypressResult {
        if !self.focus.tree_focused() {
            return KeypressResult::Continue;
        }
        let Some(id) = self.nav.selected_id().cloned() else {
            return KeypressResult::Continue;
        };
        let Some(path) = self
            .tree
            .node(&id)
            .filter(|n| !n.is_dir())
            .map(|n| n.path().to_path_buf())
        else {
            return KeypressResult::Continue;
        };

        // never hand a directory to the editor
        match self.fs.stat(&path) {
            Ok(EntryKind::File) => {}
            Ok(kind) => {
                self.handle_kind_change(&id, path, kind);
                return KeypressResult::Consumed;
            }
            Err(source) => {
                self.show_error(&FsError::Stat { path, source });
                return KeypressResult::Consumed;
            }
        }

        match self.edit_file(&path, ui) {
            Ok(exit) => {
                if !exit.success {
                    let status = exit
                        .code
                        .map_or_else(|| "a signal".to_string(), |c| format!("status {c}"));
                    self.push_overlay_message(
                        format!("Editor exited with {status}"),
                        MESSAGE_DURATION,
                    );
                }
                KeypressResult::OpenedEditor
            }
            Err(err) => {
                tracing::error!(error = %err, "edit failed");
                self.push_overlay_message(err.to_string(), MESSAGE_DURATION);
                KeypressResult::Recovered
            }
        }
    }

    /// Runs one suspend, edit and resume cycle on `path`.
    ///
    /// On success the preview shows the file as saved and takes focus. On error the focus is
    /// back on the tree and the preview is untouched.
    pub fn edit_file(
        &mut self,
        path: &Path,
        ui: &mut dyn UiSuspend,
    ) -> Result<EditorExit, EditorError> {
        let cmd = (self.resolve_editor)(self.config.editor().cmd())?;

        let exit = {
            let _pending = self.focus.begin_edit(path);
            run_editor(self.launcher.as_mut(), ui, &cmd, path)
        }?;

        self.reload_preview(path);
        self.focus.focus_preview();
        Ok(exit)
    }

    fn toggle_keybind_help(&mut self) {
        let is_open = self
            .overlays()
            .iter()
            .any(|o| matches!(o, Overlay::KeybindHelp));

        if is_open {
            self.overlays_mut()
                .retain(|o| !matches!(o, Overlay::KeybindHelp));
        } else {
            self.overlays_mut().push(Overlay::KeybindHelp);
        }
    }

    /// Pushes a message overlay that lasts for the specified duration.
    pub(crate) fn push_overlay_message(&mut self, text: String, duration: Duration) {
        self.notification_time = Some(Instant::now() + duration);

        if matches!(self.overlays.top(), Some(Overlay::Message { .. })) {
            self.overlays_mut().pop();
        }

        self.overlays_mut().push(Overlay::Message { text });
    }
}
