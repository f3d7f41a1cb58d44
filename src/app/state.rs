//! Application State and main controller module for sprig.
//!
//! This module defines the overall [AppState] struct, which holds all major application
//! information and passes it to relevant UI/Terminal functions
//! - Configuration (loaded from config files) and the keymap built from it
//! - The tree model, the cursor over its visible rows and the preview pane
//! - The focus state machine
//! - The filesystem, renderer and editor collaborators
//! - Notification and message handling
//!
//! This is the primary context/state object passed to most UI/Terminal event logic.

use crate::app::focus::FocusMachine;
use crate::app::keymap::{Action, Keymap};
use crate::app::{NavState, PreviewState};
use crate::config::Config;
use crate::core::editor::{
    EditorCommand, EditorLauncher, ProcessLauncher, UiSuspend, resolve_system_editor,
};
use crate::core::error::EditorError;
use crate::core::fs::{FileSystem, LocalFs};
use crate::core::highlight::TokenRenderer;
use crate::core::tree::{NodeId, Tree, TreeNode};
use crate::ui::overlays::{Overlay, OverlayStack};

use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::layout::Rect;

use std::path::Path;
use std::time::Instant;

/// Enumeration for each individual keypress result processed.
///
/// Is used to process action logic correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypressResult {
    Continue,
    Consumed,
    Quit,
    /// The terminal was handed to an editor and needs a full redraw.
    OpenedEditor,
    /// An error was turned into a message. Redraw fully in case the terminal was touched.
    Recovered,
}

/// Pane geometry from the last draw, used for paging and mouse hit-testing.
///
/// Heights are inner heights, the areas include the borders.
#[derive(Debug, Clone, Copy)]
pub struct LayoutMetrics {
    pub tree_height: usize,
    pub preview_height: usize,
    pub tree_area: Rect,
    pub preview_area: Rect,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            tree_height: 20,
            preview_height: 20,
            tree_area: Rect::default(),
            preview_area: Rect::default(),
        }
    }
}

/// Picks the editor for an edit, given the configured `[editor] cmd`.
pub type EditorResolver = Box<dyn Fn(Option<&str>) -> Result<EditorCommand, EditorError>>;

/// Main struct which holds the central Application state of sprig
///
/// Functions are provided for the core event loop, input handling and notification
/// management. Input handlers live in [crate::app::handlers].
pub struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) keymap: Keymap,

    pub(super) metrics: LayoutMetrics,

    pub(super) tree: Tree,
    pub(super) nav: NavState,
    pub(super) preview: PreviewState,
    pub(super) focus: FocusMachine,

    pub(super) fs: Box<dyn FileSystem>,
    pub(super) renderer: TokenRenderer,
    pub(super) launcher: Box<dyn EditorLauncher>,
    pub(super) resolve_editor: EditorResolver,

    pub(super) notification_time: Option<Instant>,
    pub(super) overlays: OverlayStack,
}

impl<'a> AppState<'a> {
    /// Opens `root` on the local filesystem with the configured syntax theme.
    pub fn new(config: &'a Config, root: &Path) -> Self {
        Self::with_parts(
            config,
            root,
            Box::new(LocalFs),
            TokenRenderer::new(config.display().syntax_theme()),
            Box::new(ProcessLauncher),
        )
    }

    /// Builds the state around the given collaborators and selects the root.
    pub fn with_parts(
        config: &'a Config,
        root: &Path,
        fs: Box<dyn FileSystem>,
        renderer: TokenRenderer,
        launcher: Box<dyn EditorLauncher>,
    ) -> Self {
        let tree = Tree::new(root);
        let nav = NavState::new(&tree);

        let mut app = Self {
            config,
            keymap: Keymap::from_config(config.keys()),
            metrics: LayoutMetrics::default(),
            tree,
            nav,
            preview: PreviewState::default(),
            focus: FocusMachine::new(),
            fs,
            renderer,
            launcher,
            resolve_editor: Box::new(resolve_system_editor),
            notification_time: None,
            overlays: OverlayStack::new(),
        };

        tracing::info!(root = %root.display(), "opening tree");
        app.select_node(&NodeId::root());
        app
    }

    /// Replaces how the editor command is resolved.
    pub fn with_editor_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(Option<&str>) -> Result<EditorCommand, EditorError> + 'static,
    {
        self.resolve_editor = Box::new(resolver);
        self
    }

    // Getters/ accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    #[inline]
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    #[inline]
    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    #[inline]
    pub fn focus(&self) -> &FocusMachine {
        &self.focus
    }

    #[inline]
    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    #[inline]
    pub fn overlays(&self) -> &OverlayStack {
        &self.overlays
    }

    #[inline]
    pub fn overlays_mut(&mut self) -> &mut OverlayStack {
        &mut self.overlays
    }

    #[inline]
    pub fn notification_time(&self) -> &Option<Instant> {
        &self.notification_time
    }

    /// The node under the cursor.
    pub fn current_node(&self) -> Option<&TreeNode> {
        self.nav.selected_id().and_then(|id| self.tree.node(id))
    }

    pub fn update_layout_metrics(&mut self, metrics: LayoutMetrics) {
        self.metrics = metrics;
    }

    /// Expires timed messages.
    ///
    /// Is used by the main event loop. Returns true when a redraw is needed.
    pub fn tick(&mut self) -> bool {
        if let Some(expiry) = self.notification_time
            && Instant::now() >= expiry
        {
            self.notification_time = None;
            self.overlays_mut()
                .retain(|o| !matches!(o, Overlay::Message { .. }));
            return true;
        }
        false
    }

    /// Central key handler
    ///
    /// `ui` is what gets suspended while an editor runs.
    pub fn handle_keypress(&mut self, key: KeyEvent, ui: &mut dyn UiSuspend) -> KeypressResult {
        if key.code == KeyCode::Esc {
            return self.handle_esc();
        }

        match self.keymap.lookup(key) {
            Some(Action::System(sys_act)) => self.handle_sys_action(sys_act),
            Some(Action::Focus(focus_act)) => self.handle_focus_action(focus_act, ui),
            Some(Action::Nav(nav_act)) => self.handle_nav_action(nav_act),
            None => KeypressResult::Continue,
        }
    }

    /// Central mouse handler. Hit-testing uses the pane areas from the last draw.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> KeypressResult {
        self.handle_mouse_event(mouse)
    }
}
