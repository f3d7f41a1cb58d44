//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop and the
//! layout helpers that split the screen into the tree and preview chunks.
//!
//! This module should stay mostly "pure rendering": it reads state + config and
//! produces widgets, without owning sprig core logic.

use crate::app::{AppState, LayoutMetrics};
use crate::ui::{
    overlays::Overlay,
    panes::{self, PaneContext, PaneStyles},
    widgets,
};
use crate::utils::shorten_home_path;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
};

/// Render function which renders the entire terminal UI for sprig on each frame.
pub fn render(frame: &mut Frame, app: &mut AppState) {
    let area = frame.area();
    let metrics = calculate_layout_metrics(area, app);
    app.update_layout_metrics(metrics);

    let app = &*app;
    let theme_cfg = app.config().theme();
    let accent_style = theme_cfg.accent_style();
    let [tree_area, preview_area] = layout_chunks(area, app);

    let tree_title = format!(" {} ", shorten_home_path(app.tree().root().path()));
    panes::draw_tree(
        frame,
        app,
        PaneContext {
            area: tree_area,
            block: widgets::get_pane_block(&tree_title, app.focus().tree_focused(), app),
            styles: PaneStyles {
                root: theme_cfg.root_style(),
                dir: theme_cfg.directory_style(),
                file: theme_cfg.file_style(),
                selection: theme_cfg.selection_style(),
            },
        },
    );

    let title = format!(" {} ", app.preview().title());
    panes::draw_preview(
        frame,
        app,
        PaneContext {
            area: preview_area,
            block: widgets::get_pane_block(&title, app.focus().preview_focused(), app),
            styles: PaneStyles {
                root: theme_cfg.root_style(),
                dir: theme_cfg.directory_style(),
                file: theme_cfg.file_style(),
                selection: Style::default(),
            },
        },
    );

    render_overlays(frame, app, accent_style);
}

/// Returns the tree and preview areas.
///
/// The tree gets its configured width, clamped to the screen. The preview fills the rest.
pub fn layout_chunks(size: Rect, app: &AppState) -> [Rect; 2] {
    let tree_width = app.config().display().tree_width().min(size.width);
    Layout::horizontal([Constraint::Length(tree_width), Constraint::Min(0)]).areas(size)
}

fn render_overlays(frame: &mut Frame, app: &AppState, accent_style: Style) {
    for overlay in app.overlays().iter() {
        match overlay {
            Overlay::Message { text } => {
                widgets::draw_message_overlay(frame, app, accent_style, text);
            }
            Overlay::KeybindHelp => {
                widgets::draw_keybind_help(frame, app, accent_style);
            }
        }
    }
}

/// Helper function to calculate and return layout metrics
///
/// Used to store the pane areas and inner heights in the AppState for paging and clicks.
fn calculate_layout_metrics(area: Rect, app: &AppState) -> LayoutMetrics {
    let [tree_area, preview_area] = layout_chunks(area, app);
    LayoutMetrics {
        tree_height: tree_area.height.saturating_sub(2) as usize,
        preview_height: preview_area.height.saturating_sub(2) as usize,
        tree_area,
        preview_area,
    }
}
