//! UI pane drawing module for sprig.
//!
//! This module provides the drawers for the tree pane and the preview pane.
//! Row layout for the tree (indentation, expansion markers, clipping) is handled here.
//!
//! Used internally by ui::render

use crate::app::{AppState, PreviewData};
use crate::core::tree::TreeNode;
use crate::core::{clip_to_width, expand_tabs};
use ansi_to_tui::IntoText;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Block, List, ListItem, ListState, Paragraph, Wrap},
};

const INDENT: &str = "  ";
const EXPANDED_MARKER: &str = "▾ ";
const COLLAPSED_MARKER: &str = "▸ ";
const FILE_MARKER: &str = "  ";

/// Styles used for rendering rows in a pane
pub struct PaneStyles {
    pub root: Style,
    pub dir: Style,
    pub file: Style,
    pub selection: Style,
}

impl PaneStyles {
    pub fn get_style(&self, node: &TreeNode, is_root: bool) -> Style {
        if is_root {
            self.root
        } else if node.is_dir() {
            self.dir
        } else {
            self.file
        }
    }
}

/// Context data for pane rendering functions
pub struct PaneContext<'a> {
    pub area: Rect,
    pub block: Block<'a>,
    pub styles: PaneStyles,
}

/// Text of one tree row: indentation by depth, the expansion marker, then the label.
pub fn tree_row_label(node: &TreeNode, depth: usize) -> String {
    let marker = match (node.is_dir(), node.is_expanded()) {
        (true, true) => EXPANDED_MARKER,
        (true, false) => COLLAPSED_MARKER,
        (false, _) => FILE_MARKER,
    };
    format!("{}{marker}{}", INDENT.repeat(depth), node.label())
}

/// Draws the visible rows of the tree, highlighting the cursor row.
pub fn draw_tree(frame: &mut Frame, app: &AppState, context: PaneContext) {
    let inner_width = context.area.width.saturating_sub(2) as usize;
    let tree = app.tree();
    let rows = app.nav().rows();

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(node) = tree.node(&row.id) else {
            continue;
        };
        let label = clip_to_width(&tree_row_label(node, row.depth), inner_width);
        let style = context.styles.get_style(node, row.id.is_root());
        items.push(ListItem::new(label).style(style));
    }

    // same offset the mouse handler uses to map clicks to rows
    let inner_height = context.area.height.saturating_sub(2) as usize;
    let mut state = ListState::default().with_offset(app.nav().scroll_offset(inner_height));
    if !items.is_empty() {
        state.select(Some(app.nav().selected_idx()));
    }

    frame.render_stateful_widget(
        List::new(items)
            .block(context.block)
            .highlight_style(context.styles.selection),
        context.area,
        &mut state,
    );
}

/// Draws the preview markup, scrolled to the preview offset.
pub fn draw_preview(frame: &mut Frame, app: &AppState, context: PaneContext) {
    let display_cfg = app.config().display();
    let preview = app.preview();

    if *preview.data() == PreviewData::Empty {
        frame.render_widget(Paragraph::new("").block(context.block), context.area);
        return;
    }

    let raw = expand_tabs(preview.content(), display_cfg.tab_width());
    let text = raw.into_text().unwrap_or_else(|_| Text::from(raw));
    let scroll = u16::try_from(preview.scroll()).unwrap_or(u16::MAX);

    let mut paragraph = Paragraph::new(text)
        .block(context.block)
        .style(context.styles.file)
        .scroll((scroll, 0));
    if display_cfg.wrap_preview() {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }

    frame.render_widget(paragraph, context.area);
}
