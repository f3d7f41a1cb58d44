//! Cursor state over the visible rows of the tree.
//!
//! The rows are the depth-first flattening of the expanded part of the tree. They are rebuilt
//! after every structural change with [NavState::sync], which keeps the cursor on the same
//! node when it is still visible.

use crate::core::tree::{NodeId, Tree, VisibleRow};

/// Holds the visible rows and the cursor of the tree pane.
#[derive(Debug)]
pub struct NavState {
    rows: Vec<VisibleRow>,
    selected: usize,
}

impl NavState {
    pub fn new(tree: &Tree) -> Self {
        Self {
            rows: tree.visible_rows(),
            selected: 0,
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn rows(&self) -> &[VisibleRow] {
        &self.rows
    }

    #[inline]
    pub fn selected_idx(&self) -> usize {
        self.selected
    }

    pub fn selected_id(&self) -> Option<&NodeId> {
        self.rows.get(self.selected).map(|row| &row.id)
    }

    // Navigation functions

    /// Rebuilds the rows from the tree, keeping the cursor on the same node if possible.
    pub fn sync(&mut self, tree: &Tree) {
        let current = self.selected_id().cloned();
        self.rows = tree.visible_rows();
        match current.and_then(|id| self.rows.iter().position(|row| row.id == id)) {
            Some(idx) => self.selected = idx,
            None => self.selected = self.selected.min(self.rows.len().saturating_sub(1)),
        }
    }

    /// Moves the cursor to the row of `id`. Returns `false` if it is not visible.
    pub fn select_id(&mut self, id: &NodeId) -> bool {
        match self.rows.iter().position(|row| &row.id == id) {
            Some(idx) => {
                self.selected = idx;
                true
            }
            None => false,
        }
    }

    /// Moves the selection up by one entry, wrapping around if necessary.
    /// Returns `true` if the selection was moved, `false` if there are no entries.
    pub fn move_up(&mut self) -> bool {
        let len = self.rows.len();
        if len == 0 {
            return false;
        }

        if self.selected == 0 {
            self.selected = len - 1;
        } else {
            self.selected -= 1;
        }
        true
    }

    /// Moves the selection down by one entry, wrapping around if necessary.
    /// Returns `true` if the selection was moved, `false` if there are no entries.
    pub fn move_down(&mut self) -> bool {
        let len = self.rows.len();
        if len == 0 {
            return false;
        }

        self.selected = (self.selected + 1) % len;
        true
    }

    pub fn move_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn move_to_bottom(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }

    /// Page movement clamps at the ends instead of wrapping.
    pub fn page_up(&mut self, page: usize) {
        self.selected = self.selected.saturating_sub(page.max(1));
    }

    pub fn page_down(&mut self, page: usize) {
        self.selected = (self.selected + page.max(1)).min(self.rows.len().saturating_sub(1));
    }

    /// First row shown in a pane `height` rows tall: the cursor sits on the last row once it
    /// moves past the first screen.
    pub fn scroll_offset(&self, height: usize) -> usize {
        (self.selected + 1).saturating_sub(height.max(1))
    }
}
