//! Overlay module to stack widgets and dialogs on top of the panes.
//! Handles timed messages and the keybind help.
//!
//! Is used by the ui render module and in handlers.rs.

use std::slice;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Timed message, expired by [crate::app::AppState::tick].
    Message { text: String },
    KeybindHelp,
}

#[derive(Debug)]
pub struct OverlayStack {
    overlays: Vec<Overlay>,
}

impl OverlayStack {
    pub fn new() -> Self {
        Self {
            overlays: Vec::new(),
        }
    }

    pub fn push(&mut self, overlay: Overlay) {
        self.overlays.push(overlay);
    }

    pub fn pop(&mut self) -> Option<Overlay> {
        self.overlays.pop()
    }

    pub fn top(&self) -> Option<&Overlay> {
        self.overlays.last()
    }

    pub fn iter(&self) -> slice::Iter<'_, Overlay> {
        self.overlays.iter()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Overlay) -> bool,
    {
        self.overlays.retain(f);
    }
}

impl Default for OverlayStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retain_drops_matching_overlays() {
        let mut stack = OverlayStack::new();
        stack.push(Overlay::KeybindHelp);
        stack.push(Overlay::Message { text: "hi".into() });
        assert_eq!(stack.len(), 2);

        stack.retain(|o| !matches!(o, Overlay::Message { .. }));
        assert_eq!(stack.top(), Some(&Overlay::KeybindHelp));
        assert_eq!(stack.pop(), Some(Overlay::KeybindHelp));
        assert!(stack.is_empty());
    }
}
