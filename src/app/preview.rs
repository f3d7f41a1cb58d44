//! State and helpers for the preview pane in sprig.
//!
//! Holds the rendered markup of the last selected file (or the last error), the pane title
//! and the scroll offset used while the preview has focus.

use std::path::{Path, PathBuf};

pub const PREVIEW_TITLE: &str = "Preview";

/// What the preview currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewData {
    /// Rendered markup of a file.
    File(PathBuf),
    /// Error text in place of content.
    Error,
    Empty,
}

#[derive(Debug)]
pub struct PreviewState {
    data: PreviewData,
    title: String,
    content: String,
    line_count: usize,
    scroll: usize,
}

impl PreviewState {
    // Getters/ Accessors

    #[inline]
    pub fn data(&self) -> &PreviewData {
        &self.data
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Markup as produced by the renderer.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[inline]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn current_path(&self) -> Option<&Path> {
        match &self.data {
            PreviewData::File(path) => Some(path),
            _ => None,
        }
    }

    // Setters / mutators

    /// Shows a rendered file. The title becomes `Preview: <base name>`.
    pub fn set_file(&mut self, path: &Path, markup: String) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.title = format!("{PREVIEW_TITLE}: {name}");
        self.data = PreviewData::File(path.to_path_buf());
        self.set_content(markup);
    }

    /// Keeps the scroll position when the same file is shown again, eg. after editing.
    pub fn reload_file(&mut self, path: &Path, markup: String) {
        let scroll = if self.current_path() == Some(path) {
            self.scroll
        } else {
            0
        };
        self.set_file(path, markup);
        self.scroll = scroll.min(self.max_scroll());
    }

    /// Sets error text as the preview content
    pub fn set_error(&mut self, markup: String) {
        self.title = PREVIEW_TITLE.to_string();
        self.data = PreviewData::Error;
        self.set_content(markup);
    }

    fn set_content(&mut self, markup: String) {
        self.line_count = markup.lines().count();
        self.content = markup;
        self.scroll = 0;
    }

    fn max_scroll(&self) -> usize {
        self.line_count.saturating_sub(1)
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = (self.scroll + lines).min(self.max_scroll());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }
}

impl Default for PreviewState {
    fn default() -> Self {
        Self {
            data: PreviewData::Empty,
            title: PREVIEW_TITLE.to_string(),
            content: String::new(),
            line_count: 0,
            scroll: 0,
        }
    }
}
