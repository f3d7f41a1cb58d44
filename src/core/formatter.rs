//! Ordering, filtering and display formatting helpers for sprig.
//!
//! The [Formatter] struct holds the rules for turning a raw directory listing into
//! tree children, based on user preferences from the sprig.toml configuration.
//!
//! Also holds the width helpers used by the tree and preview panes.

use crate::config::EntryOrder;
use crate::core::fs::DirEntryInfo;

use unicode_width::UnicodeWidthChar;

use std::cmp::Ordering;

/// Formatter struct to handle ordering and filtering of directory entries
/// based on user preferences.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    order: EntryOrder,
    show_hidden: bool,
}

impl Formatter {
    pub fn new(order: EntryOrder, show_hidden: bool) -> Self {
        Self { order, show_hidden }
    }

    /// Orders the given entries in place. [EntryOrder::Native] leaves them untouched.
    pub fn sort_entries(&self, entries: &mut [DirEntryInfo]) {
        match self.order {
            EntryOrder::Native => {}
            EntryOrder::Name => entries.sort_by(compare_names),
            EntryOrder::DirsFirst => entries.sort_by(|a, b| {
                match (a.kind().is_dir(), b.kind().is_dir()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => compare_names(a, b),
                }
            }),
        }
    }

    /// Filters the given entries in place, then orders them.
    pub fn filter_entries(&self, entries: &mut Vec<DirEntryInfo>) {
        if !self.show_hidden {
            entries.retain(|e| !e.is_hidden());
        }
        self.sort_entries(entries);
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::new(EntryOrder::Native, true)
    }
}

fn compare_names(a: &DirEntryInfo, b: &DirEntryInfo) -> Ordering {
    let a_name = a.name().to_string_lossy().to_lowercase();
    let b_name = b.name().to_string_lossy().to_lowercase();
    a_name.cmp(&b_name)
}

/// Clips a label to `max_width` terminal columns, dropping control characters.
///
/// Labels that do not fit end with `…`.
pub fn clip_to_width(label: &str, max_width: usize) -> String {
    let mut out = String::with_capacity(label.len().min(max_width * 4));
    let mut current_w = 0;
    let total: usize = label
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| c.width().unwrap_or(0))
        .sum();

    if total <= max_width {
        out.extend(label.chars().filter(|c| !c.is_control()));
        return out;
    }
    if max_width == 0 {
        return out;
    }

    for char in label.chars() {
        if char.is_control() {
            continue;
        }
        let w = char.width().unwrap_or(0);
        if current_w + w > max_width - 1 {
            break;
        }
        out.push(char);
        current_w += w;
    }
    out.push('…');
    out
}

/// Expands tab characters to the next multiple of `tab_width` columns.
///
/// Columns restart after every newline. ANSI escape sequences are copied through
/// without advancing the column.
pub fn expand_tabs(text: &str, tab_width: usize) -> String {
    if !text.contains('\t') || tab_width == 0 {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + 16);
    let mut column = 0;
    let mut in_escape = false;

    for char in text.chars() {
        if in_escape {
            out.push(char);
            if char.is_ascii_alphabetic() {
                in_escape = false;
            }
            continue;
        }
        match char {
            '\x1b' => {
                in_escape = true;
                out.push(char);
            }
            '\t' => {
                let space_count = tab_width - (column % tab_width);
                out.extend(std::iter::repeat_n(' ', space_count));
                column += space_count;
            }
            '\n' => {
                out.push(char);
                column = 0;
            }
            _ => {
                out.push(char);
                column += char.width().unwrap_or(0);
            }
        }
    }
    out
}
