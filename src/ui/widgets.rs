//! Widget helpers for sprig: pane blocks and the overlay dialogs.
//!
//! Used by ui::render for the message overlay and the keybind help.

use crate::app::AppState;
use unicode_width::UnicodeWidthStr;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Where a dialog is anchored on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPosition {
    Center,
    BottomRight,
}

/// Bordered block for a pane. The focused pane gets the accent border.
pub fn get_pane_block(title: &str, focused: bool, app: &AppState) -> Block<'static> {
    let cfg = app.config();
    let border_style = if focused {
        cfg.theme().accent_style()
    } else {
        Style::default()
    };

    Block::default()
        .borders(Borders::ALL)
        .border_type(cfg.display().border_shape().as_border_type())
        .border_style(border_style)
        .title(title.to_string())
}

/// Rect of `width` x `height` placed inside `area`, clamped to it.
pub fn dialog_area(area: Rect, width: u16, height: u16, position: DialogPosition) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let (x, y) = match position {
        DialogPosition::Center => (
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
        ),
        DialogPosition::BottomRight => (
            area.x + area.width - width,
            area.y + area.height - height,
        ),
    };
    Rect::new(x, y, width, height)
}

fn draw_dialog<'t>(
    frame: &mut Frame,
    area: Rect,
    app: &AppState,
    border_style: Style,
    title: &str,
    text: impl Into<Text<'t>>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.config().display().border_shape().as_border_type())
        .border_style(border_style)
        .title(Span::styled(title.to_string(), border_style));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false }),
        area,
    );
}

/// Draws a timed message in the bottom right corner.
pub fn draw_message_overlay(frame: &mut Frame, app: &AppState, accent_style: Style, text: &str) {
    let mut max_line_width = 0;
    let mut line_count = 0;
    for line in text.lines() {
        max_line_width = max_line_width.max(line.width());
        line_count += 1;
    }

    let min_width = 27;
    let border_pad = 2;
    let right_pad = 2;
    let area = frame.area();

    let width =
        ((max_line_width + right_pad).max(min_width) + border_pad).min(area.width as usize) as u16;
    let height = ((line_count.max(1) + border_pad).min(area.height as usize)) as u16;

    let rect = dialog_area(area, width, height, DialogPosition::BottomRight);
    let style = Style::default().fg(app.config().theme().error_color());
    draw_dialog(
        frame,
        rect,
        app,
        accent_style,
        " Message ",
        Text::styled(text.to_string(), style),
    );
}

/// Draws the keybind help with the keys currently bound in `[keys]`.
pub fn draw_keybind_help(frame: &mut Frame, app: &AppState, accent_style: Style) {
    let keys = app.config().keys();
    let area = frame.area();

    let fmt_keys = |list: &[String]| -> String {
        if list.is_empty() {
            "-".to_string()
        } else {
            list.join(", ")
        }
    };

    let sections: Vec<(&str, Vec<(String, &'static str)>)> = vec![
        (
            "Tree",
            vec![
                (fmt_keys(keys.select()), "Expand/collapse or preview"),
                (fmt_keys(keys.up()), "Move up"),
                (fmt_keys(keys.down()), "Move down"),
                (fmt_keys(keys.expand()), "Expand / step into"),
                (fmt_keys(keys.collapse()), "Collapse / go to parent"),
                (fmt_keys(keys.top()), "Go to top"),
                (fmt_keys(keys.bottom()), "Go to bottom"),
                (fmt_keys(keys.page_up()), "Page up"),
                (fmt_keys(keys.page_down()), "Page down"),
            ],
        ),
        (
            "Focus",
            vec![
                (fmt_keys(keys.toggle_focus()), "Toggle tree/preview"),
                (fmt_keys(keys.edit()), "Edit file"),
                ("Esc".to_string(), "Back to tree / close help"),
            ],
        ),
        (
            "System",
            vec![
                (fmt_keys(keys.help()), "Toggle keybind help"),
                (fmt_keys(keys.quit()), "Quit"),
            ],
        ),
    ];

    let header_style = Style::default().add_modifier(Modifier::BOLD);
    let key_style = accent_style.add_modifier(Modifier::BOLD);

    let mut all_rows: Vec<Line> = Vec::new();
    for (section_name, rows) in sections {
        all_rows.push(Line::from(Span::styled(
            format!("{section_name}:"),
            header_style,
        )));
        for (k, desc) in rows {
            all_rows.push(Line::from(vec![
                Span::styled(format!("{k:<18}"), key_style),
                Span::raw("  "),
                Span::raw(desc),
            ]));
        }
        all_rows.push(Line::raw(""));
    }
    all_rows.pop();

    let height = (all_rows.len() as u16).saturating_add(2);
    let width = area.width.saturating_sub(6).clamp(40, 70);
    let rect = dialog_area(area, width, height, DialogPosition::Center);
    draw_dialog(frame, rect, app, accent_style, " Keybinds ", Text::from(all_rows));
}
