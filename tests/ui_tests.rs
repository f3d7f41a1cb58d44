//! UI-related tests for sprig
//!
//! These tests render full frames into a ratatui TestBackend and inspect the buffer:
//! pane layout, tree rows, the preview title and the overlays.
//!
//! These tests create temporary directories and files which are cleaned up afterwards.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::style::Color;
use sprig_tui::app::AppState;
use sprig_tui::config::Config;
use sprig_tui::core::clip_to_width;
use sprig_tui::core::editor::UiSuspend;
use sprig_tui::ui;
use std::error;
use std::fs;
use std::io;
use tempfile::tempdir;

struct NoopUi;

impl UiSuspend for NoopUi {
    fn suspend(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn resume(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn screen(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect())
        .collect()
}

#[test]
fn test_ui_clip_to_width() {
    let pane_width = 10;

    let cases = vec![
        ("short.txt", "short.txt"),
        ("very_long_filename.txt", "very_long…"),
        ("\t_tab", "_tab"),
    ];

    for (input, expected) in cases {
        let result = clip_to_width(input, pane_width);
        assert_eq!(result, expected, "input: {input:?}");

        let actual_width = unicode_width::UnicodeWidthStr::width(result.as_str());
        assert!(actual_width <= pane_width);
        assert!(!result.chars().any(|c| c.is_control()));
    }
}

#[test]
fn test_tree_and_preview_panes() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.txt"), "hello")?;
    fs::create_dir(dir.path().join("b"))?;

    let config =
        Config::parse("[general]\nentry_order = \"dirs_first\"\n[display]\ntree_width = 30")?;
    let mut app = AppState::new(&config, dir.path());
    let mut terminal = Terminal::new(TestBackend::new(80, 12))?;

    app.handle_keypress(press(KeyCode::Down), &mut NoopUi);
    app.handle_keypress(press(KeyCode::Down), &mut NoopUi);
    app.handle_keypress(press(KeyCode::Enter), &mut NoopUi);
    terminal.draw(|f| ui::render(f, &mut app))?;

    let lines = screen(&terminal);
    assert!(lines[1].starts_with("│▾ "), "root row: {:?}", lines[1]);
    assert!(lines[2].starts_with("│  ▸ b"), "dir row: {:?}", lines[2]);
    assert!(lines[3].starts_with("│    a.txt"), "file row: {:?}", lines[3]);
    assert!(lines[0].contains("Preview: a.txt"), "title: {:?}", lines[0]);
    assert!(lines[1].contains("hello"));

    assert_eq!(app.metrics().tree_height, 10);

    let buffer = terminal.backend().buffer();
    assert_eq!(buffer[(3, 2)].fg, Color::Green);
    assert_eq!(buffer[(5, 3)].bg, Color::Rgb(0x30, 0x30, 0x30));
    assert_eq!(buffer[(0, 0)].fg, Color::Cyan);
    Ok(())
}

#[test]
fn test_focus_moves_accent_border() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let config = Config::parse("[display]\ntree_width = 30")?;
    let mut app = AppState::new(&config, dir.path());
    let mut terminal = Terminal::new(TestBackend::new(80, 10))?;

    app.handle_keypress(press(KeyCode::Tab), &mut NoopUi);
    terminal.draw(|f| ui::render(f, &mut app))?;

    let buffer = terminal.backend().buffer();
    assert_eq!(buffer[(0, 0)].fg, Color::Reset);
    assert_eq!(buffer[(30, 0)].fg, Color::Cyan);
    Ok(())
}

#[test]
fn test_help_overlay_lists_bindings() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let config = Config::default();
    let mut app = AppState::new(&config, dir.path());
    let mut terminal = Terminal::new(TestBackend::new(100, 30))?;

    app.handle_keypress(press(KeyCode::Char('?')), &mut NoopUi);
    terminal.draw(|f| ui::render(f, &mut app))?;
    let text = screen(&terminal).join("\n");
    assert!(text.contains("Keybinds"));
    assert!(text.contains("Toggle tree/preview"));
    assert!(text.contains("q, Ctrl+c"));

    app.handle_keypress(press(KeyCode::Esc), &mut NoopUi);
    terminal.draw(|f| ui::render(f, &mut app))?;
    assert!(!screen(&terminal).join("\n").contains("Keybinds"));
    Ok(())
}

#[test]
fn test_long_names_are_clipped_in_narrow_tree() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a_really_long_file_name_for_a_narrow_pane.txt"), "")?;
    let config = Config::parse("[display]\ntree_width = 16")?;
    let mut app = AppState::new(&config, dir.path());
    let mut terminal = Terminal::new(TestBackend::new(60, 6))?;

    terminal.draw(|f| ui::render(f, &mut app))?;
    let lines = screen(&terminal);
    let row: String = lines[2].chars().take(16).collect();
    assert!(row.ends_with("…│"), "row: {row:?}");
    Ok(())
}

#[test]
fn test_click_selects_the_row_under_the_pointer() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.txt"), "hello")?;
    fs::create_dir(dir.path().join("b"))?;
    fs::write(dir.path().join("b").join("c.txt"), "inside")?;

    let config =
        Config::parse("[general]\nentry_order = \"dirs_first\"\n[display]\ntree_width = 30")?;
    let mut app = AppState::new(&config, dir.path());
    let mut terminal = Terminal::new(TestBackend::new(80, 12))?;
    terminal.draw(|f| ui::render(f, &mut app))?;

    app.handle_mouse(click(6, 3));
    terminal.draw(|f| ui::render(f, &mut app))?;
    let lines = screen(&terminal);
    assert!(lines[0].contains("Preview: a.txt"), "title: {:?}", lines[0]);
    assert!(lines[1].contains("hello"));

    app.handle_mouse(click(6, 2));
    terminal.draw(|f| ui::render(f, &mut app))?;
    let lines = screen(&terminal);
    assert!(lines[2].starts_with("│  ▾ b"), "dir row: {:?}", lines[2]);
    assert!(lines[3].starts_with("│    c.txt"), "child row: {:?}", lines[3]);
    Ok(())
}

#[test]
fn test_click_in_a_scrolled_tree() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    for i in 0..10 {
        fs::write(dir.path().join(format!("f{i}")), format!("{i}"))?;
    }

    let config = Config::parse("[general]\nentry_order = \"name\"\n[display]\ntree_width = 30")?;
    let mut app = AppState::new(&config, dir.path());
    let mut terminal = Terminal::new(TestBackend::new(80, 6))?;
    for _ in 0..10 {
        app.handle_keypress(press(KeyCode::Down), &mut NoopUi);
    }
    terminal.draw(|f| ui::render(f, &mut app))?;
    let lines = screen(&terminal);
    assert!(lines[1].contains("f6"), "first visible row: {:?}", lines[1]);
    assert!(lines[4].contains("f9"), "last visible row: {:?}", lines[4]);

    app.handle_mouse(click(6, 1));
    terminal.draw(|f| ui::render(f, &mut app))?;
    assert_eq!(app.current_node().map(|n| n.label()), Some("f6"));
    assert_eq!(app.preview().content(), "6");
    Ok(())
}
