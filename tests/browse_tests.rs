//! Browsing and editing scenarios for sprig
//!
//! These tests drive [AppState] with key events against real temporary directories.
//! The editor and the terminal are replaced by test doubles so no process or tty is needed.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sprig_tui::app::{AppState, FocusState, KeypressResult};
use sprig_tui::config::Config;
use sprig_tui::core::editor::{EditorCommand, EditorExit, EditorLauncher, UiSuspend};
use sprig_tui::core::fs::{DirEntryInfo, EntryKind, FileSystem, LocalFs};
use sprig_tui::core::highlight::TokenRenderer;
use sprig_tui::core::EditorError;
use sprig_tui::ui::overlays::Overlay;
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::{TempDir, tempdir};

type Log = Rc<RefCell<Vec<String>>>;

struct CountingUi {
    log: Log,
}

impl UiSuspend for CountingUi {
    fn suspend(&mut self) -> io::Result<()> {
        self.log.borrow_mut().push("suspend".into());
        Ok(())
    }

    fn resume(&mut self) -> io::Result<()> {
        self.log.borrow_mut().push("resume".into());
        Ok(())
    }
}

/// Writes `content` into the edited file and exits with `code`.
struct WritingLauncher {
    log: Log,
    content: &'static str,
    code: i32,
}

impl EditorLauncher for WritingLauncher {
    fn run(&mut self, cmd: &EditorCommand, path: &Path) -> io::Result<EditorExit> {
        self.log.borrow_mut().push(format!("run {}", cmd.program()));
        fs::write(path, self.content)?;
        Ok(EditorExit {
            success: self.code == 0,
            code: Some(self.code),
        })
    }
}

/// Local filesystem that refuses to list one directory.
struct DenyingFs {
    denied: PathBuf,
}

impl FileSystem for DenyingFs {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
        if path == self.denied {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        LocalFs.list_dir(path)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        LocalFs.read_file(path)
    }

    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        LocalFs.stat(path)
    }
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn demo_dir() -> Result<TempDir, Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.txt"), "hello")?;
    fs::create_dir(dir.path().join("b"))?;
    fs::write(
        dir.path().join("b").join("c.go"),
        "package main\n\nfunc main() {\n\treturn\n}\n",
    )?;
    Ok(dir)
}

fn sorted_config() -> Result<Config, Box<dyn std::error::Error>> {
    Ok(Config::parse("[general]\nentry_order = \"dirs_first\"")?)
}

fn app_with<'c>(
    config: &'c Config,
    root: &Path,
    fs: Box<dyn FileSystem>,
    launcher: Box<dyn EditorLauncher>,
) -> AppState<'c> {
    AppState::with_parts(
        config,
        root,
        fs,
        TokenRenderer::new(config.display().syntax_theme()),
        launcher,
    )
    .with_editor_resolver(|_| {
        EditorCommand::parse("vim").ok_or(EditorError::NoEditor {
            candidates: String::new(),
        })
    })
}

fn labels(app: &AppState) -> Vec<String> {
    app.nav()
        .rows()
        .iter()
        .filter_map(|row| app.tree().node(&row.id))
        .skip(1)
        .map(|node| node.label().to_string())
        .collect()
}

fn move_to(app: &mut AppState, ui: &mut dyn UiSuspend, label: &str) {
    for _ in 0..app.nav().rows().len() {
        if app.current_node().is_some_and(|n| n.label() == label) {
            return;
        }
        app.handle_keypress(press(KeyCode::Down), ui);
    }
    panic!("{label} is not visible");
}

#[test]
fn test_browse_demo_directory() -> Result<(), Box<dyn std::error::Error>> {
    let dir = demo_dir()?;
    let config = sorted_config()?;
    let log = Log::default();
    let mut ui = CountingUi { log: Rc::clone(&log) };
    let launcher = WritingLauncher {
        log: Rc::clone(&log),
        content: "",
        code: 0,
    };
    let mut app = app_with(&config, dir.path(), Box::new(LocalFs), Box::new(launcher));

    assert_eq!(labels(&app), ["b", "a.txt"]);

    move_to(&mut app, &mut ui, "b");
    app.handle_keypress(press(KeyCode::Enter), &mut ui);
    assert_eq!(labels(&app), ["b", "c.go", "a.txt"]);

    move_to(&mut app, &mut ui, "c.go");
    app.handle_keypress(press(KeyCode::Enter), &mut ui);
    assert_eq!(app.preview().title(), "Preview: c.go");
    let content = app.preview().content();
    assert!(content.contains("\x1b["), "go source should be colored");
    assert!(content.contains("package"));

    move_to(&mut app, &mut ui, "a.txt");
    app.handle_keypress(press(KeyCode::Enter), &mut ui);
    assert_eq!(app.preview().content(), "hello");
    assert!(log.borrow().is_empty());
    Ok(())
}

#[test]
fn test_new_entries_appear_only_with_refresh() -> Result<(), Box<dyn std::error::Error>> {
    let dir = demo_dir()?;
    let log = Log::default();
    let mut ui = CountingUi { log: Rc::clone(&log) };

    let cases = [
        (false, vec!["b", "c.go", "a.txt"]),
        (true, vec!["b", "c.go", "d.rs", "a.txt"]),
    ];
    for (refresh, expected) in cases {
        let config = Config::parse(&format!(
            "[general]\nentry_order = \"dirs_first\"\nrefresh_on_expand = {refresh}"
        ))?;
        let launcher = WritingLauncher {
            log: Rc::clone(&log),
            content: "",
            code: 0,
        };
        let mut app = app_with(&config, dir.path(), Box::new(LocalFs), Box::new(launcher));

        move_to(&mut app, &mut ui, "b");
        app.handle_keypress(press(KeyCode::Enter), &mut ui);
        app.handle_keypress(press(KeyCode::Enter), &mut ui);
        fs::write(dir.path().join("b").join("d.rs"), "fn main() {}")?;
        app.handle_keypress(press(KeyCode::Enter), &mut ui);
        assert_eq!(labels(&app), expected);
        fs::remove_file(dir.path().join("b").join("d.rs"))?;
    }
    Ok(())
}

#[test]
fn test_permission_denied_directory() -> Result<(), Box<dyn std::error::Error>> {
    let dir = demo_dir()?;
    let config = sorted_config()?;
    let log = Log::default();
    let mut ui = CountingUi { log: Rc::clone(&log) };
    let launcher = WritingLauncher {
        log: Rc::clone(&log),
        content: "",
        code: 0,
    };
    let fs = DenyingFs {
        denied: dir.path().join("b"),
    };
    let mut app = app_with(&config, dir.path(), Box::new(fs), Box::new(launcher));

    move_to(&mut app, &mut ui, "b");
    let result = app.handle_keypress(press(KeyCode::Enter), &mut ui);
    assert_eq!(result, KeypressResult::Continue);

    let node = app.current_node().ok_or("cursor lost")?;
    assert!(!node.is_materialized());
    assert!(!node.is_expanded());
    assert!(app.preview().content().contains("Cannot list"));
    assert_eq!(labels(&app), ["b", "a.txt"]);

    app.handle_keypress(press(KeyCode::Down), &mut ui);
    app.handle_keypress(press(KeyCode::Enter), &mut ui);
    assert_eq!(app.preview().content(), "hello");
    Ok(())
}

#[test]
fn test_edit_reloads_preview() -> Result<(), Box<dyn std::error::Error>> {
    let dir = demo_dir()?;
    let config = sorted_config()?;
    let log = Log::default();
    let mut ui = CountingUi { log: Rc::clone(&log) };
    let launcher = WritingLauncher {
        log: Rc::clone(&log),
        content: "edited",
        code: 0,
    };
    let mut app = app_with(&config, dir.path(), Box::new(LocalFs), Box::new(launcher));

    move_to(&mut app, &mut ui, "a.txt");
    let result = app.handle_keypress(press(KeyCode::Char('e')), &mut ui);

    assert_eq!(result, KeypressResult::OpenedEditor);
    assert_eq!(*log.borrow(), ["suspend", "run vim", "resume"]);
    assert_eq!(app.focus().state(), FocusState::PreviewFocused);
    assert_eq!(app.preview().content(), "edited");
    assert_eq!(app.preview().title(), "Preview: a.txt");

    app.handle_keypress(press(KeyCode::Esc), &mut ui);
    assert_eq!(app.focus().state(), FocusState::TreeFocused);
    Ok(())
}

#[test]
fn test_edit_failure_exit_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let dir = demo_dir()?;
    let config = sorted_config()?;
    let log = Log::default();
    let mut ui = CountingUi { log: Rc::clone(&log) };
    let launcher = WritingLauncher {
        log: Rc::clone(&log),
        content: "partial",
        code: 1,
    };
    let mut app = app_with(&config, dir.path(), Box::new(LocalFs), Box::new(launcher));

    move_to(&mut app, &mut ui, "a.txt");
    let result = app.handle_keypress(press(KeyCode::Char('e')), &mut ui);

    assert_eq!(result, KeypressResult::OpenedEditor);
    assert_eq!(app.preview().content(), "partial");
    assert!(matches!(
        app.overlays().top(),
        Some(Overlay::Message { text }) if text.contains("status 1")
    ));
    Ok(())
}

#[test]
fn test_no_editor_available() -> Result<(), Box<dyn std::error::Error>> {
    let dir = demo_dir()?;
    let config = sorted_config()?;
    let log = Log::default();
    let mut ui = CountingUi { log: Rc::clone(&log) };
    let launcher = WritingLauncher {
        log: Rc::clone(&log),
        content: "never",
        code: 0,
    };
    let mut app = app_with(&config, dir.path(), Box::new(LocalFs), Box::new(launcher))
        .with_editor_resolver(|_| {
            Err(EditorError::NoEditor {
                candidates: "nvim, vim".into(),
            })
        });

    move_to(&mut app, &mut ui, "a.txt");
    app.handle_keypress(press(KeyCode::Enter), &mut ui);
    let result = app.handle_keypress(press(KeyCode::Char('e')), &mut ui);

    assert_eq!(result, KeypressResult::Recovered);
    assert!(log.borrow().is_empty(), "terminal must not be suspended");
    assert_eq!(app.focus().state(), FocusState::TreeFocused);
    assert_eq!(app.preview().content(), "hello");
    assert_eq!(fs::read_to_string(dir.path().join("a.txt"))?, "hello");
    assert!(matches!(app.overlays().top(), Some(Overlay::Message { .. })));
    Ok(())
}

#[test]
fn test_file_replaced_by_directory() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let x = dir.path().join("x");
    fs::write(&x, "was a file")?;
    let config = sorted_config()?;
    let log = Log::default();
    let mut ui = CountingUi { log: Rc::clone(&log) };
    let launcher = WritingLauncher {
        log: Rc::clone(&log),
        content: "never",
        code: 0,
    };
    let mut app = app_with(&config, dir.path(), Box::new(LocalFs), Box::new(launcher));
    assert_eq!(labels(&app), ["x"]);

    fs::remove_file(&x)?;
    fs::create_dir(&x)?;
    fs::write(x.join("inner"), "")?;

    move_to(&mut app, &mut ui, "x");
    app.handle_keypress(press(KeyCode::Enter), &mut ui);
    let node = app.current_node().ok_or("cursor lost")?;
    assert_eq!(node.kind(), EntryKind::Directory);
    assert!(!node.is_materialized());
    assert!(app.preview().content().contains("changed type"));
    assert_eq!(labels(&app), ["x"]);

    let result = app.handle_keypress(press(KeyCode::Char('e')), &mut ui);
    assert_eq!(result, KeypressResult::Continue);
    assert!(log.borrow().is_empty(), "a directory must never reach the editor");

    app.handle_keypress(press(KeyCode::Enter), &mut ui);
    assert_eq!(labels(&app), ["x", "inner"]);
    Ok(())
}
