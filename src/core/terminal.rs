//! Terminal rendering and event loop for sprig.
//!
//! Handles setup/teardown of raw mode, alternate screen and mouse capture, redraws,
//! and events (keypress, mouse, resize) to app logic. [CrosstermUi] hands the terminal to an
//! editor and takes it back.

use crate::app::{AppState, KeypressResult};
use crate::core::editor::UiSuspend;
use crate::ui;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::{io, time::Duration};

/// Raw mode, the alternate screen and mouse capture on stdout.
#[derive(Debug, Default)]
pub struct CrosstermUi;

impl UiSuspend for CrosstermUi {
    fn suspend(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen, Show)
    }

    fn resume(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)
    }
}

/// Initializes the terminal in raw mode and alternate sceen and runs the main event loop.
///
/// Blocks until quit. Handles all input and UI rendering.
///
/// Returns an std::io::Error if terminal setup or teardown fails.
pub fn run_terminal(app: &mut AppState) -> io::Result<()> {
    let mut screen = CrosstermUi;
    screen.resume()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = event_loop(&mut terminal, app, &mut screen);

    screen.suspend()?;
    result
}

/// Main event loop of sprig: draws UI, polls for events and dispatches them to the app.
/// Returns on quit
fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    screen: &mut dyn UiSuspend,
) -> io::Result<()>
where
    io::Error: From<<B as Backend>::Error>,
{
    terminal.draw(|f| ui::render(f, app))?;

    loop {
        if app.tick() {
            terminal.draw(|f| ui::render(f, app))?;
        }

        // Event Polling
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                // handle keypress
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match app.handle_keypress(key, screen) {
                        KeypressResult::Quit => break,
                        KeypressResult::OpenedEditor | KeypressResult::Recovered => {
                            // full clear/reset
                            terminal.clear()?;
                        }
                        KeypressResult::Continue | KeypressResult::Consumed => {}
                    }
                    // Redraw after state change
                    terminal.draw(|f| ui::render(f, app))?;
                }

                // handle mouse
                Event::Mouse(mouse) => {
                    if app.handle_mouse(mouse) != KeypressResult::Continue {
                        terminal.draw(|f| ui::render(f, app))?;
                    }
                }

                // handle resize
                Event::Resize(_, _) => {
                    terminal.draw(|f| ui::render(f, app))?;
                }

                _ => {}
            }
        }
    }
    Ok(())
}
