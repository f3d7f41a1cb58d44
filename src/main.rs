//! main.rs
//! Entry point for sprig

use sprig_tui::app::AppState;
use sprig_tui::config::Config;
use sprig_tui::core::terminal;
use sprig_tui::utils::cli::{CliAction, handle_args};
use sprig_tui::utils::{is_listable_directory, logging, resolve_initial_dir};

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::event::DisableMouseCapture,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        tracing::error!(%info, "panic");
        eprintln!("\n[sprig] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let options = match handle_args() {
        CliAction::Exit => return Ok(()),
        CliAction::Run(options) => options,
    };

    let log_path = options
        .log_file
        .clone()
        .unwrap_or_else(logging::default_log_path);
    if let Err(e) = logging::init(&log_path) {
        eprintln!("[sprig] Logging disabled ({}): {}", log_path.display(), e);
    }

    let config = Config::load(options.config.as_deref());

    let path_arg = options.path.as_deref().unwrap_or(".");
    let root = resolve_initial_dir(path_arg);
    if !is_listable_directory(&root) {
        tracing::error!(path = %root.display(), "initial path cannot be opened");
        eprintln!("\n[sprig] Error: Path '{}' cannot be opened.", path_arg);
        std::process::exit(1);
    }

    let root = std::fs::canonicalize(&root).unwrap_or(root);
    let mut app = AppState::new(&config, &root);
    let result = terminal::run_terminal(&mut app);
    tracing::info!("exiting");
    result
}
