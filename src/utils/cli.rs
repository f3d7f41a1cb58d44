//! Command-line argument parsing and help for sprig.
//!
//! This module handles all CLI flag parsing used for config initialization and help.
//!
//! When invoked with no args/flags (sprig), sprig simply launches the TUI in the current directory.

use crate::config::Config;

use clap::Parser;
use std::path::PathBuf;

/// A keyboard-driven terminal tree browser with syntax-highlighted previews
#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n  SPRIG_CONFIG    Override the default config path\n  SPRIG_LOG       Log filter (eg. \"debug\" or \"sprig_tui=trace\")\n  EDITOR          Editor used by the edit key")]
pub struct Args {
    /// Directory to open (defaults to current directory)
    #[arg(value_name = "PATH")]
    path: Option<String>,

    /// Path to the configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to the log file (default: <state dir>/sprig/sprig.log)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Generate the default configuration and exit
    #[arg(long)]
    init: bool,

    /// Display all the default keybinds and exit
    #[arg(long)]
    keybinds: bool,
}

/// What the entry point should do after argument parsing.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    Run(RunOptions),
    Exit,
}

#[derive(Debug, Default, PartialEq)]
pub struct RunOptions {
    pub path: Option<String>,
    pub config: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

/// Parses the process arguments. `--help`/`--version` and usage errors exit inside clap.
pub fn handle_args() -> CliAction {
    dispatch(Args::parse())
}

fn dispatch(args: Args) -> CliAction {
    if args.keybinds {
        print_keybinds();
        return CliAction::Exit;
    }

    if args.init {
        let path = args.config.unwrap_or_else(Config::default_path);
        if let Err(e) = Config::generate_default(&path) {
            eprintln!("Error: {}", e);
        }
        return CliAction::Exit;
    }

    CliAction::Run(RunOptions {
        path: args.path.filter(|p| !p.trim().is_empty()),
        config: args.config,
        log_file: args.log_file,
    })
}

const KEYBINDS_TEXT: &str = r##"
=========================
 Key Bindings
=========================
[keys]
  select                    ["Enter", "Space"]   (expand/collapse a directory, preview a file)
  up                        ["k", "Up"]
  down                      ["j", "Down"]
  expand                    ["l", "Right"]
  collapse                  ["h", "Left"]        (or move to the parent directory)
  top                       ["g", "Home"]
  bottom                    ["G", "End"]
  page_up                   ["PageUp", "Ctrl+u"]
  page_down                 ["PageDown", "Ctrl+d"]
  toggle_focus              ["Tab"]              (switch between tree and preview)
  edit                      ["e"]                (open the current file in $EDITOR)
  help                      ["?"]
  quit                      ["q", "Ctrl+c"]

  Esc                       close help, or return focus to the tree

  Syntax Reference:
    Modifiers: <c-x> (Ctrl), <m-x>/<a-x> (Alt/Meta), <s-x> (Shift)
    Standard:  ctrl+x, alt+x, shift+x, meta+x
    Special:   "space", "back", "enter", "esc", "tab", "home", "end", "pageup", "pagedown", "f1".."f12"

  Note:
    - Shorthand (c-, m-, s-) only works inside brackets <>.
"##;

fn print_keybinds() {
    println!("{}", KEYBINDS_TEXT);
}
