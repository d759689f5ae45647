//! CLI argument parser
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::dir_source::SourceKind;
use crate::picker::PickerKind;

/// Command-line argument parser for `tsesh`.
#[derive(Debug, Parser)]
#[command(name = "tsesh")]
#[command(
    about = "Spawn and manage tmux sessions with fuzzy-finding",
    long_about = "tsesh - Spawn and manage tmux sessions with fuzzy-finding.

Key Features:
 - Pick a directory and open a new session rooted there. Sessions are named
   after the directory with a sequence suffix (`proj - S01`, `proj - S02`).
 - Pick any running session/window/pane to switch to, rename or kill it.
 - Uses fzf when installed, a built-in picker otherwise.

Examples:
 tsesh new                 # pick a directory under $HOME
 tsesh new -s zoxide       # pick among frecent directories
 tsesh new ~/src/app       # open a session in ~/src/app right away
 tsesh manage              # Enter: switch, C-x: kill, C-r: rename

Use `tsesh <COMMAND> --help` for more details."
)]
pub struct Args {
    /// Fuzzy picker to use
    #[arg(
        long,
        global = true,
        value_enum,
        env = "TSESH_PICKER",
        default_value_t = PickerKind::Auto
    )]
    pub picker: PickerKind,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands for `tsesh`.
#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(
        about = "Open a new session in a picked directory",
        long_about = "Pick a directory and open a new tmux session rooted
there, then attach to it (or switch to it from inside tmux). The session is
named `<directory> - S<NN>`, one past the highest sequence in use.",
        alias = "n"
    )]
    New {
        /// Directory to open; skips the picker
        #[arg(conflicts_with = "source")]
        dir: Option<PathBuf>,

        /// Where candidate directories come from
        #[arg(long, short, value_enum)]
        source: Option<SourceKind>,

        /// Root of the directory walk (default: $HOME)
        #[arg(long, short, env = "TSESH_ROOT")]
        root: Option<PathBuf>,
    },

    #[command(
        about = "Switch to, rename or kill running sessions and panes",
        long_about = "Pick among every running pane, listed as
`session:window.pane`. Enter switches to the first pick, C-r renames the
picked sessions and C-x kills the picked panes. Tab marks several panes.",
        alias = "m"
    )]
    Manage,

    #[command(about = "Print a shell completion script")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
