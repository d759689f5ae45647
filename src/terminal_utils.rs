use std::io;

use crossterm::{
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use ratatui::{DefaultTerminal, Terminal, prelude::CrosstermBackend};

use anyhow::{Context, Result};

/// Runs `f` on the alternate screen in raw mode.
///
/// The terminal is restored whether or not `f` succeeds; an error from `f`
/// wins over an error from restoring.
pub fn with_terminal<T>(
    f: impl FnOnce(&mut DefaultTerminal) -> Result<T>,
) -> Result<T> {
    let mut terminal = init()?;
    let result = f(&mut terminal);
    let restored = restore(terminal);

    let value = result?;
    restored?;
    Ok(value)
}

fn init() -> Result<DefaultTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("Failed to enter alternate screen");
    }
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore(mut terminal: DefaultTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
