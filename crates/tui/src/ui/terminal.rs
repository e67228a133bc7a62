use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::error::{AppError, Result};

pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Switches to raw mode and the alternate screen. A failure halfway leaves
/// the terminal as it was found.
pub fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().map_err(|err| terminal_error("enable raw mode", err))?;

    let mut stdout = io::stdout();
    let entered = execute!(stdout, EnterAlternateScreen)
        .map_err(|err| terminal_error("enter alternate screen", err))
        .and_then(|()| {
            Terminal::new(CrosstermBackend::new(stdout))
                .map_err(|err| terminal_error("create terminal", err))
        });

    if entered.is_err() {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
    entered
}

/// Undoes [`setup_terminal`]. Every step is attempted; the first failure is
/// reported.
pub fn restore_terminal(terminal: &mut AppTerminal) -> Result<()> {
    let raw = disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err));
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|err| terminal_error("leave alternate screen", err));
    let cursor = terminal
        .show_cursor()
        .map_err(|err| terminal_error("show cursor", err));
    raw.and(screen).and(cursor)
}

fn terminal_error(step: &str, err: io::Error) -> AppError {
    AppError::Terminal(format!("cannot {step}: {err}"))
}
