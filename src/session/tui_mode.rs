//! TUI mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::ui;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::error::Error;
use std::io::{self, Stdout};

type DashboardTerminal = Terminal<CrosstermBackend<Stdout>>;

fn enter_terminal() -> io::Result<DashboardTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut DashboardTerminal) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Runs the dashboard until the user quits.
///
/// The terminal is restored before any error from the UI loop is returned.
pub async fn run_tui_mode(
    session: SessionData,
    with_background: bool,
) -> Result<(), Box<dyn Error>> {
    print_session_starting("TUI", &session.environment);

    let mut terminal = enter_terminal()?;
    let app = ui::App::new(
        session.environment.clone(),
        session.worker_receiver,
        session.context,
        session.shutdown_sender.clone(),
        with_background,
    );
    let result = ui::run(&mut terminal, app).await;
    restore_terminal(&mut terminal)?;
    result?;

    // Idle pollers stop at once; one mid-fetch stops after its request
    print_session_shutdown();
    for handle in session.join_handles {
        let _ = handle.await;
    }
    print_session_exit_success();

    Ok(())
}
