//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::consts::cli_consts::polling;
use crate::environment::Environment;
use crate::ui::dashboard::{DashboardState, UserAction, render_dashboard};
use crate::workers::{WorkerContext, WorkerMessage};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{Terminal, backend::Backend};
use std::time::Instant;
use tokio::sync::{broadcast, mpsc};
use tokio::time::MissedTickBehavior;

/// What a key press means in the current state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyCommand {
    Quit,
    Action(UserAction),
}

/// Maps a key press to a command. The reset prompt captures Y/N and Esc.
pub fn map_key(key: KeyEvent, confirm_reset: bool) -> Option<KeyCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(KeyCommand::Quit);
    }

    if confirm_reset {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                Some(KeyCommand::Action(UserAction::ConfirmReset(true)))
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                Some(KeyCommand::Action(UserAction::ConfirmReset(false)))
            }
            KeyCode::Char('q') => Some(KeyCommand::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(KeyCommand::Quit),
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(KeyCommand::Action(UserAction::Cast(true))),
        KeyCode::Char('n') | KeyCode::Char('N') => {
            Some(KeyCommand::Action(UserAction::Cast(false)))
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            Some(KeyCommand::Action(UserAction::RequestReset))
        }
        KeyCode::Down | KeyCode::Char('j') => Some(KeyCommand::Action(UserAction::SelectNext)),
        KeyCode::Up | KeyCode::Char('k') => Some(KeyCommand::Action(UserAction::SelectPrevious)),
        _ => None,
    }
}

/// Application state
pub struct App {
    /// Everything the dashboard shows.
    state: DashboardState,

    /// Receives messages from poll and submission tasks.
    worker_receiver: mpsc::Receiver<WorkerMessage>,

    /// Starts submissions and resyncs.
    context: WorkerContext,

    /// Broadcasts shutdown signal to worker tasks.
    shutdown_sender: broadcast::Sender<()>,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        environment: Environment,
        worker_receiver: mpsc::Receiver<WorkerMessage>,
        context: WorkerContext,
        shutdown_sender: broadcast::Sender<()>,
        with_background_color: bool,
    ) -> Self {
        Self {
            state: DashboardState::new(environment, Instant::now(), with_background_color),
            worker_receiver,
            context,
            shutdown_sender,
        }
    }

    fn handle_message(&mut self, message: WorkerMessage) {
        for effect in self.state.handle(message) {
            self.context.execute(effect);
        }
    }

    /// Returns false when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match map_key(key, self.state.confirm_reset()) {
            Some(KeyCommand::Quit) => false,
            Some(KeyCommand::Action(action)) => {
                for effect in self.state.apply_action(action) {
                    self.context.execute(effect);
                }
                true
            }
            None => true,
        }
    }
}

/// Runs the dashboard until the user quits or a shutdown is broadcast.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let mut key_events = EventStream::new();
    let mut redraw = tokio::time::interval(polling::ui_tick());
    redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut shutdown_receiver = app.shutdown_sender.subscribe();

    loop {
        terminal.draw(|f| render_dashboard(f, &app.state))?;

        tokio::select! {
            _ = redraw.tick() => {}
            Some(message) = app.worker_receiver.recv() => {
                app.handle_message(message);
                // Drain whatever else is queued before the next draw
                while let Ok(message) = app.worker_receiver.try_recv() {
                    app.handle_message(message);
                }
            }
            maybe_event = key_events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        // Skip events that are not KeyEventKind::Press
                        if key.kind == KeyEventKind::Release {
                            continue;
                        }
                        if !app.handle_key(key) {
                            let _ = app.shutdown_sender.send(());
                            return Ok(());
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e),
                    None => {
                        let _ = app.shutdown_sender.send(());
                        return Ok(());
                    }
                }
            }
            _ = shutdown_receiver.recv() => return Ok(()),
        }
    }
}
