//! Headless mode execution

use super::{
    SessionData,
    messages::{
        format_summary_line, print_session_exit_success, print_session_shutdown,
        print_session_starting,
    },
};
use crate::logging::init_stderr_logger;
use crate::ui::dashboard::DashboardState;
use crate::workers::WorkerMessage;
use std::error::Error;
use std::time::Instant;

/// Runs the dashboard without a terminal UI
///
/// Displayable events are printed as they arrive, followed by a one-line
/// summary whenever the tally, session or ledger status changes.
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    init_stderr_logger();
    print_session_starting("headless", &session.environment);

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    let mut shutdown_receiver = session.shutdown_sender.subscribe();
    let mut state = DashboardState::new(session.environment.clone(), Instant::now(), false);
    let mut last_summary = String::new();

    // Event loop: log events to console until shutdown
    loop {
        tokio::select! {
            Some(message) = session.worker_receiver.recv() => {
                if let WorkerMessage::Event(event) = &message {
                    if event.should_display() {
                        println!("{}", event);
                    }
                }
                for effect in state.handle(message) {
                    session.context.execute(effect);
                }
                let summary = format_summary_line(&state.view(Instant::now()));
                if summary != last_summary {
                    println!("{}", summary);
                    last_summary = summary;
                }
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    print_session_shutdown();
    for handle in session.join_handles {
        let _ = handle.await;
    }
    print_session_exit_success();

    Ok(())
}
