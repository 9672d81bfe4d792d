//! Unified messaging system for session operations

use crate::environment::Environment;
use crate::view::{Connectivity, DashboardView, VoterListView, ViewMode};

// ANSI Color Codes for session messages
pub const COLOR_INFO: &str = "\x1b[1;36m"; // Bold Cyan
pub const COLOR_SUCCESS: &str = "\x1b[1;32m"; // Bold Green
pub const COLOR_RESET: &str = "\x1b[0m";

/// Session-specific message types
#[derive(Debug, Clone)]
pub enum SessionMessage {
    /// Normal session start/shutdown messages
    Info(String),
    /// Success messages for completed operations
    Success(String),
}

impl SessionMessage {
    /// Create an info message
    pub fn info(msg: impl Into<String>) -> Self {
        Self::Info(msg.into())
    }

    /// Create a success message
    pub fn success(msg: impl Into<String>) -> Self {
        Self::Success(msg.into())
    }

    /// Print the message with appropriate formatting
    pub fn print(&self) {
        match self {
            Self::Info(msg) => {
                println!("{}[INFO]{} {}", COLOR_INFO, COLOR_RESET, msg);
            }
            Self::Success(msg) => {
                println!("{}[SUCCESS]{} {}", COLOR_SUCCESS, COLOR_RESET, msg);
            }
        }
    }
}

/// Print session startup message
pub fn print_session_starting(mode: &str, environment: &Environment) {
    SessionMessage::info(format!(
        "Starting {} mode against ledger at {}",
        mode,
        environment.ledger_url()
    ))
    .print();
}

/// Print session shutdown message
pub fn print_session_shutdown() {
    SessionMessage::info("Shutting down...").print();
}

/// Print session exit message
pub fn print_session_exit_success() {
    SessionMessage::success("VoteChain dashboard exited successfully").print();
}

/// One line describing the tally, the session and the ledger link.
pub fn format_summary_line(view: &DashboardView) -> String {
    let session = match view.mode {
        ViewMode::Active => "open".to_string(),
        ViewMode::Finished { voted, total } => format!("finished ({}/{})", voted, total),
    };
    format!(
        "YES {} ({:.0}%) | NO {} ({:.0}%) | total {} | session {} | ledger {}",
        view.tally.yes_votes,
        view.tally.yes.width,
        view.tally.no_votes,
        view.tally.no.width,
        view.tally.total_votes,
        session,
        connectivity_text(&view.connectivity)
    )
}

/// Multi-line plain text rendering of the whole dashboard.
pub fn format_status_report(view: &DashboardView) -> String {
    let mut lines = vec![format!("Ledger: {}", connectivity_text(&view.connectivity))];
    if let Connectivity::Connected {
        contract_address, ..
    } = &view.connectivity
    {
        lines.push(format!("Contract: {}", contract_address));
    }

    lines.push(String::new());
    lines.push(format!(
        "Results: YES {} | NO {} | Total {}",
        view.tally.yes_votes, view.tally.no_votes, view.tally.total_votes
    ));
    lines.push(format!(
        "  YES {:>5.1}%  NO {:>5.1}%",
        view.tally.yes.width, view.tally.no.width
    ));

    lines.push(String::new());
    match view.mode {
        ViewMode::Active => {
            lines.push("Session: open".to_string());
            for option in &view.accounts {
                let marker = if view.selected.as_deref() == Some(option.address.as_str()) {
                    "▶"
                } else {
                    " "
                };
                lines.push(format!("{} {}", marker, option.label));
            }
            if view.exhausted {
                lines.push(crate::view::EXHAUSTED_MESSAGE.to_string());
            }
        }
        ViewMode::Finished { voted, total } => {
            lines.push(format!("Session: finished, {} of {} accounts voted", voted, total));
        }
    }

    lines.push(String::new());
    match &view.voters {
        VoterListView::Placeholder(text) => lines.push(text.to_string()),
        VoterListView::Entries(entries) => lines.extend(entries.iter().cloned()),
    }

    lines.join("\n")
}

fn connectivity_text(connectivity: &Connectivity) -> String {
    match connectivity {
        Connectivity::Unknown => "unknown".to_string(),
        Connectivity::Connected {
            contract_short,
            block_number,
            ..
        } => format!("connected to {} at block {}", contract_short, block_number),
        Connectivity::Disconnected => "disconnected".to_string(),
    }
}
