//! Vote and reset submission
//!
//! Each submission runs in its own task. The lock it holds is handed back to the
//! dashboard as a [`WorkerMessage::ReleaseDue`] message, either `release_delay` after
//! the request settles or `max_hold` after it started, whichever comes first.

use super::core::{EventSender, SubmissionTimings, WorkerMessage};
use crate::error_classifier::ErrorClassifier;
use crate::events::EventType;
use crate::ledger::Ledger;
use crate::logging::LogLevel;
use crate::submission::{SubmissionAction, SubmissionId, SubmissionTicket, choice_text};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Schedules the delayed release of a submission lock when dropped.
///
/// Dropping on every exit path, including a panic in the request task, keeps the
/// controls from staying disabled.
struct ReleaseOnDrop {
    id: SubmissionId,
    delay: Duration,
    sender: mpsc::Sender<WorkerMessage>,
}

impl Drop for ReleaseOnDrop {
    fn drop(&mut self) {
        let Ok(handle) = Handle::try_current() else {
            return;
        };
        let id = self.id;
        let delay = self.delay;
        let sender = self.sender.clone();
        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(WorkerMessage::ReleaseDue(id)).await;
        });
    }
}

/// Issues the request described by `ticket` in the background.
pub fn spawn_submission(
    ledger: Arc<dyn Ledger>,
    ticket: SubmissionTicket,
    sender: mpsc::Sender<WorkerMessage>,
    timings: SubmissionTimings,
) -> JoinHandle<()> {
    let id = ticket.id;
    let ceiling = sender.clone();
    tokio::spawn(async move {
        tokio::time::sleep(timings.max_hold).await;
        let _ = ceiling.send(WorkerMessage::ReleaseDue(id)).await;
    });

    tokio::spawn(async move {
        let _release = ReleaseOnDrop {
            id,
            delay: timings.release_delay,
            sender: sender.clone(),
        };
        let events = EventSender::new(sender);
        submit(ledger.as_ref(), ticket, &events).await;
    })
}

async fn submit(ledger: &dyn Ledger, ticket: SubmissionTicket, events: &EventSender) {
    let started = match &ticket.action {
        SubmissionAction::Cast { choice, account } => format!(
            "Submitting {} vote from {}",
            choice_text(*choice),
            account
        ),
        SubmissionAction::Reset => "Submitting voting reset".to_string(),
    };
    events
        .send_submission_event(started, EventType::Waiting, LogLevel::Info)
        .await;

    let result = match &ticket.action {
        SubmissionAction::Cast { choice, account } => ledger.cast_vote(*choice, account).await,
        SubmissionAction::Reset => ledger.reset().await,
    };

    match &result {
        Ok(transaction_hash) => {
            let msg = match &ticket.action {
                SubmissionAction::Cast { .. } => {
                    format!("Vote recorded in transaction {}", transaction_hash)
                }
                SubmissionAction::Reset => {
                    format!("Voting reset in transaction {}", transaction_hash)
                }
            };
            events
                .send_submission_event(msg, EventType::Success, LogLevel::Info)
                .await;
        }
        Err(e) => {
            let log_level = ErrorClassifier::new().classify_submit_error(e);
            let msg = match &ticket.action {
                SubmissionAction::Cast { .. } => format!("Vote failed: {}", e),
                SubmissionAction::Reset => format!("Reset failed: {}", e),
            };
            log::error!("{}", msg);
            events
                .send_submission_event(msg, EventType::Error, log_level)
                .await;
        }
    }

    events
        .send_message(WorkerMessage::Submitted { ticket, result })
        .await;
}
