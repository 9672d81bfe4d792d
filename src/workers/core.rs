//! Core worker utilities and messages

use crate::consts::cli_consts::submission;
use crate::events::{Event, EventType};
use crate::ledger::Ledger;
use crate::ledger::error::LedgerError;
use crate::logging::LogLevel;
use crate::store::{Feed, FeedUpdate};
use crate::submission::{SubmissionId, SubmissionTicket};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Everything a worker reports to the owner of the dashboard state.
#[derive(Debug)]
pub enum WorkerMessage {
    /// A poll (scheduled or resync) finished.
    Feed(FeedUpdate),
    /// A vote or reset request came back.
    Submitted {
        ticket: SubmissionTicket,
        result: Result<String, LedgerError>,
    },
    /// The release delay of a submission elapsed.
    ReleaseDue(SubmissionId),
    /// Activity log entry.
    Event(Event),
}

/// Work the dashboard state asks the runtime to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Submit(SubmissionTicket),
    ScheduleResync,
}

/// Fixed delays around a submission.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SubmissionTimings {
    /// From a successful response to the full resync.
    pub resync_delay: Duration,
    /// From any response (or failure) to the lock release.
    pub release_delay: Duration,
    /// From the request start to a forced lock release.
    pub max_hold: Duration,
}

impl Default for SubmissionTimings {
    fn default() -> Self {
        Self {
            resync_delay: submission::resync_delay(),
            release_delay: submission::release_delay(),
            max_hold: submission::max_hold(),
        }
    }
}

/// Common message sending utilities for workers
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<WorkerMessage>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<WorkerMessage>) -> Self {
        Self { sender }
    }

    /// Send any message. Returns false once the receiving side is gone.
    pub async fn send_message(&self, message: WorkerMessage) -> bool {
        self.sender.send(message).await.is_ok()
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(WorkerMessage::Event(event)).await;
    }

    pub async fn send_poll_event(
        &self,
        feed: Feed,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::poller_with_level(
            feed, message, event_type, log_level,
        ))
        .await;
    }

    pub async fn send_submission_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::submitter_with_level(message, event_type, log_level))
            .await;
    }
}

/// Handles shared by everything that spawns work on behalf of the dashboard.
#[derive(Clone)]
pub struct WorkerContext {
    ledger: Arc<dyn Ledger>,
    sender: mpsc::Sender<WorkerMessage>,
    timings: SubmissionTimings,
}

impl WorkerContext {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        sender: mpsc::Sender<WorkerMessage>,
        timings: SubmissionTimings,
    ) -> Self {
        Self {
            ledger,
            sender,
            timings,
        }
    }

    /// Starts the work described by `effect`. Never blocks the caller.
    pub fn execute(&self, effect: Effect) {
        match effect {
            Effect::Submit(ticket) => {
                super::submitter::spawn_submission(
                    self.ledger.clone(),
                    ticket,
                    self.sender.clone(),
                    self.timings,
                );
            }
            Effect::ScheduleResync => {
                super::poller::spawn_resync(
                    self.ledger.clone(),
                    self.sender.clone(),
                    self.timings.resync_delay,
                );
            }
        }
    }
}
