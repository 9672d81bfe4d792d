//! Dashboard state management
//!
//! Single owner of the store, the account selector and the submission
//! controller. Workers report here through [`WorkerMessage`]s; user input arrives
//! as [`UserAction`]s. Both return the [`Effect`]s the caller must start.

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::logging::{LogLevel, get_rust_log_level};
use crate::selector::{AccountSelector, SelectError};
use crate::store::{Feed, StateStore};
use crate::submission::{SubmissionController, SubmissionTicket, SubmitError};
use crate::view::{DashboardView, ViewInputs, ViewMode, project};
use crate::workers::{Effect, WorkerMessage};

use std::collections::VecDeque;
use std::time::Instant;

/// Something the user asked for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Vote YES (`true`) or NO (`false`) from the selected account.
    Cast(bool),
    /// Open the reset confirmation prompt.
    RequestReset,
    /// Answer the reset confirmation prompt.
    ConfirmReset(bool),
    SelectNext,
    SelectPrevious,
}

#[derive(Debug)]
pub struct DashboardState {
    /// The ledger service being watched.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Events below this level never enter the activity log.
    log_threshold: LogLevel,

    store: StateStore,
    selector: AccountSelector,
    controller: SubmissionController,
    confirm_reset: bool,
}

impl DashboardState {
    pub fn new(environment: Environment, start_time: Instant, with_background_color: bool) -> Self {
        Self {
            environment,
            start_time,
            with_background_color,
            activity_logs: VecDeque::new(),
            log_threshold: get_rust_log_level(),
            store: StateStore::new(),
            selector: AccountSelector::new(),
            controller: SubmissionController::new(),
            confirm_reset: false,
        }
    }

    /// Applies one worker message.
    pub fn handle(&mut self, message: WorkerMessage) -> Vec<Effect> {
        match message {
            WorkerMessage::Feed(update) => {
                if self.store.apply(update) == Some(Feed::Accounts) {
                    let accounts = self.store.accounts().unwrap_or_default().to_vec();
                    self.selector.refresh(accounts);
                }
                Vec::new()
            }
            WorkerMessage::Submitted { ticket, result } => {
                if self.controller.complete(&ticket, &result).resync {
                    vec![Effect::ScheduleResync]
                } else {
                    Vec::new()
                }
            }
            WorkerMessage::ReleaseDue(id) => {
                if self.controller.release(id) {
                    log::debug!("Submission {} released", id);
                }
                Vec::new()
            }
            WorkerMessage::Event(event) => {
                self.add_to_activity_log(event);
                Vec::new()
            }
        }
    }

    /// Applies one user action.
    pub fn apply_action(&mut self, action: UserAction) -> Vec<Effect> {
        match action {
            UserAction::Cast(choice) => {
                if self.confirm_reset || self.is_finished() {
                    return Vec::new();
                }
                let ticket = self.controller.begin_cast(choice, self.selector.selected());
                self.submit(ticket)
            }
            UserAction::RequestReset => {
                if self.controller.controls_enabled() {
                    self.confirm_reset = true;
                }
                Vec::new()
            }
            UserAction::ConfirmReset(confirmed) => {
                if !self.confirm_reset {
                    return Vec::new();
                }
                self.confirm_reset = false;
                let ticket = self.controller.begin_reset(confirmed);
                self.submit(ticket)
            }
            UserAction::SelectNext => {
                if self.controller.controls_enabled() {
                    self.selector.select_next();
                }
                Vec::new()
            }
            UserAction::SelectPrevious => {
                if self.controller.controls_enabled() {
                    self.selector.select_previous();
                }
                Vec::new()
            }
        }
    }

    /// Explicitly picks the account to vote from.
    pub fn select_account(&mut self, address: &str) -> Result<(), SelectError> {
        self.selector.select(address)
    }

    fn submit(&mut self, ticket: Result<SubmissionTicket, SubmitError>) -> Vec<Effect> {
        match ticket {
            Ok(ticket) => vec![Effect::Submit(ticket)],
            Err(e) => {
                log::debug!("Submission not started: {}", e);
                Vec::new()
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.store.session().is_some_and(|session| session.all_voted)
    }

    /// Whether the reset confirmation prompt is open.
    pub fn confirm_reset(&self) -> bool {
        self.confirm_reset
    }

    pub fn selector(&self) -> &AccountSelector {
        &self.selector
    }

    pub fn controller(&self) -> &SubmissionController {
        &self.controller
    }

    pub fn view(&self, now: Instant) -> DashboardView {
        project(&ViewInputs {
            store: &self.store,
            selector: &self.selector,
            controller: &self.controller,
            confirm_reset: self.confirm_reset,
            now,
        })
    }

    pub fn mode(&self) -> ViewMode {
        self.view(Instant::now()).mode
    }

    /// Add an event to activity logs with size limit. Hidden events are dropped
    /// so per-tick refreshes cannot push out the ones on screen.
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if !event.should_display_at(self.log_threshold) {
            return;
        }
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }
}
