//! Submission controller
//!
//! Owns the submission lock and the status banner. At most one vote or reset is
//! in flight at a time; the lock is taken before any request is issued and is only
//! released through [`SubmissionController::release`].

use crate::consts::cli_consts::display::{TX_HASH_CHARS, banner_ttl};
use crate::ledger::error::LedgerError;
use std::time::Instant;
use thiserror::Error;

pub type SubmissionId = u64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Please select an account")]
    NoAccount,
    #[error("Another submission is still in progress")]
    InFlight,
    #[error("Reset was not confirmed")]
    NotConfirmed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionAction {
    Cast { choice: bool, account: String },
    Reset,
}

impl SubmissionAction {
    fn pending_text(&self) -> String {
        match self {
            SubmissionAction::Cast { choice, .. } => {
                format!("Casting {} vote... Please wait.", choice_text(*choice))
            }
            SubmissionAction::Reset => "Resetting votes... Please wait.".to_string(),
        }
    }

    fn success_text(&self, transaction_hash: &str) -> String {
        let hash = short_hash(transaction_hash);
        match self {
            SubmissionAction::Cast { .. } => {
                format!("✓ Vote cast successfully! Transaction: {}", hash)
            }
            SubmissionAction::Reset => {
                format!("✓ Voting reset successfully! Transaction: {}", hash)
            }
        }
    }

    fn failure_text(&self, error: &LedgerError) -> String {
        if let Some(message) = error.service_message() {
            return message.to_string();
        }
        match self {
            SubmissionAction::Cast { .. } => format!("Error casting vote: {}", error),
            SubmissionAction::Reset => format!("Error resetting votes: {}", error),
        }
    }
}

/// Proof that the lock was taken for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub id: SubmissionId,
    pub action: SubmissionAction,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BannerKind {
    Pending,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
    pub shown_at: Instant,
}

impl Banner {
    fn new(kind: BannerKind, text: String) -> Self {
        Self {
            kind,
            text,
            shown_at: Instant::now(),
        }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < banner_ttl()
    }
}

/// What the caller should do after a submission finished.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Completion {
    pub resync: bool,
}

#[derive(Debug, Default)]
pub struct SubmissionController {
    in_flight: Option<SubmissionId>,
    last_id: SubmissionId,
    banner: Option<Banner>,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the lock for a vote from `account`.
    pub fn begin_cast(
        &mut self,
        choice: bool,
        account: Option<&str>,
    ) -> Result<SubmissionTicket, SubmitError> {
        if self.is_locked() {
            return Err(SubmitError::InFlight);
        }
        let account = match account {
            Some(account) if !account.trim().is_empty() => account.to_string(),
            _ => {
                self.set_banner(BannerKind::Error, SubmitError::NoAccount.to_string());
                return Err(SubmitError::NoAccount);
            }
        };
        Ok(self.acquire(SubmissionAction::Cast { choice, account }))
    }

    /// Takes the lock for a session reset. `confirmed` is the user's answer to
    /// the confirmation prompt.
    pub fn begin_reset(&mut self, confirmed: bool) -> Result<SubmissionTicket, SubmitError> {
        if self.is_locked() {
            return Err(SubmitError::InFlight);
        }
        if !confirmed {
            return Err(SubmitError::NotConfirmed);
        }
        Ok(self.acquire(SubmissionAction::Reset))
    }

    fn acquire(&mut self, action: SubmissionAction) -> SubmissionTicket {
        self.last_id += 1;
        self.in_flight = Some(self.last_id);
        self.set_banner(BannerKind::Pending, action.pending_text());
        SubmissionTicket {
            id: self.last_id,
            action,
        }
    }

    /// Records the outcome of a request. Does not release the lock.
    ///
    /// A result may arrive after its lock was already released; it is still shown.
    pub fn complete(
        &mut self,
        ticket: &SubmissionTicket,
        result: &Result<String, LedgerError>,
    ) -> Completion {
        match result {
            Ok(transaction_hash) => {
                self.set_banner(
                    BannerKind::Success,
                    ticket.action.success_text(transaction_hash),
                );
                Completion { resync: true }
            }
            Err(error) => {
                self.set_banner(BannerKind::Error, ticket.action.failure_text(error));
                Completion { resync: false }
            }
        }
    }

    /// Releases the lock if it is still held by submission `id`.
    pub fn release(&mut self, id: SubmissionId) -> bool {
        if self.in_flight == Some(id) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    pub fn is_locked(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Vote and reset controls are usable only while nothing is in flight.
    pub fn controls_enabled(&self) -> bool {
        !self.is_locked()
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    fn set_banner(&mut self, kind: BannerKind, text: String) {
        self.banner = Some(Banner::new(kind, text));
    }
}

pub fn choice_text(choice: bool) -> &'static str {
    if choice { "YES" } else { "NO" }
}

/// Truncates a transaction hash for display.
pub fn short_hash(hash: &str) -> String {
    if hash.chars().count() <= TX_HASH_CHARS {
        return hash.to_string();
    }
    let prefix: String = hash.chars().take(TX_HASH_CHARS).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(message: &str) -> LedgerError {
        LedgerError::Rejected {
            status: 400,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_cast_without_account_is_rejected_locally() {
        let mut controller = SubmissionController::new();
        assert_eq!(
            controller.begin_cast(true, None),
            Err(SubmitError::NoAccount)
        );
        assert_eq!(
            controller.begin_cast(true, Some("  ")),
            Err(SubmitError::NoAccount)
        );
        assert!(!controller.is_locked());
        let banner = controller.banner().unwrap();
        assert_eq!(banner.kind, BannerKind::Error);
        assert_eq!(banner.text, "Please select an account");
    }

    #[test]
    fn test_second_submission_while_in_flight_is_rejected() {
        let mut controller = SubmissionController::new();
        let ticket = controller.begin_cast(true, Some("0xA")).unwrap();
        assert!(controller.is_locked());
        assert!(!controller.controls_enabled());

        assert_eq!(
            controller.begin_cast(false, Some("0xB")),
            Err(SubmitError::InFlight)
        );
        assert_eq!(controller.begin_reset(true), Err(SubmitError::InFlight));

        assert!(controller.release(ticket.id));
        assert!(controller.controls_enabled());
        assert!(controller.begin_reset(true).is_ok());
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let mut controller = SubmissionController::new();
        assert_eq!(controller.begin_reset(false), Err(SubmitError::NotConfirmed));
        assert!(!controller.is_locked());
        let ticket = controller.begin_reset(true).unwrap();
        assert_eq!(ticket.action, SubmissionAction::Reset);
        assert_eq!(
            controller.banner().unwrap().text,
            "Resetting votes... Please wait."
        );
    }

    #[test]
    fn test_pending_banner_names_the_choice() {
        let mut controller = SubmissionController::new();
        controller.begin_cast(false, Some("0xA")).unwrap();
        assert_eq!(
            controller.banner().unwrap().text,
            "Casting NO vote... Please wait."
        );
    }

    #[test]
    fn test_success_shows_hash_and_requests_resync() {
        let mut controller = SubmissionController::new();
        let ticket = controller.begin_cast(true, Some("0xA")).unwrap();
        let completion = controller.complete(&ticket, &Ok("0xabc123...".to_string()));
        assert!(completion.resync);
        let banner = controller.banner().unwrap();
        assert_eq!(banner.kind, BannerKind::Success);
        assert_eq!(banner.text, "✓ Vote cast successfully! Transaction: 0xabc123...");
        // Completing does not release; that happens after the delay.
        assert!(controller.is_locked());
    }

    #[test]
    fn test_long_hash_is_truncated() {
        let hash = "0x9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";
        assert_eq!(short_hash(hash), "0x9f86d081884c7d659a...");
    }

    #[test]
    fn test_service_failure_message_is_verbatim() {
        let mut controller = SubmissionController::new();
        let ticket = controller.begin_cast(true, Some("0xA")).unwrap();
        let completion = controller.complete(&ticket, &Err(rejected("Account already voted")));
        assert!(!completion.resync);
        let banner = controller.banner().unwrap();
        assert_eq!(banner.kind, BannerKind::Error);
        assert_eq!(banner.text, "Account already voted");
    }

    #[test]
    fn test_transport_failure_gets_generic_banner() {
        let mut controller = SubmissionController::new();
        let ticket = controller.begin_reset(true).unwrap();
        let error = LedgerError::Http {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        controller.complete(&ticket, &Err(error));
        assert!(
            controller
                .banner()
                .unwrap()
                .text
                .starts_with("Error resetting votes:")
        );
    }

    #[test]
    fn test_stale_release_does_not_unlock_newer_submission() {
        let mut controller = SubmissionController::new();
        let first = controller.begin_cast(true, Some("0xA")).unwrap();
        assert!(controller.release(first.id));

        let second = controller.begin_cast(false, Some("0xB")).unwrap();
        assert!(!controller.release(first.id));
        assert!(controller.is_locked());
        assert!(controller.release(second.id));
    }

    #[test]
    fn test_banner_expires() {
        let mut controller = SubmissionController::new();
        controller.begin_reset(true).unwrap();
        let banner = controller.banner().unwrap();
        assert!(banner.is_visible(banner.shown_at));
        assert!(!banner.is_visible(banner.shown_at + banner_ttl()));
    }
}
