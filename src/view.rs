//! View projection
//!
//! Turns the dashboard state into plain display values. Nothing here reads a
//! clock or the network: the same inputs always give the same view.

use crate::consts::cli_consts::display::{CONTRACT_ADDRESS_CHARS, LABEL_MIN_PERCENT};
use crate::model::TallySnapshot;
use crate::selector::{AccountOption, AccountSelector};
use crate::store::{Reachability, StateStore};
use crate::submission::{BannerKind, SubmissionController};
use std::time::Instant;

pub const NO_VOTES_PLACEHOLDER: &str = "No votes cast yet";
pub const EXHAUSTED_MESSAGE: &str = "All accounts have voted";
pub const RESET_PROMPT: &str =
    "Are you sure you want to reset all votes? This action will be recorded on the blockchain.";

/// One segment of the tally bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarView {
    /// Width in percent of the full bar.
    pub width: f64,
    /// Empty when the segment is too thin to hold text.
    pub label: String,
}

impl BarView {
    fn from_percent(percent: f64) -> Self {
        let label = if percent > LABEL_MIN_PERCENT {
            format!("{:.0}%", percent)
        } else {
            String::new()
        };
        Self {
            width: percent,
            label,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TallyView {
    pub yes_votes: u64,
    pub no_votes: u64,
    pub total_votes: u64,
    pub yes: BarView,
    pub no: BarView,
}

impl TallyView {
    pub fn from_snapshot(tally: &TallySnapshot) -> Self {
        Self {
            yes_votes: tally.yes_votes,
            no_votes: tally.no_votes,
            total_votes: tally.total_votes,
            yes: BarView::from_percent(tally.yes_percent()),
            no: BarView::from_percent(tally.no_percent()),
        }
    }
}

/// Top-level mode, driven only by the latest session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Active,
    Finished { voted: u64, total: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connectivity {
    /// No chain status poll has completed yet.
    Unknown,
    Connected {
        contract_short: String,
        contract_address: String,
        block_number: u64,
    },
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoterListView {
    Placeholder(&'static str),
    Entries(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerView {
    pub kind: BannerKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub mode: ViewMode,
    pub tally: TallyView,
    pub connectivity: Connectivity,
    pub voters: VoterListView,
    pub accounts: Vec<AccountOption>,
    pub selected: Option<String>,
    pub exhausted: bool,
    pub controls_enabled: bool,
    pub confirm_reset: bool,
    pub banner: Option<BannerView>,
}

impl DashboardView {
    /// Voting controls are hidden once the session is finished.
    pub fn voting_controls_visible(&self) -> bool {
        matches!(self.mode, ViewMode::Active)
    }
}

/// Everything the projection reads.
pub struct ViewInputs<'a> {
    pub store: &'a StateStore,
    pub selector: &'a AccountSelector,
    pub controller: &'a SubmissionController,
    pub confirm_reset: bool,
    pub now: Instant,
}

pub fn project(inputs: &ViewInputs<'_>) -> DashboardView {
    let store = inputs.store;

    let mode = match store.session() {
        Some(session) if session.all_voted => ViewMode::Finished {
            voted: session.voted_count,
            total: session.total_accounts,
        },
        _ => ViewMode::Active,
    };

    let tally = TallyView::from_snapshot(&store.tally().copied().unwrap_or_default());

    let banner = inputs
        .controller
        .banner()
        .filter(|banner| banner.is_visible(inputs.now))
        .map(|banner| BannerView {
            kind: banner.kind,
            text: banner.text.clone(),
        });

    DashboardView {
        mode,
        tally,
        connectivity: connectivity(store),
        voters: voter_list(store.voters().unwrap_or_default()),
        accounts: inputs.selector.options(),
        selected: inputs.selector.selected().map(str::to_string),
        exhausted: inputs.selector.is_exhausted(),
        controls_enabled: inputs.controller.controls_enabled(),
        confirm_reset: inputs.confirm_reset,
        banner,
    }
}

fn connectivity(store: &StateStore) -> Connectivity {
    match (store.reachability(), store.chain()) {
        (Reachability::Reachable, Some(chain)) => Connectivity::Connected {
            contract_short: shorten(&chain.contract_address, CONTRACT_ADDRESS_CHARS),
            contract_address: chain.contract_address.clone(),
            block_number: chain.block_number,
        },
        (Reachability::Unreachable, _) => Connectivity::Disconnected,
        _ => Connectivity::Unknown,
    }
}

fn voter_list(voters: &[String]) -> VoterListView {
    if voters.is_empty() {
        return VoterListView::Placeholder(NO_VOTES_PLACEHOLDER);
    }
    VoterListView::Entries(
        voters
            .iter()
            .enumerate()
            .map(|(index, voter)| format!("Voter {}: {}", index + 1, voter))
            .collect(),
    )
}

fn shorten(text: &str, chars: usize) -> String {
    let prefix: String = text.chars().take(chars).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::error::LedgerError;
    use crate::model::{Account, ChainStatus, SessionStatus};
    use crate::store::{Feed, FeedSnapshot, FeedUpdate};

    struct Fixture {
        store: StateStore,
        selector: AccountSelector,
        controller: SubmissionController,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: StateStore::new(),
                selector: AccountSelector::new(),
                controller: SubmissionController::new(),
            }
        }

        fn view(&self) -> DashboardView {
            project(&ViewInputs {
                store: &self.store,
                selector: &self.selector,
                controller: &self.controller,
                confirm_reset: false,
                now: Instant::now(),
            })
        }
    }

    #[test]
    fn test_three_to_one_tally_labels_both_bars() {
        let mut fixture = Fixture::new();
        fixture
            .store
            .replace(FeedSnapshot::Tally(TallySnapshot::new(3, 1, 4)));
        let tally = fixture.view().tally;
        assert_eq!(tally.yes.width, 75.0);
        assert_eq!(tally.yes.label, "75%");
        assert_eq!(tally.no.width, 25.0);
        assert_eq!(tally.no.label, "25%");
    }

    #[test]
    fn test_empty_tally_has_no_bars() {
        let mut fixture = Fixture::new();
        fixture
            .store
            .replace(FeedSnapshot::Tally(TallySnapshot::new(0, 0, 0)));
        let tally = fixture.view().tally;
        assert_eq!(tally.yes, BarView { width: 0.0, label: String::new() });
        assert_eq!(tally.no, BarView { width: 0.0, label: String::new() });
    }

    #[test]
    fn test_thin_bar_has_no_label() {
        let tally = TallyView::from_snapshot(&TallySnapshot::new(1, 19, 20));
        assert_eq!(tally.yes.width, 5.0);
        assert!(tally.yes.label.is_empty());
        assert_eq!(tally.no.label, "95%");

        // Exactly ten percent is still too thin.
        let tally = TallyView::from_snapshot(&TallySnapshot::new(1, 9, 10));
        assert!(tally.yes.label.is_empty());
    }

    #[test]
    fn test_all_voted_switches_to_finished() {
        let mut fixture = Fixture::new();
        fixture
            .store
            .replace(FeedSnapshot::SessionStatus(SessionStatus {
                all_voted: true,
                voted_count: 4,
                total_accounts: 4,
            }));
        let view = fixture.view();
        assert_eq!(view.mode, ViewMode::Finished { voted: 4, total: 4 });
        assert!(!view.voting_controls_visible());

        // A later poll can reopen the session.
        fixture
            .store
            .replace(FeedSnapshot::SessionStatus(SessionStatus {
                all_voted: false,
                voted_count: 0,
                total_accounts: 4,
            }));
        let view = fixture.view();
        assert_eq!(view.mode, ViewMode::Active);
        assert!(view.voting_controls_visible());
    }

    #[test]
    fn test_connectivity_follows_chain_poll_outcome() {
        let mut fixture = Fixture::new();
        assert_eq!(fixture.view().connectivity, Connectivity::Unknown);

        fixture.store.replace(FeedSnapshot::ChainStatus(ChainStatus {
            contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            block_number: 12,
            connected: true,
        }));
        match fixture.view().connectivity {
            Connectivity::Connected {
                contract_short,
                block_number,
                ..
            } => {
                assert_eq!(contract_short, "0x5FbDB2315678afecb3...");
                assert_eq!(block_number, 12);
            }
            other => panic!("unexpected connectivity: {other:?}"),
        }

        fixture.store.apply(FeedUpdate::new(
            Feed::ChainStatus,
            Err(LedgerError::Http {
                status: 500,
                message: String::new(),
            }),
        ));
        assert_eq!(fixture.view().connectivity, Connectivity::Disconnected);
    }

    #[test]
    fn test_voter_list_placeholder_and_ordinals() {
        let mut fixture = Fixture::new();
        assert_eq!(
            fixture.view().voters,
            VoterListView::Placeholder(NO_VOTES_PLACEHOLDER)
        );
        fixture.store.replace(FeedSnapshot::Voters(vec![
            "0xB".to_string(),
            "0xA".to_string(),
        ]));
        assert_eq!(
            fixture.view().voters,
            VoterListView::Entries(vec!["Voter 1: 0xB".to_string(), "Voter 2: 0xA".to_string()])
        );
    }

    #[test]
    fn test_controls_follow_the_lock() {
        let mut fixture = Fixture::new();
        fixture.selector.refresh(vec![Account::new("0xA", 1.0, false)]);
        assert!(fixture.view().controls_enabled);
        let ticket = fixture.controller.begin_cast(true, Some("0xA")).unwrap();
        let view = fixture.view();
        assert!(!view.controls_enabled);
        assert_eq!(view.selected.as_deref(), Some("0xA"));
        fixture.controller.release(ticket.id);
        assert!(fixture.view().controls_enabled);
    }

    #[test]
    fn test_expired_banner_is_hidden() {
        let mut fixture = Fixture::new();
        fixture.controller.begin_reset(true).unwrap();
        let shown_at = fixture.controller.banner().unwrap().shown_at;
        let later = project(&ViewInputs {
            store: &fixture.store,
            selector: &fixture.selector,
            controller: &fixture.controller,
            confirm_reset: false,
            now: shown_at + std::time::Duration::from_secs(6),
        });
        assert_eq!(later.banner, None);
    }
}
