//! State store
//!
//! Last-known snapshot of every feed. Each slice is replaced wholesale by the
//! latest poll result for that feed; a failed poll never clears a slice.

use crate::ledger::error::LedgerError;
use crate::model::{Account, ChainStatus, SessionStatus, TallySnapshot, VoterList};
use strum::{Display, EnumIter};

/// One independently polled piece of server state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Feed {
    #[strum(to_string = "accounts")]
    Accounts,
    #[strum(to_string = "results")]
    Tally,
    #[strum(to_string = "voters")]
    Voters,
    #[strum(to_string = "blockchain info")]
    ChainStatus,
    #[strum(to_string = "voting status")]
    SessionStatus,
}

/// A successfully fetched value for one feed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedSnapshot {
    Accounts(Vec<Account>),
    Tally(TallySnapshot),
    Voters(VoterList),
    ChainStatus(ChainStatus),
    SessionStatus(SessionStatus),
}

impl FeedSnapshot {
    pub fn feed(&self) -> Feed {
        match self {
            FeedSnapshot::Accounts(_) => Feed::Accounts,
            FeedSnapshot::Tally(_) => Feed::Tally,
            FeedSnapshot::Voters(_) => Feed::Voters,
            FeedSnapshot::ChainStatus(_) => Feed::ChainStatus,
            FeedSnapshot::SessionStatus(_) => Feed::SessionStatus,
        }
    }
}

/// Outcome of one poll of one feed.
#[derive(Debug)]
pub struct FeedUpdate {
    pub feed: Feed,
    pub result: Result<FeedSnapshot, LedgerError>,
}

impl FeedUpdate {
    pub fn new(feed: Feed, result: Result<FeedSnapshot, LedgerError>) -> Self {
        Self { feed, result }
    }
}

/// Whether the last chain-status poll got an answer at all.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Reachability {
    #[default]
    Unknown,
    Reachable,
    Unreachable,
}

#[derive(Debug, Default)]
pub struct StateStore {
    accounts: Option<Vec<Account>>,
    tally: Option<TallySnapshot>,
    voters: Option<VoterList>,
    chain: Option<ChainStatus>,
    session: Option<SessionStatus>,
    reachability: Reachability,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a poll result. Returns the feed whose slice was replaced, if any.
    ///
    /// Last write wins: the store does not know when the request started.
    pub fn apply(&mut self, update: FeedUpdate) -> Option<Feed> {
        match update.result {
            Ok(snapshot) => {
                let feed = snapshot.feed();
                self.replace(snapshot);
                Some(feed)
            }
            Err(_) => {
                if update.feed == Feed::ChainStatus {
                    self.reachability = Reachability::Unreachable;
                }
                None
            }
        }
    }

    /// Replaces one slice with a fresh snapshot.
    pub fn replace(&mut self, snapshot: FeedSnapshot) {
        match snapshot {
            FeedSnapshot::Accounts(accounts) => self.accounts = Some(accounts),
            FeedSnapshot::Tally(tally) => self.tally = Some(tally),
            FeedSnapshot::Voters(voters) => self.voters = Some(voters),
            FeedSnapshot::ChainStatus(chain) => {
                self.chain = Some(chain);
                self.reachability = Reachability::Reachable;
            }
            FeedSnapshot::SessionStatus(session) => self.session = Some(session),
        }
    }

    pub fn accounts(&self) -> Option<&[Account]> {
        self.accounts.as_deref()
    }

    pub fn tally(&self) -> Option<&TallySnapshot> {
        self.tally.as_ref()
    }

    pub fn voters(&self) -> Option<&[String]> {
        self.voters.as_deref()
    }

    pub fn chain(&self) -> Option<&ChainStatus> {
        self.chain.as_ref()
    }

    pub fn session(&self) -> Option<&SessionStatus> {
        self.session.as_ref()
    }

    pub fn reachability(&self) -> Reachability {
        self.reachability
    }
}
