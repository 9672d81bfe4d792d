//! Domain snapshots of the voting session.
//!
//! Every value here is replaced wholesale by the poll that produced it; nothing is
//! mutated in place.

/// A ledger account that may cast a ballot.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub address: String,
    /// Balance in ether.
    pub balance: f64,
    pub has_voted: bool,
}

impl Account {
    pub fn new(address: impl Into<String>, balance: f64, has_voted: bool) -> Self {
        Self {
            address: address.into(),
            balance,
            has_voted,
        }
    }
}

/// Vote counts as reported by the service.
///
/// `total_votes == yes_votes + no_votes` is trusted, not re-derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TallySnapshot {
    pub yes_votes: u64,
    pub no_votes: u64,
    pub total_votes: u64,
}

impl TallySnapshot {
    pub fn new(yes_votes: u64, no_votes: u64, total_votes: u64) -> Self {
        Self {
            yes_votes,
            no_votes,
            total_votes,
        }
    }

    /// Share of YES ballots in percent, 0 when nobody has voted.
    pub fn yes_percent(&self) -> f64 {
        Self::percent_of(self.yes_votes, self.total_votes)
    }

    /// Share of NO ballots in percent, 0 when nobody has voted.
    pub fn no_percent(&self) -> f64 {
        Self::percent_of(self.no_votes, self.total_votes)
    }

    fn percent_of(part: u64, total: u64) -> f64 {
        if total == 0 {
            return 0.0;
        }
        part as f64 / total as f64 * 100.0
    }
}

/// Voters in the order the service returned them.
pub type VoterList = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainStatus {
    pub contract_address: String,
    pub block_number: u64,
    pub connected: bool,
}

/// Progress of the session; `all_voted` drives the top-level view mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStatus {
    pub all_voted: bool,
    pub voted_count: u64,
    pub total_accounts: u64,
}
