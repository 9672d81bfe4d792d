use crate::ledger::error::LedgerError;
use crate::model::{Account, ChainStatus, SessionStatus, TallySnapshot, VoterList};

pub(crate) mod client;
pub use client::LedgerClient;
pub mod error;
pub mod wire;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Ledger: Send + Sync {
    /// Accounts with their balances and whether each has voted.
    async fn accounts(&self) -> Result<Vec<Account>, LedgerError>;

    /// Current yes/no tally.
    async fn results(&self) -> Result<TallySnapshot, LedgerError>;

    /// Accounts that have voted, in the order they voted.
    async fn voters(&self) -> Result<VoterList, LedgerError>;

    /// Contract address and latest block.
    async fn chain_status(&self) -> Result<ChainStatus, LedgerError>;

    /// How many accounts have voted so far.
    async fn voting_status(&self) -> Result<SessionStatus, LedgerError>;

    /// Casts a ballot from `account`. Returns the transaction hash.
    async fn cast_vote(&self, choice: bool, account: &str) -> Result<String, LedgerError>;

    /// Clears every ballot. Returns the transaction hash.
    async fn reset(&self) -> Result<String, LedgerError>;
}
