//! JSON shapes exchanged with the ledger service.

use crate::model::{Account, ChainStatus, SessionStatus, TallySnapshot};
use serde::{Deserialize, Serialize};

/// Fields present on every response.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AccountRecord {
    pub address: String,
    pub balance: f64,
    pub has_voted: bool,
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        Account::new(record.address, record.balance, record.has_voted)
    }
}

#[derive(Debug, Deserialize)]
pub struct AccountsResponse {
    pub accounts: Vec<AccountRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ResultsResponse {
    pub yes_votes: u64,
    pub no_votes: u64,
    pub total_votes: u64,
}

impl From<ResultsResponse> for TallySnapshot {
    fn from(response: ResultsResponse) -> Self {
        TallySnapshot::new(response.yes_votes, response.no_votes, response.total_votes)
    }
}

#[derive(Debug, Deserialize)]
pub struct VotersResponse {
    pub voters: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct BlockchainInfoResponse {
    pub contract_address: String,
    pub block_number: u64,
}

impl From<BlockchainInfoResponse> for ChainStatus {
    fn from(response: BlockchainInfoResponse) -> Self {
        ChainStatus {
            contract_address: response.contract_address,
            block_number: response.block_number,
            // A decoded answer is itself proof of connectivity.
            connected: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VotingStatusResponse {
    pub all_voted: bool,
    pub voted_count: u64,
    pub total_accounts: u64,
}

impl From<VotingStatusResponse> for SessionStatus {
    fn from(response: VotingStatusResponse) -> Self {
        SessionStatus {
            all_voted: response.all_voted,
            voted_count: response.voted_count,
            total_accounts: response.total_accounts,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TransactionResponse {
    pub transaction_hash: String,
}

#[derive(Debug, Serialize)]
pub struct VoteRequest<'a> {
    pub vote: bool,
    pub account: &'a str,
}

/// Serializes to `{}`.
#[derive(Debug, Serialize)]
pub struct ResetRequest {}
