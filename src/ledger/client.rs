//! VoteChain Ledger Client
//!
//! A JSON-over-HTTP client for the ledger service fronting the voting contract.

use crate::consts::cli_consts::network;
use crate::environment::Environment;
use crate::ledger::Ledger;
use crate::ledger::error::LedgerError;
use crate::ledger::wire::{
    AccountsResponse, BlockchainInfoResponse, Envelope, ResetRequest, ResultsResponse,
    TransactionResponse, VoteRequest, VotersResponse, VotingStatusResponse,
};
use crate::model::{Account, ChainStatus, SessionStatus, TallySnapshot, VoterList};
use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("votechain-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct LedgerClient {
    client: Client,
    environment: Environment,
}

impl LedgerClient {
    pub fn new(environment: Environment) -> Result<Self, LedgerError> {
        let client = ClientBuilder::new()
            .connect_timeout(network::connect_timeout())
            .timeout(network::request_timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.ledger_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, LedgerError> {
        let url = self.build_url(endpoint);
        log::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::read_response(response).await
    }

    async fn post_request<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, LedgerError> {
        let url = self.build_url(endpoint);
        log::debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        Self::read_response(response).await
    }

    async fn read_response<T: DeserializeOwned>(response: Response) -> Result<T, LedgerError> {
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        decode_body(status, &bytes)
    }
}

/// Decodes a response body, honouring the `success` envelope before the HTTP status.
///
/// The service reports refusals as `success: false` with a 4xx/5xx status, so the
/// envelope is read first and its message kept intact.
pub(crate) fn decode_body<T: DeserializeOwned>(status: u16, bytes: &[u8]) -> Result<T, LedgerError> {
    let is_success_status = (200..300).contains(&status);
    let envelope: Envelope = match serde_json::from_slice(bytes) {
        Ok(envelope) => envelope,
        Err(e) if is_success_status => return Err(LedgerError::Decode(e)),
        Err(_) => {
            return Err(LedgerError::Http {
                status,
                message: String::from_utf8_lossy(bytes).into_owned(),
            });
        }
    };

    if !envelope.success {
        return Err(LedgerError::Rejected {
            status,
            message: envelope
                .message
                .unwrap_or_else(|| "Request was rejected by the ledger service".to_string()),
        });
    }
    if !is_success_status {
        return Err(LedgerError::Http {
            status,
            message: envelope.message.unwrap_or_default(),
        });
    }

    Ok(serde_json::from_slice(bytes)?)
}

#[async_trait::async_trait]
impl Ledger for LedgerClient {
    async fn accounts(&self) -> Result<Vec<Account>, LedgerError> {
        let response: AccountsResponse = self.get_request("api/accounts").await?;
        Ok(response.accounts.into_iter().map(Account::from).collect())
    }

    async fn results(&self) -> Result<TallySnapshot, LedgerError> {
        let response: ResultsResponse = self.get_request("api/results").await?;
        Ok(response.into())
    }

    async fn voters(&self) -> Result<VoterList, LedgerError> {
        let response: VotersResponse = self.get_request("api/voters").await?;
        Ok(response.voters)
    }

    async fn chain_status(&self) -> Result<ChainStatus, LedgerError> {
        let response: BlockchainInfoResponse = self.get_request("api/blockchain-info").await?;
        Ok(response.into())
    }

    async fn voting_status(&self) -> Result<SessionStatus, LedgerError> {
        let response: VotingStatusResponse = self.get_request("api/voting-status").await?;
        Ok(response.into())
    }

    async fn cast_vote(&self, choice: bool, account: &str) -> Result<String, LedgerError> {
        let request = VoteRequest {
            vote: choice,
            account,
        };
        let response: TransactionResponse = self.post_request("api/vote", &request).await?;
        Ok(response.transaction_hash)
    }

    async fn reset(&self) -> Result<String, LedgerError> {
        let response: TransactionResponse =
            self.post_request("api/reset", &ResetRequest {}).await?;
        Ok(response.transaction_hash)
    }
}

#[cfg(test)]
/// These are ignored by default since they require a live ledger service to run.
mod live_ledger_tests {
    use crate::environment::Environment;
    use crate::ledger::Ledger;

    #[tokio::test]
    #[ignore] // This test requires a live ledger service.
    /// Should list the accounts known to the service.
    async fn test_accounts() {
        let client = super::LedgerClient::new(Environment::Local).unwrap();
        match client.accounts().await {
            Ok(accounts) => println!("Got {} accounts", accounts.len()),
            Err(e) => panic!("Failed to get accounts: {}", e),
        }
    }

    #[tokio::test]
    #[ignore] // This test requires a live ledger service.
    /// Should return the current tally.
    async fn test_results() {
        let client = super::LedgerClient::new(Environment::Local).unwrap();
        match client.results().await {
            Ok(tally) => println!("Tally: {:?}", tally),
            Err(e) => panic!("Failed to get results: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_joins_without_double_slash() {
        let client = LedgerClient::new(Environment::Custom {
            ledger_url: "http://ledger.test:8080/".to_string(),
        })
        .unwrap();
        assert_eq!(
            client.build_url("/api/results"),
            "http://ledger.test:8080/api/results"
        );
    }

    #[test]
    fn test_decode_accounts_body() {
        let body = br#"{"success": true, "accounts": [
            {"address": "0xA", "balance": 1.0, "has_voted": false},
            {"address": "0xB", "balance": 2.5, "has_voted": true}
        ]}"#;
        let response: AccountsResponse = decode_body(200, body).unwrap();
        let accounts: Vec<Account> = response.accounts.into_iter().map(Account::from).collect();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[1], Account::new("0xB", 2.5, true));
    }

    #[test]
    fn test_decode_blockchain_info_marks_connected() {
        let body = br#"{"success": true, "contract_address": "0xC0FFEE", "block_number": 42,
            "block_hash": "0xdead", "timestamp": 1700000000, "transactions": 1}"#;
        let response: BlockchainInfoResponse = decode_body(200, body).unwrap();
        let status = ChainStatus::from(response);
        assert!(status.connected);
        assert_eq!(status.block_number, 42);
    }

    #[test]
    fn test_rejection_keeps_service_message_verbatim() {
        let body = br#"{"success": false, "message": "Account already voted"}"#;
        let err = decode_body::<TransactionResponse>(400, body).unwrap_err();
        assert_eq!(err.service_message(), Some("Account already voted"));
        assert_eq!(err.to_string(), "Account already voted");
    }

    #[test]
    fn test_rejection_with_ok_status_is_still_rejected() {
        let body = br#"{"success": false, "message": "Only admin can reset voting!"}"#;
        let err = decode_body::<TransactionResponse>(200, body).unwrap_err();
        assert!(matches!(err, LedgerError::Rejected { status: 200, .. }));
    }

    #[test]
    fn test_non_json_error_page_becomes_http_error() {
        let err = decode_body::<TransactionResponse>(502, b"<html>Bad Gateway</html>").unwrap_err();
        match err {
            LedgerError::Http { status, message } => {
                assert_eq!(status, 502);
                assert!(message.contains("Bad Gateway"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_success_without_payload_is_decode_error() {
        let err = decode_body::<ResultsResponse>(200, br#"{"success": true}"#).unwrap_err();
        assert!(matches!(err, LedgerError::Decode(_)));
    }

    #[test]
    fn test_reset_request_serializes_to_empty_object() {
        assert_eq!(serde_json::to_string(&ResetRequest {}).unwrap(), "{}");
    }

    #[test]
    fn test_vote_request_shape() {
        let request = VoteRequest {
            vote: true,
            account: "0xA",
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"vote":true,"account":"0xA"}"#
        );
    }
}
