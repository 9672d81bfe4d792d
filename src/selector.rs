//! Account selection
//!
//! Keeps exactly one eligible account selected across account polls. An explicit
//! user choice survives refreshes for as long as that account has not voted.

use crate::consts::cli_consts::display::ACCOUNT_ADDRESS_CHARS;
use crate::model::Account;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("Unknown account: {0}")]
    UnknownAccount(String),
    #[error("Account {0} has already voted")]
    AlreadyVoted(String),
}

/// Current selection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// No accounts poll has succeeded yet.
    Unloaded,
    /// First eligible account in feed order.
    Auto(String),
    /// Chosen by the user.
    Manual(String),
    /// Every account has voted.
    Exhausted,
}

/// One row of the account picker.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountOption {
    pub address: String,
    pub label: String,
    pub selectable: bool,
}

#[derive(Debug)]
pub struct AccountSelector {
    accounts: Vec<Account>,
    selection: Selection,
}

impl Default for AccountSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountSelector {
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
            selection: Selection::Unloaded,
        }
    }

    /// Takes a fresh accounts snapshot and re-runs selection.
    pub fn refresh(&mut self, accounts: Vec<Account>) {
        self.accounts = accounts;

        if let Selection::Manual(address) = &self.selection {
            if self.eligible(address) {
                return;
            }
        }

        self.selection = match self.accounts.iter().find(|a| !a.has_voted) {
            Some(account) => Selection::Auto(account.address.clone()),
            None => Selection::Exhausted,
        };
    }

    /// Explicitly selects an account.
    pub fn select(&mut self, address: &str) -> Result<(), SelectError> {
        let account = self
            .accounts
            .iter()
            .find(|a| a.address == address)
            .ok_or_else(|| SelectError::UnknownAccount(address.to_string()))?;
        if account.has_voted {
            return Err(SelectError::AlreadyVoted(address.to_string()));
        }
        self.selection = Selection::Manual(address.to_string());
        Ok(())
    }

    /// Moves the selection to the next eligible account, wrapping around.
    pub fn select_next(&mut self) {
        self.step(1);
    }

    /// Moves the selection to the previous eligible account, wrapping around.
    pub fn select_previous(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, direction: isize) {
        let eligible: Vec<&str> = self
            .accounts
            .iter()
            .filter(|a| !a.has_voted)
            .map(|a| a.address.as_str())
            .collect();
        if eligible.is_empty() {
            return;
        }

        let len = eligible.len() as isize;
        let next = match self
            .selected()
            .and_then(|current| eligible.iter().position(|a| *a == current))
        {
            Some(index) => (index as isize + direction).rem_euclid(len),
            None => 0,
        };
        self.selection = Selection::Manual(eligible[next as usize].to_string());
    }

    fn eligible(&self, address: &str) -> bool {
        self.accounts
            .iter()
            .any(|a| a.address == address && !a.has_voted)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Address of the selected account, if any.
    pub fn selected(&self) -> Option<&str> {
        match &self.selection {
            Selection::Auto(address) | Selection::Manual(address) => Some(address),
            Selection::Unloaded | Selection::Exhausted => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.selection == Selection::Exhausted
    }

    /// Picker rows for every account, voted ones marked non-selectable.
    pub fn options(&self) -> Vec<AccountOption> {
        self.accounts
            .iter()
            .enumerate()
            .map(|(index, account)| AccountOption {
                address: account.address.clone(),
                label: option_label(index, account),
                selectable: !account.has_voted,
            })
            .collect()
    }
}

fn option_label(index: usize, account: &Account) -> String {
    let voted_status = if account.has_voted {
        "✓ Voted"
    } else {
        "○ Not voted"
    };
    let address_short: String = account.address.chars().take(ACCOUNT_ADDRESS_CHARS).collect();
    format!(
        "Account {}: {}... ({:.2} ETH) {}",
        index + 1,
        address_short,
        account.balance,
        voted_status
    )
}
