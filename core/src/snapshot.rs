//! Snapshot serialization — a read-only view of ledger state as JSON.
//!
//! Captures the active accounts and cashback counters as of the last
//! operation. Taking a snapshot does not sweep cashbacks.

use crate::{
    error::LedgerResult,
    ledger::Ledger,
    types::{AccountId, Amount, Generation, Timestamp},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountSummary {
    pub account_id: AccountId,
    pub balance:    Amount,
    pub outgoing:   Amount,
    pub created_at: Timestamp,
    pub generation: Generation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub last_timestamp:    Option<Timestamp>,
    /// Sorted by account id.
    pub accounts:          Vec<AccountSummary>,
    pub pending_cashbacks: usize,
    pub payments_issued:   u64,
}

impl LedgerSnapshot {
    pub fn total_balance(&self) -> u128 {
        self.accounts.iter().map(|a| a.balance as u128).sum()
    }
}

impl Ledger {
    pub fn snapshot(&self) -> LedgerSnapshot {
        let mut accounts: Vec<AccountSummary> = self
            .accounts
            .active()
            .map(|a| AccountSummary {
                account_id: a.account_id.clone(),
                balance:    a.balance,
                outgoing:   a.outgoing,
                created_at: a.created_at,
                generation: a.generation,
            })
            .collect();
        accounts.sort_by(|a, b| a.account_id.cmp(&b.account_id));

        LedgerSnapshot {
            last_timestamp:    self.clock.last_seen,
            accounts,
            pending_cashbacks: self.cashbacks.pending_count(),
            payments_issued:   self.cashbacks.issued(),
        }
    }

    pub fn snapshot_json(&self) -> LedgerResult<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }
}
