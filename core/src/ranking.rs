//! Spender ranking — derived on demand from outgoing totals, never stored.

use crate::{
    account::Account,
    error::LedgerResult,
    ledger::Ledger,
    types::{AccountId, Amount, Timestamp},
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpenderEntry {
    pub account_id: AccountId,
    pub outgoing:   Amount,
}

/// Renders as `id(total)`.
impl fmt::Display for SpenderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.account_id, self.outgoing)
    }
}

/// Highest outgoing first; equal totals ordered by id ascending.
pub fn rank_spenders<'a, I>(accounts: I, n: usize) -> Vec<SpenderEntry>
where
    I: IntoIterator<Item = &'a Account>,
{
    let mut entries: Vec<SpenderEntry> = accounts
        .into_iter()
        .map(|a| SpenderEntry {
            account_id: a.account_id.clone(),
            outgoing:   a.outgoing,
        })
        .collect();
    entries.sort_unstable_by(|a, b| {
        b.outgoing
            .cmp(&a.outgoing)
            .then_with(|| a.account_id.cmp(&b.account_id))
    });
    entries.truncate(n);
    entries
}

impl Ledger {
    pub fn top_spenders(&mut self, timestamp: Timestamp, n: usize) -> LedgerResult<Vec<SpenderEntry>> {
        self.begin(timestamp)?;
        Ok(rank_spenders(self.accounts.active(), n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, outgoing: Amount) -> Account {
        Account {
            account_id: id.into(),
            balance: 0,
            outgoing,
            created_at: 0,
            generation: 0,
        }
    }

    #[test]
    fn ties_break_by_id_and_n_truncates() {
        let accounts = vec![
            account("carol", 10),
            account("bob", 30),
            account("alice", 30),
            account("dave", 0),
        ];
        let ranked: Vec<String> = rank_spenders(&accounts, 3)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(ranked, vec!["alice(30)", "bob(30)", "carol(10)"]);
        assert_eq!(rank_spenders(&accounts, 10).len(), 4);
        assert!(rank_spenders(&accounts, 0).is_empty());
    }
}
