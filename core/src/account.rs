//! Account store — the set of currently active accounts.
//!
//! Owns balances and cumulative outgoing totals. Everything else in the
//! ledger refers to accounts by id and asks this store for their state.

use crate::{
    error::{LedgerError, LedgerResult},
    types::{AccountId, Amount, Generation, Timestamp},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub account_id: AccountId,
    pub balance:    Amount,
    /// Total ever sent out via transfers and payments. Never decreases.
    pub outgoing:   Amount,
    pub created_at: Timestamp,
    pub generation: Generation,
}

impl Account {
    fn credit(&mut self, amount: Amount) -> LedgerResult<Amount> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::BalanceOverflow {
                account_id: self.account_id.clone(),
                amount,
            })?;
        Ok(self.balance)
    }

    fn debit(&mut self, amount: Amount) -> LedgerResult<Amount> {
        if self.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                account_id: self.account_id.clone(),
                balance:    self.balance,
                requested:  amount,
            });
        }
        self.balance -= amount;
        self.outgoing = self.outgoing.saturating_add(amount);
        Ok(self.balance)
    }
}

#[derive(Debug, Default)]
pub struct AccountLedger {
    accounts:    HashMap<AccountId, Account>,
    /// Last generation handed out per id, including retired ids.
    generations: HashMap<AccountId, Generation>,
}

impl AccountLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, account_id: &str) -> bool {
        self.accounts.contains_key(account_id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Active accounts in arbitrary order.
    pub fn active(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn account(&self, account_id: &str) -> LedgerResult<&Account> {
        self.accounts
            .get(account_id)
            .ok_or_else(|| not_found(account_id))
    }

    /// Open a fresh lifecycle for `account_id`.
    /// A previously merged-away id gets the next generation.
    pub fn open(&mut self, account_id: &str, timestamp: Timestamp) -> LedgerResult<&Account> {
        if self.accounts.contains_key(account_id) {
            return Err(LedgerError::AccountAlreadyExists {
                account_id: account_id.to_string(),
            });
        }
        let generation = self
            .generations
            .entry(account_id.to_string())
            .and_modify(|g| *g += 1)
            .or_insert(0);
        let account = Account {
            account_id: account_id.to_string(),
            balance:    0,
            outgoing:   0,
            created_at: timestamp,
            generation: *generation,
        };
        Ok(self
            .accounts
            .entry(account_id.to_string())
            .or_insert(account))
    }

    pub fn ensure_funds(&self, account_id: &str, amount: Amount) -> LedgerResult<()> {
        let account = self.account(account_id)?;
        if account.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                account_id: account_id.to_string(),
                balance:    account.balance,
                requested:  amount,
            });
        }
        Ok(())
    }

    pub fn ensure_credit(&self, account_id: &str, amount: Amount) -> LedgerResult<()> {
        let account = self.account(account_id)?;
        if account.balance.checked_add(amount).is_none() {
            return Err(LedgerError::BalanceOverflow {
                account_id: account_id.to_string(),
                amount,
            });
        }
        Ok(())
    }

    pub fn credit(&mut self, account_id: &str, amount: Amount) -> LedgerResult<&Account> {
        let account = self.account_mut(account_id)?;
        account.credit(amount)?;
        Ok(account)
    }

    /// Take `amount` out of the account and count it as outgoing spend.
    pub fn debit(&mut self, account_id: &str, amount: Amount) -> LedgerResult<&Account> {
        let account = self.account_mut(account_id)?;
        account.debit(amount)?;
        Ok(account)
    }

    /// Fold a retired account's balance and outgoing total into `account_id`.
    pub fn absorb(&mut self, account_id: &str, retired: &Account) -> LedgerResult<&Account> {
        let account = self.account_mut(account_id)?;
        account.credit(retired.balance)?;
        account.outgoing = account.outgoing.saturating_add(retired.outgoing);
        Ok(account)
    }

    /// Drop `account_id` from the active set, returning its final state.
    pub fn remove(&mut self, account_id: &str) -> LedgerResult<Account> {
        self.accounts
            .remove(account_id)
            .ok_or_else(|| not_found(account_id))
    }

    fn account_mut(&mut self, account_id: &str) -> LedgerResult<&mut Account> {
        self.accounts
            .get_mut(account_id)
            .ok_or_else(|| not_found(account_id))
    }
}

fn not_found(account_id: &str) -> LedgerError {
    LedgerError::AccountNotFound {
        account_id: account_id.to_string(),
    }
}
