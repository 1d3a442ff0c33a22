//! Balance history — per-account timelines of (timestamp, balance-after).
//!
//! Timelines are kept per account id for the id's current lifecycle and
//! survive the account being merged away, so "balance at T" still answers
//! for any T before the retirement. Re-creating an id replaces its timeline.

use crate::{
    error::{LedgerError, LedgerResult},
    types::{AccountId, Amount, Generation, Timestamp},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub timestamp: Timestamp,
    pub balance:   Amount,
}

/// One lifecycle of one account id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Timeline {
    pub generation: Generation,
    pub created_at: Timestamp,
    /// Set when the account is merged into another one.
    pub retired_at: Option<Timestamp>,
    snapshots:      Vec<BalanceSnapshot>,
}

impl Timeline {
    pub fn snapshots(&self) -> &[BalanceSnapshot] {
        &self.snapshots
    }

    /// True if the account existed (created, not yet retired) at `time_at`.
    pub fn covers(&self, time_at: Timestamp) -> bool {
        time_at >= self.created_at && self.retired_at.map_or(true, |r| time_at < r)
    }

    /// Latest snapshot at or before `time_at`.
    pub fn balance_at(&self, time_at: Timestamp) -> Option<Amount> {
        let idx = self.snapshots.partition_point(|s| s.timestamp <= time_at);
        idx.checked_sub(1).map(|i| self.snapshots[i].balance)
    }

    fn push(&mut self, timestamp: Timestamp, balance: Amount) {
        // Cashbacks are recorded at their maturity time, which can trail the
        // newest snapshot if callers broke timestamp order. Insert in place.
        let idx = self.snapshots.partition_point(|s| s.timestamp <= timestamp);
        self.snapshots.insert(idx, BalanceSnapshot { timestamp, balance });
    }
}

#[derive(Debug, Default)]
pub struct BalanceHistory {
    timelines: HashMap<AccountId, Timeline>,
}

impl BalanceHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new lifecycle with a single zero-balance snapshot,
    /// discarding whatever an earlier lifecycle of the id recorded.
    pub fn start(&mut self, account_id: &str, generation: Generation, timestamp: Timestamp) {
        self.timelines.insert(
            account_id.to_string(),
            Timeline {
                generation,
                created_at: timestamp,
                retired_at: None,
                snapshots: vec![BalanceSnapshot { timestamp, balance: 0 }],
            },
        );
    }

    pub fn record(
        &mut self,
        account_id: &str,
        generation: Generation,
        timestamp: Timestamp,
        balance: Amount,
    ) {
        match self.timelines.get_mut(account_id) {
            Some(timeline) if timeline.generation == generation => {
                timeline.push(timestamp, balance);
            }
            _ => log::error!(
                "no timeline for {account_id} generation {generation}; snapshot at {timestamp} lost"
            ),
        }
    }

    pub fn retire(&mut self, account_id: &str, timestamp: Timestamp) {
        if let Some(timeline) = self.timelines.get_mut(account_id) {
            timeline.retired_at = Some(timestamp);
        }
    }

    pub fn timeline(&self, account_id: &str) -> Option<&Timeline> {
        self.timelines.get(account_id)
    }

    pub fn retired_at(&self, account_id: &str) -> Option<Timestamp> {
        self.timelines.get(account_id).and_then(|t| t.retired_at)
    }

    /// Balance of `account_id` as of `time_at` in its current lifecycle.
    pub fn balance_at(&self, account_id: &str, time_at: Timestamp) -> LedgerResult<Amount> {
        self.timelines
            .get(account_id)
            .filter(|t| t.covers(time_at))
            .and_then(|t| t.balance_at(time_at))
            .ok_or_else(|| LedgerError::AccountNotFound {
                account_id: account_id.to_string(),
            })
    }
}
