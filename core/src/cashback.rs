//! Cashback scheduler — deferred credits created by payments.
//!
//! Lifecycle of a record:
//!   Pending (IN_PROGRESS) → Applied (CASHBACK_RECEIVED)
//!
//! Nothing runs on a timer. Every ledger operation calls `take_matured`
//! with its own timestamp first, and whatever has matured by then is
//! handed back to the ledger to credit. Only pending records sit in the
//! maturity heap, so a sweep costs O(matured · log pending).

use crate::{
    config::LedgerConfig,
    error::{LedgerError, LedgerResult},
    types::{AccountId, Amount, PaymentId, Timestamp},
};
use serde::{Deserialize, Serialize};
use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
    fmt,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CashbackStatus {
    #[serde(rename = "IN_PROGRESS")]
    Pending,
    #[serde(rename = "CASHBACK_RECEIVED")]
    Applied,
}

impl CashbackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "IN_PROGRESS",
            Self::Applied => "CASHBACK_RECEIVED",
        }
    }
}

impl fmt::Display for CashbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CashbackRecord {
    pub payment_id: PaymentId,
    /// Global payment counter value; also breaks maturity ties.
    pub sequence:   u64,
    /// Current owner. Moves to the surviving account on merge.
    pub account_id: AccountId,
    pub amount:     Amount,
    pub matures_at: Timestamp,
    pub status:     CashbackStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct MaturityKey {
    matures_at: Timestamp,
    sequence:   u64,
    payment_id: PaymentId,
}

#[derive(Debug)]
pub struct CashbackScheduler {
    config:        LedgerConfig,
    last_sequence: u64,
    records:       HashMap<PaymentId, CashbackRecord>,
    pending:       BinaryHeap<Reverse<MaturityKey>>, // min-heap via Reverse
}

impl CashbackScheduler {
    pub fn new(config: &LedgerConfig) -> Self {
        Self {
            config:        config.clone(),
            last_sequence: 0,
            records:       HashMap::new(),
            pending:       BinaryHeap::new(),
        }
    }

    /// Register the cashback owed for a payment made at `timestamp`.
    /// Allocates the next payment id; ids are never reused.
    pub fn schedule(
        &mut self,
        account_id: &str,
        payment_amount: Amount,
        timestamp: Timestamp,
    ) -> &CashbackRecord {
        self.last_sequence += 1;
        let sequence = self.last_sequence;
        let payment_id = format!("{}{sequence}", self.config.payment_id_prefix);
        let record = CashbackRecord {
            payment_id: payment_id.clone(),
            sequence,
            account_id: account_id.to_string(),
            amount: self.config.cashback_for(payment_amount),
            matures_at: timestamp.saturating_add(self.config.cashback_delay),
            status: CashbackStatus::Pending,
        };
        self.pending.push(Reverse(MaturityKey {
            matures_at: record.matures_at,
            sequence,
            payment_id: payment_id.clone(),
        }));
        self.records.entry(payment_id).or_insert(record)
    }

    /// Mark every pending record with maturity ≤ `timestamp` as applied and
    /// return them in maturity order (payment order on ties).
    pub fn take_matured(&mut self, timestamp: Timestamp) -> Vec<CashbackRecord> {
        let mut matured = Vec::new();
        while let Some(Reverse(top)) = self.pending.peek() {
            if top.matures_at > timestamp {
                break;
            }
            let Some(Reverse(key)) = self.pending.pop() else { break };
            if let Some(record) = self.records.get_mut(&key.payment_id) {
                record.status = CashbackStatus::Applied;
                matured.push(record.clone());
            }
        }
        matured
    }

    /// Hand every pending cashback owned by `from` over to `to`.
    /// Applied records keep their historical owner. Returns how many moved.
    pub fn redirect(&mut self, from: &str, to: &str) -> usize {
        let mut moved = 0;
        for Reverse(key) in self.pending.iter() {
            if let Some(record) = self.records.get_mut(&key.payment_id) {
                if record.account_id == from {
                    record.account_id = to.to_string();
                    moved += 1;
                }
            }
        }
        moved
    }

    pub fn get(&self, payment_id: &str) -> Option<&CashbackRecord> {
        self.records.get(payment_id)
    }

    /// Status of `payment_id`, provided `account_id` currently owns it.
    pub fn status_for(&self, payment_id: &str, account_id: &str) -> LedgerResult<CashbackStatus> {
        let record = self
            .records
            .get(payment_id)
            .ok_or_else(|| LedgerError::PaymentNotFound {
                payment_id: payment_id.to_string(),
            })?;
        if record.account_id != account_id {
            return Err(LedgerError::AccountMismatch {
                payment_id: payment_id.to_string(),
                account_id: account_id.to_string(),
            });
        }
        Ok(record.status)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Number of payment ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.last_sequence
    }
}
