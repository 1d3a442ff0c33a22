//! The ledger event log.
//!
//! Every successful mutation, and every cashback the sweep settles,
//! appends one event. Two ledgers fed the same commands produce the
//! same log, event for event.

use crate::types::{AccountId, Amount, Generation, PaymentId, Timestamp};
use serde::{Deserialize, Serialize};

/// Variants are append-only — never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    AccountCreated {
        timestamp:  Timestamp,
        account_id: AccountId,
        generation: Generation,
    },
    Deposited {
        timestamp:  Timestamp,
        account_id: AccountId,
        amount:     Amount,
        balance:    Amount,
    },
    Transferred {
        timestamp:         Timestamp,
        source_account_id: AccountId,
        target_account_id: AccountId,
        amount:            Amount,
        source_balance:    Amount,
        target_balance:    Amount,
    },
    PaymentMade {
        timestamp:  Timestamp,
        account_id: AccountId,
        payment_id: PaymentId,
        amount:     Amount,
        balance:    Amount,
        cashback:   Amount,
        matures_at: Timestamp,
    },
    /// `timestamp` is the maturity time, not the call that noticed it.
    CashbackApplied {
        timestamp:  Timestamp,
        account_id: AccountId,
        payment_id: PaymentId,
        amount:     Amount,
        balance:    Amount,
    },
    CashbackDropped {
        timestamp:  Timestamp,
        account_id: AccountId,
        payment_id: PaymentId,
        amount:     Amount,
    },
    AccountsMerged {
        timestamp:            Timestamp,
        target_account_id:    AccountId,
        source_account_id:    AccountId,
        balance:              Amount,
        outgoing:             Amount,
        redirected_cashbacks: usize,
    },
}

impl LedgerEvent {
    /// Stable name used in summaries and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AccountCreated { .. }  => "account_created",
            Self::Deposited { .. }       => "deposited",
            Self::Transferred { .. }     => "transferred",
            Self::PaymentMade { .. }     => "payment_made",
            Self::CashbackApplied { .. } => "cashback_applied",
            Self::CashbackDropped { .. } => "cashback_dropped",
            Self::AccountsMerged { .. }  => "accounts_merged",
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        match self {
            Self::AccountCreated { timestamp, .. }
            | Self::Deposited { timestamp, .. }
            | Self::Transferred { timestamp, .. }
            | Self::PaymentMade { timestamp, .. }
            | Self::CashbackApplied { timestamp, .. }
            | Self::CashbackDropped { timestamp, .. }
            | Self::AccountsMerged { timestamp, .. } => *timestamp,
        }
    }
}
