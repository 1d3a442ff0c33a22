//! Timestamp-driven in-memory ledger.
//!
//! Accounts, deposits, transfers, payments with deferred cashback,
//! account merging and point-in-time balance queries. Every operation
//! takes an explicit logical timestamp; see `ledger` for the ordering
//! rules every operation follows.

pub mod account;
pub mod banking;
pub mod cashback;
pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod history;
pub mod ledger;
pub mod merge;
pub mod ranking;
pub mod snapshot;
pub mod types;
pub mod workload;

pub use banking::BankingSystem;
pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
