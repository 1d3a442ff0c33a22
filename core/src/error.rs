use crate::types::{AccountId, Amount, PaymentId, Timestamp};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account '{account_id}' already exists")]
    AccountAlreadyExists { account_id: AccountId },

    #[error("Account '{account_id}' not found")]
    AccountNotFound { account_id: AccountId },

    #[error("Source and target are the same account '{account_id}'")]
    SameAccount { account_id: AccountId },

    #[error("Insufficient funds in '{account_id}': balance {balance}, requested {requested}")]
    InsufficientFunds {
        account_id: AccountId,
        balance:    Amount,
        requested:  Amount,
    },

    #[error("Payment '{payment_id}' not found")]
    PaymentNotFound { payment_id: PaymentId },

    #[error("Payment '{payment_id}' is not owned by account '{account_id}'")]
    AccountMismatch {
        payment_id: PaymentId,
        account_id: AccountId,
    },

    #[error("Crediting {amount} to '{account_id}' would overflow its balance")]
    BalanceOverflow { account_id: AccountId, amount: Amount },

    #[error("Timestamp went backwards: last seen {last_seen}, got {actual}")]
    TimestampRegression { last_seen: Timestamp, actual: Timestamp },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for LedgerError {
    fn from(e: serde_json::Error) -> Self {
        LedgerError::Serialization(e.to_string())
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
