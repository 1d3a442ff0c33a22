use crate::{
    banking::BankingSystem,
    ledger::Ledger,
    types::{AccountId, Amount, PaymentId, Timestamp},
};
use serde::{Deserialize, Serialize};

/// One ledger operation as data, e.g. a line of a replay script.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LedgerCommand {
    CreateAccount {
        timestamp:  Timestamp,
        account_id: AccountId,
    },
    Deposit {
        timestamp:  Timestamp,
        account_id: AccountId,
        amount:     Amount,
    },
    Transfer {
        timestamp:         Timestamp,
        source_account_id: AccountId,
        target_account_id: AccountId,
        amount:            Amount,
    },
    TopSpenders {
        timestamp: Timestamp,
        n:         usize,
    },
    Pay {
        timestamp:  Timestamp,
        account_id: AccountId,
        amount:     Amount,
    },
    GetPaymentStatus {
        timestamp:  Timestamp,
        account_id: AccountId,
        payment_id: PaymentId,
    },
    MergeAccounts {
        timestamp:    Timestamp,
        account_id_1: AccountId,
        account_id_2: AccountId,
    },
    GetBalance {
        timestamp:  Timestamp,
        account_id: AccountId,
        time_at:    Timestamp,
    },
}

impl LedgerCommand {
    pub fn timestamp(&self) -> Timestamp {
        match self {
            Self::CreateAccount { timestamp, .. }
            | Self::Deposit { timestamp, .. }
            | Self::Transfer { timestamp, .. }
            | Self::TopSpenders { timestamp, .. }
            | Self::Pay { timestamp, .. }
            | Self::GetPaymentStatus { timestamp, .. }
            | Self::MergeAccounts { timestamp, .. }
            | Self::GetBalance { timestamp, .. } => *timestamp,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateAccount { .. }    => "create_account",
            Self::Deposit { .. }          => "deposit",
            Self::Transfer { .. }         => "transfer",
            Self::TopSpenders { .. }      => "top_spenders",
            Self::Pay { .. }              => "pay",
            Self::GetPaymentStatus { .. } => "get_payment_status",
            Self::MergeAccounts { .. }    => "merge_accounts",
            Self::GetBalance { .. }       => "get_balance",
        }
    }
}

/// Sentinel-style result of one command. Serializes to a bare JSON value
/// (`true`, `42`, `"payment3"`, `["a(5)"]`, `null`).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CommandOutcome {
    Bool(bool),
    Balance(Amount),
    PaymentId(PaymentId),
    Status(String),
    Spenders(Vec<String>),
    Null,
}

impl CommandOutcome {
    /// True for the `false` / `null` sentinels.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Bool(false) | Self::Null)
    }
}

impl Ledger {
    pub fn apply(&mut self, command: &LedgerCommand) -> CommandOutcome {
        use CommandOutcome as Out;

        match command {
            LedgerCommand::CreateAccount { timestamp, account_id } => {
                Out::Bool(BankingSystem::create_account(self, *timestamp, account_id))
            }
            LedgerCommand::Deposit { timestamp, account_id, amount } => {
                BankingSystem::deposit(self, *timestamp, account_id, *amount)
                    .map_or(Out::Null, Out::Balance)
            }
            LedgerCommand::Transfer {
                timestamp,
                source_account_id,
                target_account_id,
                amount,
            } => BankingSystem::transfer(
                self,
                *timestamp,
                source_account_id,
                target_account_id,
                *amount,
            )
            .map_or(Out::Null, Out::Balance),
            LedgerCommand::TopSpenders { timestamp, n } => {
                Out::Spenders(BankingSystem::top_spenders(self, *timestamp, *n))
            }
            LedgerCommand::Pay { timestamp, account_id, amount } => {
                BankingSystem::pay(self, *timestamp, account_id, *amount)
                    .map_or(Out::Null, Out::PaymentId)
            }
            LedgerCommand::GetPaymentStatus { timestamp, account_id, payment_id } => {
                BankingSystem::get_payment_status(self, *timestamp, account_id, payment_id)
                    .map_or(Out::Null, Out::Status)
            }
            LedgerCommand::MergeAccounts { timestamp, account_id_1, account_id_2 } => {
                Out::Bool(BankingSystem::merge_accounts(
                    self,
                    *timestamp,
                    account_id_1,
                    account_id_2,
                ))
            }
            LedgerCommand::GetBalance { timestamp, account_id, time_at } => {
                BankingSystem::get_balance(self, *timestamp, account_id, *time_at)
                    .map_or(Out::Null, Out::Balance)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_from_json_lines() {
        let cmd: LedgerCommand =
            serde_json::from_str(r#"{"op":"transfer","timestamp":3,"source_account_id":"a","target_account_id":"b","amount":5}"#)
                .unwrap();
        assert_eq!(cmd.name(), "transfer");
        assert_eq!(cmd.timestamp(), 3);
    }

    #[test]
    fn outcomes_serialize_as_bare_values() {
        assert_eq!(serde_json::to_string(&CommandOutcome::Null).unwrap(), "null");
        assert_eq!(serde_json::to_string(&CommandOutcome::Balance(7)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&CommandOutcome::Spenders(vec!["a(1)".into()])).unwrap(),
            r#"["a(1)"]"#
        );
        assert!(CommandOutcome::Bool(false).is_rejection());
        assert!(!CommandOutcome::Bool(true).is_rejection());
    }

    #[test]
    fn apply_runs_through_sentinel_surface() {
        let mut ledger = Ledger::new();
        let script = [
            LedgerCommand::CreateAccount { timestamp: 1, account_id: "a".into() },
            LedgerCommand::CreateAccount { timestamp: 2, account_id: "a".into() },
            LedgerCommand::Deposit { timestamp: 3, account_id: "a".into(), amount: 500 },
            LedgerCommand::Pay { timestamp: 4, account_id: "a".into(), amount: 100 },
            LedgerCommand::GetPaymentStatus {
                timestamp:  5,
                account_id: "a".into(),
                payment_id: "payment1".into(),
            },
            LedgerCommand::Deposit { timestamp: 6, account_id: "zz".into(), amount: 1 },
        ];
        let outcomes: Vec<_> = script.iter().map(|c| ledger.apply(c)).collect();
        assert_eq!(
            outcomes,
            vec![
                CommandOutcome::Bool(true),
                CommandOutcome::Bool(false),
                CommandOutcome::Balance(500),
                CommandOutcome::PaymentId("payment1".into()),
                CommandOutcome::Status("IN_PROGRESS".into()),
                CommandOutcome::Null,
            ]
        );
    }
}
