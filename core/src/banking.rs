//! The harness-facing operation set.
//!
//! Callers driving the ledger from a script expect sentinels, not typed
//! errors: `false` for a rejected create/merge and `None` for any other
//! rejected operation. `Ledger`'s inherent methods keep the typed
//! `LedgerError`; this trait collapses it.

use crate::{
    ledger::Ledger,
    types::{Amount, PaymentId, Timestamp},
};

pub trait BankingSystem {
    fn create_account(&mut self, timestamp: Timestamp, account_id: &str) -> bool;

    fn deposit(&mut self, timestamp: Timestamp, account_id: &str, amount: Amount) -> Option<Amount>;

    fn transfer(
        &mut self,
        timestamp: Timestamp,
        source_account_id: &str,
        target_account_id: &str,
        amount: Amount,
    ) -> Option<Amount>;

    /// Up to `n` entries formatted as `id(total)`.
    fn top_spenders(&mut self, timestamp: Timestamp, n: usize) -> Vec<String>;

    fn pay(&mut self, timestamp: Timestamp, account_id: &str, amount: Amount) -> Option<PaymentId>;

    /// `"IN_PROGRESS"` or `"CASHBACK_RECEIVED"`.
    fn get_payment_status(
        &mut self,
        timestamp: Timestamp,
        account_id: &str,
        payment_id: &str,
    ) -> Option<String>;

    fn merge_accounts(
        &mut self,
        timestamp: Timestamp,
        account_id_1: &str,
        account_id_2: &str,
    ) -> bool;

    fn get_balance(
        &mut self,
        timestamp: Timestamp,
        account_id: &str,
        time_at: Timestamp,
    ) -> Option<Amount>;
}

impl BankingSystem for Ledger {
    fn create_account(&mut self, timestamp: Timestamp, account_id: &str) -> bool {
        Ledger::create_account(self, timestamp, account_id).is_ok()
    }

    fn deposit(&mut self, timestamp: Timestamp, account_id: &str, amount: Amount) -> Option<Amount> {
        Ledger::deposit(self, timestamp, account_id, amount).ok()
    }

    fn transfer(
        &mut self,
        timestamp: Timestamp,
        source_account_id: &str,
        target_account_id: &str,
        amount: Amount,
    ) -> Option<Amount> {
        Ledger::transfer(self, timestamp, source_account_id, target_account_id, amount).ok()
    }

    fn top_spenders(&mut self, timestamp: Timestamp, n: usize) -> Vec<String> {
        Ledger::top_spenders(self, timestamp, n)
            .map(|entries| entries.iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    fn pay(&mut self, timestamp: Timestamp, account_id: &str, amount: Amount) -> Option<PaymentId> {
        Ledger::pay(self, timestamp, account_id, amount).ok()
    }

    fn get_payment_status(
        &mut self,
        timestamp: Timestamp,
        account_id: &str,
        payment_id: &str,
    ) -> Option<String> {
        Ledger::get_payment_status(self, timestamp, account_id, payment_id)
            .ok()
            .map(|status| status.as_str().to_string())
    }

    fn merge_accounts(
        &mut self,
        timestamp: Timestamp,
        account_id_1: &str,
        account_id_2: &str,
    ) -> bool {
        Ledger::merge_accounts(self, timestamp, account_id_1, account_id_2).is_ok()
    }

    fn get_balance(
        &mut self,
        timestamp: Timestamp,
        account_id: &str,
        time_at: Timestamp,
    ) -> Option<Amount> {
        Ledger::get_balance(self, timestamp, account_id, time_at).ok()
    }
}
