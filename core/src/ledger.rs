//! The ledger — single owner of all account, history and cashback state.
//!
//! ORDER OF EVERY PUBLIC OPERATION (fixed, never reordered):
//!   1. Observe the timestamp on the logical clock
//!   2. Sweep matured cashbacks as of that timestamp
//!   3. Validate — nothing is mutated if validation fails
//!   4. Mutate accounts / cashbacks
//!   5. Append balance snapshots and events
//!
//! RULES:
//!   - The ledger never reads wall-clock time.
//!   - Cashback credits land in history at their maturity time.
//!   - Only the account store touches balances.
//!
//! Merging lives in merge.rs and ranking in ranking.rs; both are further
//! `impl Ledger` blocks over the same state.

use crate::{
    account::AccountLedger,
    cashback::{CashbackRecord, CashbackScheduler, CashbackStatus},
    clock::LogicalClock,
    config::LedgerConfig,
    error::{LedgerError, LedgerResult},
    event::LedgerEvent,
    history::{BalanceHistory, Timeline},
    types::{Amount, PaymentId, Timestamp},
};

pub struct Ledger {
    pub(crate) config:    LedgerConfig,
    pub(crate) clock:     LogicalClock,
    pub(crate) accounts:  AccountLedger,
    pub(crate) history:   BalanceHistory,
    pub(crate) cashbacks: CashbackScheduler,
    pub(crate) events:    Vec<LedgerEvent>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            clock:     LogicalClock::new(config.strict_timestamps),
            accounts:  AccountLedger::new(),
            history:   BalanceHistory::new(),
            cashbacks: CashbackScheduler::new(&config),
            events:    Vec::new(),
            config,
        }
    }

    // ── Level 1: accounts ─────────────────────────────────────────

    pub fn create_account(&mut self, timestamp: Timestamp, account_id: &str) -> LedgerResult<()> {
        self.begin(timestamp)?;

        let generation = self.accounts.open(account_id, timestamp)?.generation;
        self.history.start(account_id, generation, timestamp);

        log::debug!("t={timestamp} created {account_id} (generation {generation})");
        self.events.push(LedgerEvent::AccountCreated {
            timestamp,
            account_id: account_id.to_string(),
            generation,
        });
        Ok(())
    }

    /// Returns the balance after the deposit.
    pub fn deposit(
        &mut self,
        timestamp: Timestamp,
        account_id: &str,
        amount: Amount,
    ) -> LedgerResult<Amount> {
        self.begin(timestamp)?;

        let account = self.accounts.credit(account_id, amount)?;
        let (balance, generation) = (account.balance, account.generation);
        self.history.record(account_id, generation, timestamp, balance);

        log::debug!("t={timestamp} deposit {amount} into {account_id}, balance {balance}");
        self.events.push(LedgerEvent::Deposited {
            timestamp,
            account_id: account_id.to_string(),
            amount,
            balance,
        });
        Ok(balance)
    }

    /// Returns the source account's balance after the transfer.
    pub fn transfer(
        &mut self,
        timestamp: Timestamp,
        source_account_id: &str,
        target_account_id: &str,
        amount: Amount,
    ) -> LedgerResult<Amount> {
        self.begin(timestamp)?;

        self.accounts.account(source_account_id)?;
        self.accounts.account(target_account_id)?;
        if source_account_id == target_account_id {
            return Err(LedgerError::SameAccount {
                account_id: source_account_id.to_string(),
            });
        }
        self.accounts.ensure_funds(source_account_id, amount)?;
        self.accounts.ensure_credit(target_account_id, amount)?;

        let source = self.accounts.debit(source_account_id, amount)?;
        let (source_balance, source_generation) = (source.balance, source.generation);
        let target = self.accounts.credit(target_account_id, amount)?;
        let (target_balance, target_generation) = (target.balance, target.generation);

        self.history
            .record(source_account_id, source_generation, timestamp, source_balance);
        self.history
            .record(target_account_id, target_generation, timestamp, target_balance);

        log::debug!(
            "t={timestamp} transfer {amount} {source_account_id} -> {target_account_id}"
        );
        self.events.push(LedgerEvent::Transferred {
            timestamp,
            source_account_id: source_account_id.to_string(),
            target_account_id: target_account_id.to_string(),
            amount,
            source_balance,
            target_balance,
        });
        Ok(source_balance)
    }

    // ── Level 3: payments and cashback ────────────────────────────

    /// Debit a payment and schedule its cashback. Returns the payment id.
    pub fn pay(
        &mut self,
        timestamp: Timestamp,
        account_id: &str,
        amount: Amount,
    ) -> LedgerResult<PaymentId> {
        self.begin(timestamp)?;

        let account = self.accounts.debit(account_id, amount)?;
        let (balance, generation) = (account.balance, account.generation);
        self.history.record(account_id, generation, timestamp, balance);

        let record = self.cashbacks.schedule(account_id, amount, timestamp);
        let payment_id = record.payment_id.clone();
        let (cashback, matures_at) = (record.amount, record.matures_at);

        log::debug!(
            "t={timestamp} {account_id} paid {amount} as {payment_id}, cashback {cashback} at {matures_at}"
        );
        self.events.push(LedgerEvent::PaymentMade {
            timestamp,
            account_id: account_id.to_string(),
            payment_id: payment_id.clone(),
            amount,
            balance,
            cashback,
            matures_at,
        });
        Ok(payment_id)
    }

    pub fn get_payment_status(
        &mut self,
        timestamp: Timestamp,
        account_id: &str,
        payment_id: &str,
    ) -> LedgerResult<CashbackStatus> {
        self.begin(timestamp)?;

        self.accounts.account(account_id)?;
        self.cashbacks.status_for(payment_id, account_id)
    }

    // ── Level 4: history ──────────────────────────────────────────

    /// Balance of `account_id` as of `time_at`. `timestamp` only drives the
    /// cashback sweep; callers are expected to pass `time_at <= timestamp`.
    pub fn get_balance(
        &mut self,
        timestamp: Timestamp,
        account_id: &str,
        time_at: Timestamp,
    ) -> LedgerResult<Amount> {
        self.begin(timestamp)?;
        self.history.balance_at(account_id, time_at)
    }

    // ── Read-only accessors (no sweep) ────────────────────────────

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn is_active(&self, account_id: &str) -> bool {
        self.accounts.is_active(account_id)
    }

    /// Current balance as of the last operation. Does not sweep.
    pub fn balance_of(&self, account_id: &str) -> Option<Amount> {
        self.accounts.account(account_id).ok().map(|a| a.balance)
    }

    pub fn outgoing_of(&self, account_id: &str) -> Option<Amount> {
        self.accounts.account(account_id).ok().map(|a| a.outgoing)
    }

    pub fn cashback(&self, payment_id: &str) -> Option<&CashbackRecord> {
        self.cashbacks.get(payment_id)
    }

    pub fn timeline(&self, account_id: &str) -> Option<&Timeline> {
        self.history.timeline(account_id)
    }

    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.clock.last_seen
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Internals ─────────────────────────────────────────────────

    /// Steps 1 and 2 of every operation.
    pub(crate) fn begin(&mut self, timestamp: Timestamp) -> LedgerResult<()> {
        self.clock.observe(timestamp)?;
        self.sweep_cashbacks(timestamp);
        Ok(())
    }

    /// Apply every cashback matured as of `timestamp`. Never fails: a
    /// cashback that cannot be credited is dropped and logged.
    fn sweep_cashbacks(&mut self, timestamp: Timestamp) {
        let matured = self.cashbacks.take_matured(timestamp);
        log::trace!("t={timestamp} sweep: {} cashback(s) matured", matured.len());

        for record in matured {
            let credited = self
                .accounts
                .credit(&record.account_id, record.amount)
                .map(|a| (a.balance, a.generation));

            match credited {
                Ok((balance, generation)) => {
                    self.history
                        .record(&record.account_id, generation, record.matures_at, balance);
                    log::debug!(
                        "t={} cashback {} credited {} to {}",
                        record.matures_at, record.payment_id, record.amount, record.account_id
                    );
                    self.events.push(LedgerEvent::CashbackApplied {
                        timestamp:  record.matures_at,
                        account_id: record.account_id,
                        payment_id: record.payment_id,
                        amount:     record.amount,
                        balance,
                    });
                }
                Err(e) => {
                    log::warn!("cashback {} dropped: {e}", record.payment_id);
                    self.events.push(LedgerEvent::CashbackDropped {
                        timestamp:  record.matures_at,
                        account_id: record.account_id,
                        payment_id: record.payment_id,
                        amount:     record.amount,
                    });
                }
            }
        }
    }
}
