//! Account merging.
//!
//! merge_accounts(t, target, source):
//!   - target absorbs source's balance and outgoing total
//!   - source's pending cashbacks now pay out to target
//!   - source is retired at t; its history stays readable for times < t
//!   - the source id may later be created again as a new lifecycle

use crate::{
    error::{LedgerError, LedgerResult},
    event::LedgerEvent,
    ledger::Ledger,
    types::{AccountId, Amount, Timestamp},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub target_account_id:    AccountId,
    pub source_account_id:    AccountId,
    /// Target balance after absorbing the source.
    pub balance:              Amount,
    pub outgoing:             Amount,
    pub redirected_cashbacks: usize,
}

impl Ledger {
    pub fn merge_accounts(
        &mut self,
        timestamp: Timestamp,
        target_account_id: &str,
        source_account_id: &str,
    ) -> LedgerResult<MergeSummary> {
        self.begin(timestamp)?;

        if target_account_id == source_account_id {
            return Err(LedgerError::SameAccount {
                account_id: target_account_id.to_string(),
            });
        }
        self.accounts.account(target_account_id)?;
        let source_balance = self.accounts.account(source_account_id)?.balance;
        self.accounts.ensure_credit(target_account_id, source_balance)?;

        let retired = self.accounts.remove(source_account_id)?;
        let target = self.accounts.absorb(target_account_id, &retired)?;
        let (balance, outgoing, generation) = (target.balance, target.outgoing, target.generation);

        let redirected_cashbacks = self.cashbacks.redirect(source_account_id, target_account_id);
        self.history.retire(source_account_id, timestamp);
        self.history.record(target_account_id, generation, timestamp, balance);

        log::debug!(
            "t={timestamp} merged {source_account_id} into {target_account_id}: \
             balance {balance}, outgoing {outgoing}, {redirected_cashbacks} cashback(s) redirected"
        );
        self.events.push(LedgerEvent::AccountsMerged {
            timestamp,
            target_account_id: target_account_id.to_string(),
            source_account_id: source_account_id.to_string(),
            balance,
            outgoing,
            redirected_cashbacks,
        });

        Ok(MergeSummary {
            target_account_id: target_account_id.to_string(),
            source_account_id: source_account_id.to_string(),
            balance,
            outgoing,
            redirected_cashbacks,
        })
    }
}
