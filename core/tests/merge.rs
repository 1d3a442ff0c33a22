//! Account merge tests.
//!
//! Merging folds the source into the target, redirects the source's
//! pending cashbacks and retires the source id as of the merge time.

use ledger_core::{cashback::CashbackStatus, BankingSystem, Ledger, LedgerError};

const DAY: u64 = 86_400_000;

// ── Test helpers ────────────────────────────────────────────────────────────

fn two_accounts() -> Ledger {
    let mut ledger = Ledger::new();
    ledger.create_account(0, "A").unwrap();
    ledger.create_account(0, "B").unwrap();
    ledger
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn merge_scenario_retires_source_at_merge_time() {
    let mut ledger = two_accounts();
    ledger.deposit(1, "A", 100).unwrap();

    assert!(BankingSystem::merge_accounts(&mut ledger, 5, "A", "B"));
    assert_eq!(ledger.balance_of("A"), Some(100));
    assert!(!ledger.is_active("B"));
    assert_eq!(BankingSystem::deposit(&mut ledger, 6, "B", 1), None);

    assert_eq!(BankingSystem::get_balance(&mut ledger, 6, "B", 4), Some(0));
    assert_eq!(BankingSystem::get_balance(&mut ledger, 6, "B", 5), None);
    assert_eq!(BankingSystem::get_balance(&mut ledger, 6, "B", 6), None);
}

#[test]
fn merge_preserves_total_funds_and_outgoing() {
    let mut ledger = two_accounts();
    ledger.create_account(0, "C").unwrap();
    ledger.deposit(1, "A", 100).unwrap();
    ledger.deposit(1, "B", 70).unwrap();
    ledger.transfer(2, "A", "C", 10).unwrap();
    ledger.pay(3, "B", 20).unwrap();

    let summary = ledger.merge_accounts(5, "A", "B").unwrap();
    assert_eq!(summary.balance, 90 + 50);
    assert_eq!(summary.outgoing, 10 + 20);
    assert_eq!(ledger.outgoing_of("A"), Some(30));

    // History of both sides around the merge.
    assert_eq!(ledger.get_balance(6, "A", 4).unwrap(), 90);
    assert_eq!(ledger.get_balance(6, "A", 5).unwrap(), 140);
    assert_eq!(ledger.get_balance(6, "B", 4).unwrap(), 50);
    assert!(ledger.get_balance(6, "B", 5).is_err());
}

#[test]
fn merge_rejects_same_or_missing_accounts() {
    let mut ledger = two_accounts();
    ledger.deposit(1, "A", 10).unwrap();

    assert!(matches!(
        ledger.merge_accounts(2, "A", "A"),
        Err(LedgerError::SameAccount { .. })
    ));
    assert!(matches!(
        ledger.merge_accounts(2, "A", "ghost"),
        Err(LedgerError::AccountNotFound { .. })
    ));
    assert!(matches!(
        ledger.merge_accounts(2, "ghost", "A"),
        Err(LedgerError::AccountNotFound { .. })
    ));
    assert!(ledger.is_active("A"));
    assert_eq!(ledger.balance_of("A"), Some(10));
}

#[test]
fn pending_cashback_follows_the_surviving_account() {
    let mut ledger = two_accounts();
    ledger.deposit(1, "B", 1_000).unwrap();
    let id = ledger.pay(10, "B", 500).unwrap();

    let summary = ledger.merge_accounts(20, "A", "B").unwrap();
    assert_eq!(summary.redirected_cashbacks, 1);
    assert_eq!(summary.balance, 500);

    assert_eq!(ledger.get_payment_status(30, "A", &id).unwrap(), CashbackStatus::Pending);
    assert!(matches!(
        ledger.get_payment_status(30, "B", &id),
        Err(LedgerError::AccountNotFound { .. })
    ));

    assert_eq!(
        ledger.get_payment_status(DAY + 10, "A", &id).unwrap(),
        CashbackStatus::Applied
    );
    assert_eq!(ledger.balance_of("A"), Some(510));
    assert_eq!(ledger.get_balance(DAY + 10, "A", DAY + 10).unwrap(), 510);
    assert!(ledger.events().iter().all(|e| e.kind() != "cashback_dropped"));
}

#[test]
fn applied_cashback_keeps_its_original_owner() {
    let mut ledger = two_accounts();
    ledger.deposit(1, "B", 1_000).unwrap();
    let id = ledger.pay(1, "B", 100).unwrap();

    ledger.deposit(DAY + 1, "A", 0).unwrap();
    assert_eq!(ledger.balance_of("B"), Some(902));

    let summary = ledger.merge_accounts(DAY + 2, "A", "B").unwrap();
    assert_eq!(summary.redirected_cashbacks, 0);
    assert_eq!(summary.balance, 902);
    assert!(matches!(
        ledger.get_payment_status(DAY + 3, "A", &id),
        Err(LedgerError::AccountMismatch { .. })
    ));
}

#[test]
fn merged_id_can_be_created_again_as_a_fresh_lifecycle() {
    let mut ledger = two_accounts();
    ledger.deposit(1, "B", 300).unwrap();
    ledger.pay(2, "B", 100).unwrap();
    ledger.merge_accounts(5, "A", "B").unwrap();

    assert!(BankingSystem::create_account(&mut ledger, 50, "B"));
    assert_eq!(ledger.balance_of("B"), Some(0));
    assert_eq!(ledger.outgoing_of("B"), Some(0));
    assert_eq!(ledger.timeline("B").unwrap().generation, 1);
    assert_eq!(ledger.timeline("B").unwrap().retired_at, None);

    // The old lifecycle is gone, including its pre-merge history.
    assert!(ledger.get_balance(60, "B", 2).is_err());
    assert!(ledger.get_balance(60, "B", 49).is_err());
    assert_eq!(ledger.get_balance(60, "B", 50).unwrap(), 0);

    assert_eq!(
        BankingSystem::top_spenders(&mut ledger, 60, 5),
        vec!["A(100)".to_string(), "B(0)".to_string()]
    );
}

#[test]
fn chained_merges_carry_cashbacks_along() {
    let mut ledger = two_accounts();
    ledger.create_account(0, "C").unwrap();
    ledger.deposit(1, "C", 1_000).unwrap();
    let id = ledger.pay(2, "C", 1_000).unwrap();

    ledger.merge_accounts(3, "B", "C").unwrap();
    ledger.merge_accounts(4, "A", "B").unwrap();

    assert_eq!(
        ledger.get_payment_status(DAY + 2, "A", &id).unwrap(),
        CashbackStatus::Applied
    );
    assert_eq!(ledger.balance_of("A"), Some(20));
    assert_eq!(ledger.outgoing_of("A"), Some(1_000));
}
