//! Deterministic workload generation.
//!
//! RULE: Nothing here may call any platform RNG. A workload is fully
//! determined by its seed, so a run can be replayed command for command.

use crate::{
    command::LedgerCommand,
    config::{DEFAULT_CASHBACK_DELAY, DEFAULT_PAYMENT_ID_PREFIX},
    types::{AccountId, Timestamp},
};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A seeded RNG stream.
pub struct WorkloadRng {
    inner: Pcg64Mcg,
}

impl WorkloadRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Produces a mixed stream of every ledger operation over a small pool of
/// account ids, with non-decreasing timestamps.
pub struct WorkloadGenerator {
    rng:           WorkloadRng,
    account_pool:  u64,
    timestamp:     Timestamp,
    payments_made: u64,
}

impl WorkloadGenerator {
    pub fn new(seed: u64, account_pool: u64) -> Self {
        Self {
            rng: WorkloadRng::new(seed),
            account_pool: account_pool.max(2),
            timestamp: 0,
            payments_made: 0,
        }
    }

    pub fn generate(&mut self, ops: usize) -> Vec<LedgerCommand> {
        (0..ops).map(|_| self.next_command()).collect()
    }

    pub fn next_command(&mut self) -> LedgerCommand {
        self.advance_clock();
        let timestamp = self.timestamp;
        let roll = self.rng.next_u64_below(100);

        match roll {
            0..=14 => LedgerCommand::CreateAccount {
                timestamp,
                account_id: self.pick_account(),
            },
            15..=39 => LedgerCommand::Deposit {
                timestamp,
                account_id: self.pick_account(),
                amount: 1 + self.rng.next_u64_below(5_000),
            },
            40..=54 => LedgerCommand::Transfer {
                timestamp,
                source_account_id: self.pick_account(),
                target_account_id: self.pick_account(),
                amount: self.rng.next_u64_below(2_000),
            },
            55..=69 => {
                self.payments_made += 1;
                LedgerCommand::Pay {
                    timestamp,
                    account_id: self.pick_account(),
                    amount: self.rng.next_u64_below(1_500),
                }
            }
            70..=77 => LedgerCommand::GetPaymentStatus {
                timestamp,
                account_id: self.pick_account(),
                payment_id: format!(
                    "{DEFAULT_PAYMENT_ID_PREFIX}{}",
                    1 + self.rng.next_u64_below(self.payments_made + 1)
                ),
            },
            78..=81 => LedgerCommand::MergeAccounts {
                timestamp,
                account_id_1: self.pick_account(),
                account_id_2: self.pick_account(),
            },
            82..=89 => LedgerCommand::TopSpenders {
                timestamp,
                n: 1 + self.rng.next_u64_below(self.account_pool) as usize,
            },
            _ => LedgerCommand::GetBalance {
                timestamp,
                account_id: self.pick_account(),
                time_at: self.rng.next_u64_below(timestamp + 1),
            },
        }
    }

    fn advance_clock(&mut self) {
        // Occasionally leap a whole cashback delay so payments mature mid-run.
        let step = if self.rng.chance(0.03) {
            DEFAULT_CASHBACK_DELAY
        } else {
            self.rng.next_u64_below(1_000)
        };
        self.timestamp += step;
    }

    fn pick_account(&mut self) -> AccountId {
        format!("acct-{}", self.rng.next_u64_below(self.account_pool))
    }
}
