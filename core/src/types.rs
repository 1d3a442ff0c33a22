//! Shared primitive types used across the entire ledger.

/// A logical timestamp supplied by the caller. The ledger never reads a real clock.
pub type Timestamp = u64;

/// An integer amount of money. Balances can never go negative.
pub type Amount = u64;

/// The external, caller-chosen account identifier.
pub type AccountId = String;

/// A generated payment identifier ("payment1", "payment2", ...).
pub type PaymentId = String;

/// Lifecycle generation of an account id. Bumped each time a merged-away
/// id is created again.
pub type Generation = u32;
