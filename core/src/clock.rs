//! Logical clock — tracks the highest timestamp any operation has carried.
//!
//! The ledger never reads wall-clock time. Callers promise non-decreasing
//! timestamps; the clock only observes that promise and reports breaks.

use crate::{
    error::{LedgerError, LedgerResult},
    types::Timestamp,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogicalClock {
    pub last_seen: Option<Timestamp>,
    pub strict:    bool,
}

impl LogicalClock {
    pub fn new(strict: bool) -> Self {
        Self { last_seen: None, strict }
    }

    /// Record `timestamp` as observed.
    /// In strict mode a regression is rejected and nothing is recorded.
    pub fn observe(&mut self, timestamp: Timestamp) -> LedgerResult<()> {
        match self.last_seen {
            Some(last) if timestamp < last => {
                if self.strict {
                    return Err(LedgerError::TimestampRegression {
                        last_seen: last,
                        actual:    timestamp,
                    });
                }
                log::warn!("timestamp regression: last seen {last}, got {timestamp}");
            }
            _ => self.last_seen = Some(timestamp),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_clock_keeps_high_water_mark() {
        let mut clock = LogicalClock::new(false);
        clock.observe(10).unwrap();
        clock.observe(5).unwrap();
        assert_eq!(clock.last_seen, Some(10));
        clock.observe(10).unwrap();
        clock.observe(11).unwrap();
        assert_eq!(clock.last_seen, Some(11));
    }

    #[test]
    fn strict_clock_rejects_regression() {
        let mut clock = LogicalClock::new(true);
        clock.observe(10).unwrap();
        let err = clock.observe(9).unwrap_err();
        assert_eq!(err, LedgerError::TimestampRegression { last_seen: 10, actual: 9 });
    }
}
