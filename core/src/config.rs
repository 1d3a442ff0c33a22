use crate::types::{Amount, Timestamp};
use serde::{Deserialize, Serialize};

/// Default cashback rate, in whole percent of the payment amount.
pub const DEFAULT_CASHBACK_PERCENT: Amount = 2;

/// Default delay between a payment and its cashback maturing (24h in ms).
pub const DEFAULT_CASHBACK_DELAY: Timestamp = 24 * 60 * 60 * 1000;

pub const DEFAULT_PAYMENT_ID_PREFIX: &str = "payment";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Cashback credited per payment, as floor(amount * percent / 100).
    pub cashback_percent: Amount,
    /// Logical time between a payment and its cashback maturing.
    pub cashback_delay: Timestamp,
    pub payment_id_prefix: String,
    /// Reject operations whose timestamp is earlier than one already seen.
    pub strict_timestamps: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            cashback_percent:  DEFAULT_CASHBACK_PERCENT,
            cashback_delay:    DEFAULT_CASHBACK_DELAY,
            payment_id_prefix: DEFAULT_PAYMENT_ID_PREFIX.to_string(),
            strict_timestamps: false,
        }
    }
}

impl LedgerConfig {
    /// Load from a JSON file. Fields missing from the file keep their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content).map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: LedgerConfig = serde_json::from_str(content)?;
        if config.payment_id_prefix.is_empty() {
            anyhow::bail!("payment_id_prefix must not be empty");
        }
        Ok(config)
    }

    /// Cashback earned by a payment of `amount`.
    pub fn cashback_for(&self, amount: Amount) -> Amount {
        // u128 so that huge payments cannot overflow before the division.
        ((amount as u128 * self.cashback_percent as u128) / 100) as Amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_constants() {
        let config = LedgerConfig::default();
        assert_eq!(config.cashback_for(200), 4);
        assert_eq!(config.cashback_for(49), 0);
        assert_eq!(config.cashback_for(150), 3);
        assert_eq!(config.cashback_delay, 86_400_000);
        assert_eq!(config.payment_id_prefix, "payment");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = LedgerConfig::from_json(r#"{ "cashback_percent": 5 }"#).unwrap();
        assert_eq!(config.cashback_percent, 5);
        assert_eq!(config.cashback_delay, DEFAULT_CASHBACK_DELAY);
        assert!(!config.strict_timestamps);
    }

    #[test]
    fn empty_prefix_rejected() {
        assert!(LedgerConfig::from_json(r#"{ "payment_id_prefix": "" }"#).is_err());
    }
}
