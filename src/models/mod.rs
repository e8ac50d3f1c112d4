pub mod confirmation;
pub mod strategy;
pub mod subscription;

pub use confirmation::{ExecutionParams, TradeConfirmation};
pub use strategy::Strategy;
pub use subscription::Subscription;

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TradeAction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    Swap,
    Buy,
    Sell,
}

impl TradeAction {
    pub fn from_api_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "SWAP" => Some(TradeAction::Swap),
            "BUY" => Some(TradeAction::Buy),
            "SELL" => Some(TradeAction::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Swap => write!(f, "SWAP"),
            TradeAction::Buy => write!(f, "BUY"),
            TradeAction::Sell => write!(f, "SELL"),
        }
    }
}

// ---------------------------------------------------------------------------
// Address validation
// ---------------------------------------------------------------------------

/// Checks the `0x` + 40 hex digit wallet address shape. Checksum casing is
/// not enforced; addresses are stored as received.
pub fn is_valid_address(s: &str) -> bool {
    s.len() == 42 && s.starts_with("0x") && s[2..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_address() {
        assert!(is_valid_address("0xAb5801a7D398351b8bE11C439e05C5b3259aeC9B"));
        assert!(is_valid_address("0x0000000000000000000000000000000000000000"));
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("0x"));
        assert!(!is_valid_address("Ab5801a7D398351b8bE11C439e05C5b3259aeC9B"));
        assert!(!is_valid_address("0xZZ5801a7D398351b8bE11C439e05C5b3259aeC9B"));
        assert!(!is_valid_address("0xAb5801a7D398351b8bE11C439e05C5b3259aeC9"));
    }

    #[test]
    fn test_trade_action_parsing() {
        assert_eq!(TradeAction::from_api_str("swap"), Some(TradeAction::Swap));
        assert_eq!(TradeAction::from_api_str("SELL"), Some(TradeAction::Sell));
        assert_eq!(TradeAction::from_api_str("stake"), None);
    }
}
