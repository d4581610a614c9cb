//! Executed-trade records.
//!
//! Ledger files hold one comma-separated row per trade, no header:
//! `action, day, instrument, shares, price, cash, fee`. Column order is part
//! of the file format; the aggregator reads day (1), instrument (2) and cash (5).

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "buy"),
            TradeAction::Sell => write!(f, "sell"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub action: TradeAction,
    pub day: usize,
    pub instrument: usize,
    /// Signed share delta: positive for buys, negative for sells.
    pub shares: i64,
    pub price: f64,
    /// Signed cash flow including the fee: negative for buys.
    pub cash: f64,
    pub fee: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_display() {
        assert_eq!(TradeAction::Buy.to_string(), "buy");
        assert_eq!(TradeAction::Sell.to_string(), "sell");
    }
}
