//! Trade execution against a flat per-transaction fee.
//!
//! Buys spend a fixed amount on whole shares: `shares = floor((amount - fee) / price)`.
//! Sells always close the whole holding. Every executed trade is appended to
//! the ledger with its price and signed cash flow rounded to cents.

use crate::domain::error::StocksimError;
use crate::domain::indicator::round2;
use crate::domain::ledger::{LedgerRecord, TradeAction};
use crate::domain::portfolio::Portfolio;
use crate::domain::price::PriceMatrix;
use crate::ports::execution_port::ExecutionPort;
use crate::ports::ledger_port::LedgerPort;

/// Configuration for trade execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionConfig {
    /// Amount spent on each purchase, fee included.
    pub amount: f64,
    /// Flat fee charged on every buy and sell.
    pub fees: f64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        ExecutionConfig {
            amount: 5000.0,
            fees: 20.0,
        }
    }
}

/// Whole shares affordable with `amount` after paying `fees`.
pub fn affordable_shares(amount: f64, fees: f64, price: f64) -> u64 {
    if price <= 0.0 || amount <= fees {
        return 0;
    }
    ((amount - fees) / price).floor() as u64
}

/// Cash paid for a purchase, as a negative amount.
pub fn purchase_cash(shares: u64, price: f64, fees: f64) -> f64 {
    -(shares as f64 * price + fees)
}

/// Cash received for a sale, net of the fee.
pub fn sale_cash(shares: u64, price: f64, fees: f64) -> f64 {
    shares as f64 * price - fees
}

/// Executes trades and writes each one to a [`LedgerPort`].
pub struct LedgerExecution<L: LedgerPort> {
    fees: f64,
    ledger: L,
}

impl<L: LedgerPort> LedgerExecution<L> {
    pub fn new(fees: f64, ledger: L) -> Self {
        Self { fees, ledger }
    }

    pub fn fees(&self) -> f64 {
        self.fees
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn into_ledger(self) -> L {
        self.ledger
    }

    fn record(&mut self, record: LedgerRecord) -> Result<Option<LedgerRecord>, StocksimError> {
        log::debug!(
            "{} day {} instrument {}: {} shares at {:.2} ({:+.2})",
            record.action,
            record.day,
            record.instrument,
            record.shares,
            record.price,
            record.cash
        );
        self.ledger.append(&record)?;
        Ok(Some(record))
    }
}

impl<L: LedgerPort> ExecutionPort for LedgerExecution<L> {
    fn create_portfolio(
        &mut self,
        amounts: &[f64],
        prices: &PriceMatrix,
    ) -> Result<Portfolio, StocksimError> {
        if amounts.len() != prices.instruments() {
            return Err(StocksimError::LengthMismatch {
                left: "amounts".into(),
                left_len: amounts.len(),
                right: "instruments".into(),
                right_len: prices.instruments(),
            });
        }
        let mut portfolio = Portfolio::new(prices.instruments());
        for (instrument, &amount) in amounts.iter().enumerate() {
            self.buy(0, instrument, amount, prices, &mut portfolio)?;
        }
        Ok(portfolio)
    }

    fn buy(
        &mut self,
        day: usize,
        instrument: usize,
        amount: f64,
        prices: &PriceMatrix,
        portfolio: &mut Portfolio,
    ) -> Result<Option<LedgerRecord>, StocksimError> {
        let Some(price) = prices.price(day, instrument).value() else {
            return Ok(None);
        };
        let shares = affordable_shares(amount, self.fees, price);
        if shares == 0 {
            log::debug!(
                "day {} instrument {}: {:.2} does not cover one share at {:.2}",
                day,
                instrument,
                amount,
                price
            );
            return Ok(None);
        }

        portfolio.add_shares(instrument, shares);
        self.record(LedgerRecord {
            action: TradeAction::Buy,
            day,
            instrument,
            shares: shares as i64,
            price: round2(price),
            cash: round2(purchase_cash(shares, price, self.fees)),
            fee: self.fees,
        })
    }

    fn sell(
        &mut self,
        day: usize,
        instrument: usize,
        prices: &PriceMatrix,
        portfolio: &mut Portfolio,
    ) -> Result<Option<LedgerRecord>, StocksimError> {
        let Some(price) = prices.price(day, instrument).value() else {
            return Ok(None);
        };
        let shares = portfolio.clear(instrument);
        if shares == 0 {
            return Ok(None);
        }

        self.record(LedgerRecord {
            action: TradeAction::Sell,
            day,
            instrument,
            shares: -(shares as i64),
            price: round2(price),
            cash: round2(sale_cash(shares, price, self.fees)),
            fee: self.fees,
        })
    }
}
