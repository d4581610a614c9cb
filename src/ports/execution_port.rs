//! Trade execution port trait.
//!
//! Strategies decide; an execution port carries the decision out: it prices
//! the trade, charges the fee, updates the portfolio and records the trade.
//! A call that cannot trade (unavailable price, nothing to sell, amount too
//! small for one share) changes nothing and returns `Ok(None)`.

use crate::domain::error::StocksimError;
use crate::domain::ledger::LedgerRecord;
use crate::domain::portfolio::Portfolio;
use crate::domain::price::PriceMatrix;

pub trait ExecutionPort {
    /// Open a portfolio by spending `amounts[i]` on instrument `i` on day 0.
    fn create_portfolio(
        &mut self,
        amounts: &[f64],
        prices: &PriceMatrix,
    ) -> Result<Portfolio, StocksimError>;

    /// Spend up to `amount` (fee included) on whole shares of `instrument`.
    fn buy(
        &mut self,
        day: usize,
        instrument: usize,
        amount: f64,
        prices: &PriceMatrix,
        portfolio: &mut Portfolio,
    ) -> Result<Option<LedgerRecord>, StocksimError>;

    /// Sell every held share of `instrument`.
    fn sell(
        &mut self,
        day: usize,
        instrument: usize,
        prices: &PriceMatrix,
        portfolio: &mut Portfolio,
    ) -> Result<Option<LedgerRecord>, StocksimError>;
}
