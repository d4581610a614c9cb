#![allow(dead_code)]

use stocksim::domain::error::StocksimError;
use stocksim::domain::ledger::{LedgerRecord, TradeAction};
use stocksim::domain::portfolio::Portfolio;
use stocksim::domain::price::PriceMatrix;
use stocksim::ports::execution_port::ExecutionPort;

/// One call received by [`MockExecution`], with the holdings seen at the time.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionCall {
    CreatePortfolio {
        amounts: Vec<f64>,
    },
    Buy {
        day: usize,
        instrument: usize,
        held: u64,
    },
    Sell {
        day: usize,
        instrument: usize,
        held: u64,
    },
}

/// Execution port that buys a fixed number of shares per call and records
/// every call it receives.
pub struct MockExecution {
    pub shares_per_buy: u64,
    pub calls: Vec<ExecutionCall>,
}

impl MockExecution {
    pub fn new() -> Self {
        Self {
            shares_per_buy: 10,
            calls: Vec::new(),
        }
    }

    pub fn sells(&self) -> Vec<&ExecutionCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, ExecutionCall::Sell { .. }))
            .collect()
    }

    pub fn buys(&self) -> Vec<&ExecutionCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, ExecutionCall::Buy { .. }))
            .collect()
    }

    fn record(
        action: TradeAction,
        day: usize,
        instrument: usize,
        shares: u64,
        price: f64,
    ) -> LedgerRecord {
        let signed = match action {
            TradeAction::Buy => shares as i64,
            TradeAction::Sell => -(shares as i64),
        };
        LedgerRecord {
            action,
            day,
            instrument,
            shares: signed,
            price,
            cash: -(signed as f64) * price,
            fee: 0.0,
        }
    }
}

impl ExecutionPort for MockExecution {
    fn create_portfolio(
        &mut self,
        amounts: &[f64],
        prices: &PriceMatrix,
    ) -> Result<Portfolio, StocksimError> {
        self.calls.push(ExecutionCall::CreatePortfolio {
            amounts: amounts.to_vec(),
        });
        let mut portfolio = Portfolio::new(prices.instruments());
        for (instrument, _) in amounts.iter().enumerate() {
            if prices.price(0, instrument).is_quoted() {
                portfolio.add_shares(instrument, self.shares_per_buy);
            }
        }
        Ok(portfolio)
    }

    fn buy(
        &mut self,
        day: usize,
        instrument: usize,
        _amount: f64,
        prices: &PriceMatrix,
        portfolio: &mut Portfolio,
    ) -> Result<Option<LedgerRecord>, StocksimError> {
        self.calls.push(ExecutionCall::Buy {
            day,
            instrument,
            held: portfolio.shares(instrument),
        });
        let Some(price) = prices.price(day, instrument).value() else {
            return Ok(None);
        };
        portfolio.add_shares(instrument, self.shares_per_buy);
        Ok(Some(Self::record(
            TradeAction::Buy,
            day,
            instrument,
            self.shares_per_buy,
            price,
        )))
    }

    fn sell(
        &mut self,
        day: usize,
        instrument: usize,
        prices: &PriceMatrix,
        portfolio: &mut Portfolio,
    ) -> Result<Option<LedgerRecord>, StocksimError> {
        let held = portfolio.shares(instrument);
        self.calls.push(ExecutionCall::Sell {
            day,
            instrument,
            held,
        });
        let Some(price) = prices.price(day, instrument).value() else {
            return Ok(None);
        };
        let shares = portfolio.clear(instrument);
        if shares == 0 {
            return Ok(None);
        }
        Ok(Some(Self::record(
            TradeAction::Sell,
            day,
            instrument,
            shares,
            price,
        )))
    }
}

/// Day-major matrix from raw rows (`f64::NAN` = unavailable).
pub fn matrix(rows: &[Vec<f64>]) -> PriceMatrix {
    PriceMatrix::from_rows(rows).unwrap()
}

/// Single-instrument matrix from one price path.
pub fn single(prices: &[f64]) -> PriceMatrix {
    let rows: Vec<Vec<f64>> = prices.iter().map(|&p| vec![p]).collect();
    matrix(&rows)
}

/// A wave that repeatedly crosses its own moving averages.
pub fn wave(days: usize, base: f64, amplitude: f64, period: f64) -> Vec<f64> {
    (0..days)
        .map(|d| base + amplitude * (d as f64 * std::f64::consts::TAU / period).sin())
        .collect()
}
