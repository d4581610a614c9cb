//! Crossing moving averages: buy when the fast average crosses above the
//! slow one, sell when it crosses below.

use crate::domain::error::StocksimError;
use crate::domain::indicator::{moving_average, round2};
use crate::domain::ledger::TradeAction;
use crate::domain::price::PriceMatrix;
use crate::domain::strategy::{Session, StrategyRun};
use crate::ports::execution_port::ExecutionPort;

/// First retained index at which crossings are considered.
pub const FIRST_CROSSING_INDEX: usize = 51;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossingAveragesParams {
    /// Slow moving-average window.
    pub period_n: usize,
    /// Fast moving-average window.
    pub period_m: usize,
}

impl Default for CrossingAveragesParams {
    fn default() -> Self {
        CrossingAveragesParams {
            period_n: 200,
            period_m: 50,
        }
    }
}

impl CrossingAveragesParams {
    pub fn validate(&self) -> Result<(), StocksimError> {
        if self.period_m == 0 {
            return Err(StocksimError::InvalidWindow { window: 0 });
        }
        if self.period_m >= self.period_n {
            return Err(StocksimError::invalid_parameter(
                "period_m",
                format!(
                    "fast window {} must be shorter than slow window {}",
                    self.period_m, self.period_n
                ),
            ));
        }
        Ok(())
    }
}

/// Signal at position `k` of a `fast - slow` difference series.
///
/// A zero previous difference means the averages met; the sign before the
/// meeting decides whether this is a crossing or just a touch.
pub fn crossing_signal(diff: &[f64], k: usize) -> Option<TradeAction> {
    if k == 0 || k >= diff.len() {
        return None;
    }
    let current = diff[k];
    if current == 0.0 {
        return None;
    }
    let before = if diff[k - 1] != 0.0 {
        diff[k - 1]
    } else {
        diff[..k - 1]
            .iter()
            .rev()
            .copied()
            .find(|d| *d != 0.0)
            .unwrap_or(0.0)
    };

    if current > 0.0 && before <= 0.0 {
        Some(TradeAction::Buy)
    } else if current < 0.0 && before >= 0.0 {
        Some(TradeAction::Sell)
    } else {
        None
    }
}

pub fn run<E>(
    prices: &PriceMatrix,
    params: &CrossingAveragesParams,
    amount: f64,
    execution: &mut E,
) -> Result<StrategyRun, StocksimError>
where
    E: ExecutionPort + ?Sized,
{
    params.validate()?;
    let mut session = Session::open(execution, prices, amount)?;
    let last_day = session.last_day();

    for (instrument, path) in prices.columns().iter().enumerate() {
        let slow = moving_average(path, params.period_n, &[])?;
        let fast = moving_average(path, params.period_m, &[])?;
        let diff: Vec<f64> = fast
            .values
            .iter()
            .zip(&slow.values)
            .map(|(f, s)| round2(f - s))
            .collect();

        for k in FIRST_CROSSING_INDEX..diff.len() {
            let day = slow.days[k];
            if day >= last_day {
                break;
            }
            match crossing_signal(&diff, k) {
                Some(TradeAction::Buy) => session.buy(day, instrument)?,
                Some(TradeAction::Sell) => session.sell_all(day, instrument)?,
                None => {}
            }
        }
    }

    session.finish()
}
