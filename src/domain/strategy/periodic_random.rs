//! Periodic random strategy: every `period` days, flip a three-sided coin per
//! instrument.

use crate::domain::error::StocksimError;
use crate::domain::price::PriceMatrix;
use crate::domain::strategy::{Session, StrategyRun};
use crate::ports::execution_port::ExecutionPort;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicRandomParams {
    /// Days between trading opportunities.
    pub period: usize,
}

impl Default for PeriodicRandomParams {
    fn default() -> Self {
        PeriodicRandomParams { period: 7 }
    }
}

impl PeriodicRandomParams {
    pub fn validate(&self) -> Result<(), StocksimError> {
        if self.period == 0 {
            return Err(StocksimError::invalid_parameter(
                "period",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Buy,
    Sell,
    Hold,
}

fn draw<R: Rng>(rng: &mut R) -> Choice {
    match rng.gen_range(0..3) {
        0 => Choice::Buy,
        1 => Choice::Sell,
        _ => Choice::Hold,
    }
}

/// Days strictly between day 0 and the last day that are multiples of `period`.
pub fn trading_days(days: usize, period: usize) -> Vec<usize> {
    if period == 0 {
        return Vec::new();
    }
    (1..days.saturating_sub(1))
        .filter(|d| d % period == 0)
        .collect()
}

pub fn run<E, R>(
    prices: &PriceMatrix,
    params: &PeriodicRandomParams,
    amount: f64,
    execution: &mut E,
    rng: &mut R,
) -> Result<StrategyRun, StocksimError>
where
    E: ExecutionPort + ?Sized,
    R: Rng,
{
    params.validate()?;
    let mut session = Session::open(execution, prices, amount)?;

    for day in trading_days(prices.days(), params.period) {
        for instrument in 0..prices.instruments() {
            // The draw is only made for quoted prices.
            if !session.is_tradable(day, instrument) {
                continue;
            }
            match draw(rng) {
                Choice::Buy => session.buy(day, instrument)?,
                Choice::Sell => session.sell_all(day, instrument)?,
                Choice::Hold => {}
            }
        }
    }

    session.finish()
}
