//! Momentum strategy driven by an oscillator.
//!
//! After `days_wait` consecutive readings strictly above `t_over` the
//! instrument is considered overvalued and sold; after `days_wait` readings
//! strictly below `t_under` it is undervalued and bought.

use crate::domain::error::StocksimError;
use crate::domain::indicator::{DEFAULT_WINDOW, OscillatorKind, oscillator};
use crate::domain::ledger::TradeAction;
use crate::domain::price::PriceMatrix;
use crate::domain::strategy::{Session, StrategyRun};
use crate::ports::execution_port::ExecutionPort;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumParams {
    pub t_over: f64,
    pub t_under: f64,
    /// Oscillator look-back window.
    pub period: usize,
    /// Consecutive readings required before acting.
    pub days_wait: usize,
    pub oscillator: OscillatorKind,
}

impl Default for MomentumParams {
    fn default() -> Self {
        MomentumParams {
            t_over: 0.75,
            t_under: 0.25,
            period: DEFAULT_WINDOW,
            days_wait: 10,
            oscillator: OscillatorKind::Stochastic,
        }
    }
}

impl MomentumParams {
    pub fn validate(&self) -> Result<(), StocksimError> {
        if self.period == 0 {
            return Err(StocksimError::InvalidWindow { window: 0 });
        }
        if self.days_wait == 0 {
            return Err(StocksimError::invalid_parameter(
                "days_wait",
                "must be at least 1",
            ));
        }
        for (name, value) in [("t_over", self.t_over), ("t_under", self.t_under)] {
            if !value.is_finite() {
                return Err(StocksimError::invalid_parameter(name, "must be finite"));
            }
        }
        Ok(())
    }

    /// Signal at position `k` given the oscillator readings.
    pub fn signal(&self, readings: &[f64], k: usize) -> Option<TradeAction> {
        if self.days_wait == 0 || k < self.days_wait || k >= readings.len() {
            return None;
        }
        let recent = &readings[k + 1 - self.days_wait..=k];
        if recent.iter().all(|&r| r > self.t_over) {
            Some(TradeAction::Sell)
        } else if recent.iter().all(|&r| r < self.t_under) {
            Some(TradeAction::Buy)
        } else {
            None
        }
    }
}

pub fn run<E>(
    prices: &PriceMatrix,
    params: &MomentumParams,
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
        let series = oscillator(path, params.period, params.oscillator)?;
        for k in params.days_wait..series.len() {
            let day = series.days[k];
            if day >= last_day {
                break;
            }
            match params.signal(&series.values, k) {
                Some(TradeAction::Buy) => session.buy(day, instrument)?,
                Some(TradeAction::Sell) => session.sell_all(day, instrument)?,
                None => {}
            }
        }
    }

    session.finish()
}
