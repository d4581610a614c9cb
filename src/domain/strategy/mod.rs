//! Rule-based trading strategies.
//!
//! Every strategy follows the same life cycle:
//! 1. open a portfolio by buying `amount` worth of every instrument on day 0,
//! 2. walk the price matrix and decide buy / sell / hold per instrument,
//! 3. on the final day sell every remaining holding whose price is quoted.
//!
//! Decisions are carried out by an [`ExecutionPort`]. A sell is only ever
//! requested for an instrument that is currently held, and nothing is
//! attempted on a day where the instrument's price is unavailable.

pub mod crossing_averages;
pub mod momentum;
pub mod periodic_random;

use crate::domain::error::StocksimError;
use crate::domain::ledger::TradeAction;
use crate::domain::portfolio::Portfolio;
use crate::domain::price::PriceMatrix;
use crate::ports::execution_port::ExecutionPort;
use rand::Rng;

pub use crossing_averages::CrossingAveragesParams;
pub use momentum::MomentumParams;
pub use periodic_random::PeriodicRandomParams;

/// An executed strategy decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub day: usize,
    pub instrument: usize,
    pub action: TradeAction,
}

/// Outcome of one strategy run.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyRun {
    /// Holdings after the final-day liquidation. Only instruments whose final
    /// price was unavailable can still be held.
    pub portfolio: Portfolio,
    /// Trades executed between the opening purchase and the liquidation.
    pub decisions: Vec<Decision>,
    /// Trades executed by the final-day liquidation.
    pub liquidations: Vec<Decision>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    PeriodicRandom(PeriodicRandomParams),
    CrossingAverages(CrossingAveragesParams),
    Momentum(MomentumParams),
}

impl Strategy {
    /// Name used for config sections and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::PeriodicRandom(_) => "random",
            Strategy::CrossingAverages(_) => "crossing_averages",
            Strategy::Momentum(_) => "momentum",
        }
    }

    pub fn validate(&self) -> Result<(), StocksimError> {
        match self {
            Strategy::PeriodicRandom(p) => p.validate(),
            Strategy::CrossingAverages(p) => p.validate(),
            Strategy::Momentum(p) => p.validate(),
        }
    }

    /// Run the strategy over `prices`, spending `amount` per purchase.
    ///
    /// `rng` is only drawn from by the periodic random strategy.
    pub fn run<E, R>(
        &self,
        prices: &PriceMatrix,
        amount: f64,
        execution: &mut E,
        rng: &mut R,
    ) -> Result<StrategyRun, StocksimError>
    where
        E: ExecutionPort + ?Sized,
        R: Rng,
    {
        self.validate()?;
        let run = match self {
            Strategy::PeriodicRandom(p) => {
                periodic_random::run(prices, p, amount, execution, rng)?
            }
            Strategy::CrossingAverages(p) => {
                crossing_averages::run(prices, p, amount, execution)?
            }
            Strategy::Momentum(p) => momentum::run(prices, p, amount, execution)?,
        };
        log::info!(
            "{}: {} trades, {} liquidations",
            self.name(),
            run.decisions.len(),
            run.liquidations.len()
        );
        Ok(run)
    }
}

/// Portfolio and decision log for one run, shared by all strategies.
pub(crate) struct Session<'a, E: ExecutionPort + ?Sized> {
    execution: &'a mut E,
    prices: &'a PriceMatrix,
    amount: f64,
    portfolio: Portfolio,
    decisions: Vec<Decision>,
}

impl<'a, E: ExecutionPort + ?Sized> Session<'a, E> {
    /// Make the opening equal-amount purchase of every instrument.
    pub(crate) fn open(
        execution: &'a mut E,
        prices: &'a PriceMatrix,
        amount: f64,
    ) -> Result<Self, StocksimError> {
        let amounts = vec![amount; prices.instruments()];
        let portfolio = execution.create_portfolio(&amounts, prices)?;
        Ok(Session {
            execution,
            prices,
            amount,
            portfolio,
            decisions: Vec::new(),
        })
    }

    /// Last day of the matrix, reserved for liquidation.
    pub(crate) fn last_day(&self) -> usize {
        self.prices.last_day().unwrap_or(0)
    }

    pub(crate) fn is_tradable(&self, day: usize, instrument: usize) -> bool {
        self.prices.price(day, instrument).is_quoted()
    }

    pub(crate) fn buy(&mut self, day: usize, instrument: usize) -> Result<(), StocksimError> {
        if !self.is_tradable(day, instrument) {
            return Ok(());
        }
        let executed = self.execution.buy(
            day,
            instrument,
            self.amount,
            self.prices,
            &mut self.portfolio,
        )?;
        if executed.is_some() {
            self.decisions.push(Decision {
                day,
                instrument,
                action: TradeAction::Buy,
            });
        }
        Ok(())
    }

    /// Sell the whole holding of `instrument`, if there is one.
    pub(crate) fn sell_all(&mut self, day: usize, instrument: usize) -> Result<(), StocksimError> {
        if !self.portfolio.holds(instrument) || !self.is_tradable(day, instrument) {
            return Ok(());
        }
        let executed = self
            .execution
            .sell(day, instrument, self.prices, &mut self.portfolio)?;
        if executed.is_some() {
            self.decisions.push(Decision {
                day,
                instrument,
                action: TradeAction::Sell,
            });
        }
        Ok(())
    }

    /// Sell everything still held on the final day and close the session.
    pub(crate) fn finish(mut self) -> Result<StrategyRun, StocksimError> {
        let decisions = std::mem::take(&mut self.decisions);
        if let Some(last_day) = self.prices.last_day() {
            for instrument in 0..self.prices.instruments() {
                self.sell_all(last_day, instrument)?;
            }
        }
        Ok(StrategyRun {
            portfolio: self.portfolio,
            decisions,
            liquidations: self.decisions,
        })
    }
}
