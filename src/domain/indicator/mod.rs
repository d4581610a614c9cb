//! Technical indicators over a single price path.
//!
//! Every indicator first drops unavailable days, so an [`IndicatorSeries`] is
//! indexed by *retained* position. `days[k]` gives the original day index of
//! retained position `k`; use it to line indicator values back up with raw
//! prices.
//!
//! Values are rounded to 2 decimals.

pub mod moving_average;
pub mod rsi;
pub mod stochastic;

use crate::domain::error::StocksimError;
use crate::domain::price::PricePath;
use std::fmt;
use std::str::FromStr;

pub use moving_average::moving_average;

/// Default look-back window, in days.
pub const DEFAULT_WINDOW: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    MovingAverage { window: usize, weighted: bool },
    Stochastic(usize),
    Rsi(usize),
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::MovingAverage {
                window,
                weighted: false,
            } => write!(f, "MA({})", window),
            IndicatorType::MovingAverage {
                window,
                weighted: true,
            } => write!(f, "WMA({})", window),
            IndicatorType::Stochastic(window) => write!(f, "STOCHASTIC({})", window),
            IndicatorType::Rsi(window) => write!(f, "RSI({})", window),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<f64>,
    /// Original day index of each value.
    pub days: Vec<usize>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Which oscillator to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OscillatorKind {
    Stochastic,
    Rsi,
}

impl FromStr for OscillatorKind {
    type Err = StocksimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stochastic" => Ok(OscillatorKind::Stochastic),
            "rsi" => Ok(OscillatorKind::Rsi),
            _ => Err(StocksimError::UnknownOscillator {
                name: s.trim().to_string(),
            }),
        }
    }
}

impl fmt::Display for OscillatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OscillatorKind::Stochastic => write!(f, "stochastic"),
            OscillatorKind::Rsi => write!(f, "rsi"),
        }
    }
}

/// Compute the chosen oscillator over `path` with a `window`-day look-back.
///
/// The first retained day is always `0.0`. From the second day on, the window
/// grows from the start of the series until it reaches `window` days and then
/// trails.
pub fn oscillator(
    path: &PricePath,
    window: usize,
    kind: OscillatorKind,
) -> Result<IndicatorSeries, StocksimError> {
    match kind {
        OscillatorKind::Stochastic => stochastic::stochastic(path, window),
        OscillatorKind::Rsi => rsi::rsi(path, window),
    }
}

/// Round half away from zero to 2 decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// First index of the window ending at `i` (inclusive), clipped at 0.
pub(crate) fn window_start(i: usize, window: usize) -> usize {
    (i + 1).saturating_sub(window)
}

/// Split the retained (day, price) pairs into parallel day and price vectors.
pub(crate) fn split_retained(path: &PricePath) -> (Vec<usize>, Vec<f64>) {
    path.retained().into_iter().unzip()
}

/// Shared oscillator driver: retained position 0 is `0.0`, every later
/// position gets `f(prices, start, i)` rounded to 2 decimals.
pub(crate) fn oscillator_series<F>(
    path: &PricePath,
    window: usize,
    indicator_type: IndicatorType,
    f: F,
) -> Result<IndicatorSeries, StocksimError>
where
    F: Fn(&[f64], usize, usize) -> f64,
{
    if window == 0 {
        return Err(StocksimError::InvalidWindow { window });
    }
    let (days, prices) = split_retained(path);
    let values = (0..prices.len())
        .map(|i| {
            if i == 0 {
                0.0
            } else {
                round2(f(&prices, window_start(i, window), i))
            }
        })
        .collect();

    Ok(IndicatorSeries {
        indicator_type,
        values,
        days,
    })
}
