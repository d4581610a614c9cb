//! Simple and weighted moving averages.
//!
//! Warm-up: for retained position `i < window` the average covers `[0, i]`,
//! so there is no invalid prefix. Afterwards the trailing `window` days are
//! used.
//!
//! Weighted mode pairs weight `k` with the `k`-th day of the active window.
//! Warm-up rows use only the first `i + 1` weights and are normalised by the
//! sum of those weights rather than the full weight sum.

use crate::domain::error::StocksimError;
use crate::domain::indicator::{IndicatorSeries, IndicatorType, round2, split_retained, window_start};
use crate::domain::price::PricePath;

pub fn moving_average(
    path: &PricePath,
    window: usize,
    weights: &[f64],
) -> Result<IndicatorSeries, StocksimError> {
    if window == 0 {
        return Err(StocksimError::InvalidWindow { window });
    }
    let weighted = !weights.is_empty();
    if weighted {
        validate_weights(weights, window)?;
    }

    // Equal weights reduce to the plain mean; computing it directly keeps
    // the rounded values identical to the unweighted series.
    let uniform = weights.iter().all(|w| *w == weights[0]);

    let (days, prices) = split_retained(path);
    let values = (0..prices.len())
        .map(|i| {
            let span = &prices[window_start(i, window)..=i];
            let average = if weighted && !uniform {
                weighted_mean(span, &weights[..span.len()])
            } else {
                span.iter().sum::<f64>() / span.len() as f64
            };
            round2(average)
        })
        .collect();

    Ok(IndicatorSeries {
        indicator_type: IndicatorType::MovingAverage { window, weighted },
        values,
        days,
    })
}

fn weighted_mean(prices: &[f64], weights: &[f64]) -> f64 {
    let total: f64 = prices.iter().zip(weights).map(|(p, w)| p * w).sum();
    total / weights.iter().sum::<f64>()
}

/// Weights must match the window, be finite and non-negative, and start with
/// a positive weight so no warm-up row divides by zero.
fn validate_weights(weights: &[f64], window: usize) -> Result<(), StocksimError> {
    if weights.len() != window {
        return Err(StocksimError::WeightLength {
            expected: window,
            actual: weights.len(),
        });
    }
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(StocksimError::InvalidWeights {
            reason: "weights must be finite and non-negative".into(),
        });
    }
    if weights[0] <= 0.0 {
        return Err(StocksimError::InvalidWeights {
            reason: "the first weight must be positive".into(),
        });
    }
    Ok(())
}
