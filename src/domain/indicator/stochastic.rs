//! Stochastic oscillator: where today's close sits within the window's range.
//!
//! Formula: (P[i] - min) / (max - min), in [0, 1].
//! A flat window (max == min) has no range to place the close in and yields
//! the neutral value 0.5.

use crate::domain::error::StocksimError;
use crate::domain::indicator::{IndicatorSeries, IndicatorType, oscillator_series};
use crate::domain::price::PricePath;

/// Value reported for a window whose high equals its low.
pub const FLAT_WINDOW_VALUE: f64 = 0.5;

pub fn stochastic(path: &PricePath, window: usize) -> Result<IndicatorSeries, StocksimError> {
    oscillator_series(
        path,
        window,
        IndicatorType::Stochastic(window),
        |prices, start, i| {
            let span = &prices[start..=i];
            let lowest = span.iter().copied().fold(f64::INFINITY, f64::min);
            let highest = span.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let range = highest - lowest;
            if range == 0.0 {
                FLAT_WINDOW_VALUE
            } else {
                (prices[i] - lowest) / range
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(prices: &[f64], window: usize) -> Vec<f64> {
        stochastic(&PricePath::from(prices), window).unwrap().values
    }

    #[test]
    fn first_value_is_zero() {
        assert_eq!(values(&[5.0, 6.0, 7.0], 3)[0], 0.0);
    }

    #[test]
    fn rising_prices_sit_at_the_top() {
        assert_eq!(values(&[1.0, 2.0, 3.0, 4.0], 3), vec![0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn falling_prices_sit_at_the_bottom() {
        assert_eq!(values(&[4.0, 3.0, 2.0, 1.0], 3), vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn trailing_window_drops_old_extremes() {
        // Window at i=3 is [1, 3, 2]: (2 - 1) / (3 - 1)
        assert_eq!(values(&[10.0, 1.0, 3.0, 2.0], 3)[3], 0.5);
        // Window at i=2 is [10, 1, 3]: (3 - 1) / 9
        assert_eq!(values(&[10.0, 1.0, 3.0, 2.0], 3)[2], 0.22);
    }

    #[test]
    fn flat_window_is_neutral() {
        assert_eq!(values(&[5.0, 5.0, 5.0], 2), vec![0.0, 0.5, 0.5]);
    }

    #[test]
    fn window_of_one_is_always_flat() {
        assert_eq!(values(&[1.0, 9.0, 3.0], 1), vec![0.0, 0.5, 0.5]);
    }

    #[test]
    fn unavailable_days_are_skipped() {
        let series = stochastic(&PricePath::from(vec![1.0, f64::NAN, 3.0, 2.0]), 7).unwrap();
        assert_eq!(series.values, vec![0.0, 1.0, 0.5]);
        assert_eq!(series.days, vec![0, 2, 3]);
    }

    #[test]
    fn empty_path() {
        assert!(values(&[], 7).is_empty());
    }
}
