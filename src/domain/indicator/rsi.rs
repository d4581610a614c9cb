//! Relative strength index, scaled to [0, 1].
//!
//! Day-over-day deltas inside the window are split into gains (> 0) and
//! losses (< 0); unchanged days count towards neither.
//! RS = sum(gains) / sum(|losses|), RSI = 1 - 1 / (1 + RS).
//! A window without losses is 1.0, whatever the gains.

use crate::domain::error::StocksimError;
use crate::domain::indicator::{IndicatorSeries, IndicatorType, oscillator_series};
use crate::domain::price::PricePath;

pub fn rsi(path: &PricePath, window: usize) -> Result<IndicatorSeries, StocksimError> {
    oscillator_series(path, window, IndicatorType::Rsi(window), |prices, start, i| {
        let mut gains = 0.0;
        let mut losses = 0.0;
        let mut any_loss = false;
        for m in start + 1..=i {
            let change = prices[m] - prices[m - 1];
            if change > 0.0 {
                gains += change;
            } else if change < 0.0 {
                losses += -change;
                any_loss = true;
            }
        }

        if any_loss {
            let rs = gains / losses;
            1.0 - 1.0 / (1.0 + rs)
        } else {
            1.0
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(prices: &[f64], window: usize) -> Vec<f64> {
        rsi(&PricePath::from(prices), window).unwrap().values
    }

    #[test]
    fn first_value_is_zero() {
        assert_eq!(values(&[10.0, 9.0], 7)[0], 0.0);
    }

    #[test]
    fn all_gains_is_one() {
        assert_eq!(values(&[1.0, 2.0, 4.0, 8.0], 3), vec![0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn flat_prices_are_one() {
        assert_eq!(values(&[3.0, 3.0, 3.0], 3), vec![0.0, 1.0, 1.0]);
    }

    #[test]
    fn all_losses_is_zero() {
        assert_eq!(values(&[8.0, 4.0, 2.0, 1.0], 3), vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn balanced_window_is_half() {
        // Deltas +2, -2
        assert_eq!(values(&[10.0, 12.0, 10.0], 3)[2], 0.5);
    }

    #[test]
    fn trailing_window_only_counts_its_own_deltas() {
        // At i=3 with window 3 the deltas are 12->11 (-1) and 11->14 (+3).
        // RS = 3, RSI = 0.75. The earlier 10->12 gain falls outside.
        assert_eq!(values(&[10.0, 12.0, 11.0, 14.0], 3)[3], 0.75);
    }

    #[test]
    fn mixed_window_rounds() {
        // Deltas +1, -2: RS = 0.5, RSI = 1/3
        assert_eq!(values(&[5.0, 6.0, 4.0], 3)[2], 0.33);
    }

    #[test]
    fn single_day_window_has_no_deltas() {
        assert_eq!(values(&[5.0, 1.0, 9.0], 1), vec![0.0, 1.0, 1.0]);
    }

    #[test]
    fn unavailable_days_are_skipped() {
        // Retained [10, 8, 12]: deltas -2, +4 → RS 2, RSI 0.67
        let series = rsi(&PricePath::from(vec![10.0, f64::NAN, 8.0, 12.0]), 7).unwrap();
        assert_eq!(series.values, vec![0.0, 0.0, 0.67]);
        assert_eq!(series.days, vec![0, 2, 3]);
    }
}
