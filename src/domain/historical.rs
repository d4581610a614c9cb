//! Recorded price data and instrument selection from it.
//!
//! A historical data set is a numeric matrix with one column per instrument:
//! row 0 holds each instrument's volatility, row 1 its initial price, and
//! rows 1.. the daily prices (so row 1 is also day 0).

use crate::domain::error::StocksimError;
use crate::domain::price::PriceMatrix;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalData {
    pub volatilities: Vec<f64>,
    pub initial_prices: Vec<f64>,
    pub prices: PriceMatrix,
}

/// Instruments picked out of a [`HistoricalData`] set.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Column indices into the data set, one per request.
    pub columns: Vec<usize>,
    pub initial_prices: Vec<f64>,
    pub volatilities: Vec<f64>,
    pub prices: PriceMatrix,
}

impl HistoricalData {
    /// Build a data set from raw rows as stored on disk.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, StocksimError> {
        if rows.len() < 2 {
            return Err(StocksimError::Data {
                reason: format!(
                    "expected a volatility row and at least one price row, got {} rows",
                    rows.len()
                ),
            });
        }
        let width = rows[0].len();
        if let Some((line, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(StocksimError::Data {
                reason: format!(
                    "row {} has {} columns, expected {}",
                    line + 1,
                    row.len(),
                    width
                ),
            });
        }

        let prices = PriceMatrix::from_rows(&rows[1..])?;
        Ok(HistoricalData {
            volatilities: rows[0].clone(),
            initial_prices: rows[1].clone(),
            prices,
        })
    }

    pub fn instruments(&self) -> usize {
        self.volatilities.len()
    }

    /// Raw rows in on-disk order.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        let mut rows = Vec::with_capacity(self.prices.days() + 1);
        rows.push(self.volatilities.clone());
        for day in 0..self.prices.days() {
            rows.push(
                (0..self.prices.instruments())
                    .map(|i| self.prices.price(day, i).value().unwrap_or(f64::NAN))
                    .collect(),
            );
        }
        rows
    }

    /// Pick the instruments closest to the requested initial prices or
    /// volatilities.
    ///
    /// Initial prices take precedence when both are given. With neither, the
    /// whole data set is returned.
    pub fn select(
        &self,
        initial_prices: Option<&[f64]>,
        volatilities: Option<&[f64]>,
    ) -> Result<Selection, StocksimError> {
        let requested = initial_prices.or(volatilities).map_or(0, <[f64]>::len);
        if requested > 0 && self.instruments() == 0 {
            return Err(StocksimError::Data {
                reason: "data set has no instruments to select from".into(),
            });
        }
        let columns: Vec<usize> = match (initial_prices, volatilities) {
            (Some(targets), vols) => {
                if vols.is_some() {
                    log::warn!("both initial prices and volatilities given; volatility ignored");
                }
                targets
                    .iter()
                    .map(|&t| nearest(&self.initial_prices, t))
                    .collect()
            }
            (None, Some(targets)) => targets
                .iter()
                .map(|&t| nearest(&self.volatilities, t))
                .collect(),
            (None, None) => (0..self.instruments()).collect(),
        };

        let selection = Selection {
            initial_prices: columns.iter().map(|&c| self.initial_prices[c]).collect(),
            volatilities: columns.iter().map(|&c| self.volatilities[c]).collect(),
            prices: self.prices.select_columns(&columns),
            columns,
        };
        log::info!(
            "found data with initial prices {:?} and volatilities {:?}",
            selection.initial_prices,
            selection.volatilities
        );
        Ok(selection)
    }
}

/// Index of the value closest to `target`, first on ties. NaN entries never
/// match.
fn nearest(values: &[f64], target: f64) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, v) in values.iter().enumerate() {
        let distance = (v - target).abs();
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    best
}
