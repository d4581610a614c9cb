//! Daily closing prices, per-instrument paths and the day × instrument matrix.

use crate::domain::error::StocksimError;
use std::fmt;

/// A single closing price.
///
/// `Unavailable` marks a day on which the instrument could not be priced
/// (its simulated value fell to zero or below). No trading happens on such a day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Price {
    Quoted(f64),
    Unavailable,
}

impl Price {
    /// Maps NaN to `Unavailable`; every other value is quoted as-is.
    pub fn from_raw(value: f64) -> Self {
        if value.is_nan() {
            Price::Unavailable
        } else {
            Price::Quoted(value)
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Price::Quoted(v) => Some(v),
            Price::Unavailable => None,
        }
    }

    pub fn is_quoted(self) -> bool {
        matches!(self, Price::Quoted(_))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Quoted(v) => write!(f, "{}", v),
            Price::Unavailable => write!(f, "nan"),
        }
    }
}

/// Closing prices of one instrument, one entry per trading day.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PricePath {
    prices: Vec<Price>,
}

impl PricePath {
    pub fn new(prices: Vec<Price>) -> Self {
        Self { prices }
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn get(&self, day: usize) -> Price {
        self.prices.get(day).copied().unwrap_or(Price::Unavailable)
    }

    pub fn prices(&self) -> &[Price] {
        &self.prices
    }

    /// Quoted prices with unavailable days dropped, each paired with its
    /// original day index.
    pub fn retained(&self) -> Vec<(usize, f64)> {
        self.prices
            .iter()
            .enumerate()
            .filter_map(|(day, p)| p.value().map(|v| (day, v)))
            .collect()
    }

    /// Raw numeric view, with `NaN` for unavailable days.
    pub fn to_raw(&self) -> Vec<f64> {
        self.prices
            .iter()
            .map(|p| p.value().unwrap_or(f64::NAN))
            .collect()
    }
}

impl From<Vec<f64>> for PricePath {
    fn from(raw: Vec<f64>) -> Self {
        PricePath::new(raw.into_iter().map(Price::from_raw).collect())
    }
}

impl From<&[f64]> for PricePath {
    fn from(raw: &[f64]) -> Self {
        PricePath::new(raw.iter().copied().map(Price::from_raw).collect())
    }
}

/// Rectangular table of price paths sharing a common day index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceMatrix {
    columns: Vec<PricePath>,
    days: usize,
}

impl PriceMatrix {
    /// Build a matrix from one path per instrument. All paths must be the same length.
    pub fn from_columns(columns: Vec<PricePath>) -> Result<Self, StocksimError> {
        let days = columns.first().map(PricePath::len).unwrap_or(0);
        if let Some((i, col)) = columns.iter().enumerate().find(|(_, c)| c.len() != days) {
            return Err(StocksimError::LengthMismatch {
                left: "instrument 0".into(),
                left_len: days,
                right: format!("instrument {}", i),
                right_len: col.len(),
            });
        }
        Ok(Self { columns, days })
    }

    /// Build a matrix from day-major rows of raw values (`NaN` = unavailable).
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, StocksimError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((day, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(StocksimError::LengthMismatch {
                left: "day 0".into(),
                left_len: width,
                right: format!("day {}", day),
                right_len: row.len(),
            });
        }
        let columns = (0..width)
            .map(|i| PricePath::new(rows.iter().map(|row| Price::from_raw(row[i])).collect()))
            .collect();
        Ok(Self {
            columns,
            days: rows.len(),
        })
    }

    pub fn days(&self) -> usize {
        self.days
    }

    pub fn instruments(&self) -> usize {
        self.columns.len()
    }

    pub fn last_day(&self) -> Option<usize> {
        self.days.checked_sub(1)
    }

    pub fn price(&self, day: usize, instrument: usize) -> Price {
        self.columns
            .get(instrument)
            .map(|c| c.get(day))
            .unwrap_or(Price::Unavailable)
    }

    pub fn column(&self, instrument: usize) -> Option<&PricePath> {
        self.columns.get(instrument)
    }

    pub fn columns(&self) -> &[PricePath] {
        &self.columns
    }

    /// Copy out the given columns, in order, as a new matrix.
    pub fn select_columns(&self, indices: &[usize]) -> Self {
        let columns = indices
            .iter()
            .filter_map(|&i| self.columns.get(i).cloned())
            .collect();
        Self {
            columns,
            days: self.days,
        }
    }
}
