//! Synthetic daily-close price paths with random news shocks.
//!
//! Each day adds a zero-mean Gaussian increment to the previous day's value.
//! With a small probability per day a news event fires: a drift of
//! `N(0, 2) * volatility` is added to every day of a 3 to 14 day window
//! starting today. Overlapping events sum. A day whose value would be zero or
//! negative is recorded as [`Price::Unavailable`]; the walk itself carries on
//! from that value, so a later day can be quoted again.

use crate::domain::error::StocksimError;
use crate::domain::price::{Price, PriceMatrix, PricePath};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Five years of daily closes.
pub const SIMULATION_DAYS: usize = 365 * 5;

/// Shortest news event, in days.
pub const MIN_EVENT_DAYS: usize = 3;
/// Exclusive upper bound on news event length, in days.
pub const MAX_EVENT_DAYS_EXCLUSIVE: usize = 15;

const EVENT_MULTIPLIER_STDDEV: f64 = 2.0;

/// Parameters of the news-event process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewsModel {
    /// Probability that an event starts on any given day.
    pub probability: f64,
}

impl Default for NewsModel {
    fn default() -> Self {
        NewsModel { probability: 0.01 }
    }
}

impl NewsModel {
    pub fn disabled() -> Self {
        NewsModel { probability: 0.0 }
    }
}

/// A transient additive bias applied to a run of days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftEvent {
    pub magnitude: f64,
    pub start_day: usize,
    pub duration: usize,
}

impl DriftEvent {
    /// Add this event's magnitude to every covered day, clipped to the path.
    fn accumulate(&self, total_drift: &mut [f64]) {
        let end = (self.start_day + self.duration).min(total_drift.len());
        for drift in &mut total_drift[self.start_day..end] {
            *drift += self.magnitude;
        }
    }
}

/// Generate one price path of `days` closes starting at `initial_price`.
pub fn generate_path<R: Rng>(
    days: usize,
    initial_price: f64,
    volatility: f64,
    news: NewsModel,
    rng: &mut R,
) -> Result<PricePath, StocksimError> {
    if !initial_price.is_finite() || initial_price <= 0.0 {
        return Err(StocksimError::invalid_parameter(
            "initial_price",
            "must be a positive number",
        ));
    }
    if !volatility.is_finite() || volatility < 0.0 {
        return Err(StocksimError::invalid_parameter(
            "volatility",
            "must be a non-negative number",
        ));
    }
    if !(0.0..=1.0).contains(&news.probability) {
        return Err(StocksimError::invalid_parameter(
            "news probability",
            "must be between 0 and 1",
        ));
    }
    if days == 0 {
        return Ok(PricePath::default());
    }

    let increments = Normal::new(0.0, volatility).map_err(|e| {
        StocksimError::invalid_parameter("volatility", e.to_string())
    })?;
    let multipliers = Normal::new(0.0, EVENT_MULTIPLIER_STDDEV)
        .map_err(|e| StocksimError::invalid_parameter("news multiplier", e.to_string()))?;

    let mut prices = Vec::with_capacity(days);
    prices.push(Price::Quoted(initial_price));
    let mut total_drift = vec![0.0; days];
    let mut previous = initial_price;

    for day in 1..days {
        let increment = increments.sample(rng);

        if rng.gen_bool(news.probability) {
            let event = DriftEvent {
                magnitude: multipliers.sample(rng) * volatility,
                start_day: day,
                duration: rng.gen_range(MIN_EVENT_DAYS..MAX_EVENT_DAYS_EXCLUSIVE),
            };
            log::debug!(
                "news event on day {}: drift {:.4} for {} days",
                event.start_day,
                event.magnitude,
                event.duration
            );
            event.accumulate(&mut total_drift);
        }

        let (price, tentative) = step(previous, increment, total_drift[day]);
        prices.push(price);
        previous = tentative;
    }

    Ok(PricePath::new(prices))
}

/// Advance the walk by one day. Returns the recorded price and the raw value
/// the next day builds on.
fn step(previous: f64, increment: f64, drift: f64) -> (Price, f64) {
    let tentative = previous + increment + drift;
    if tentative <= 0.0 {
        (Price::Unavailable, tentative)
    } else {
        (Price::Quoted(tentative), tentative)
    }
}

/// Generate one path from a freshly seeded, independent random stream.
pub fn generate_path_from_entropy(
    days: usize,
    initial_price: f64,
    volatility: f64,
) -> Result<PricePath, StocksimError> {
    let mut rng = StdRng::from_entropy();
    generate_path(days, initial_price, volatility, NewsModel::default(), &mut rng)
}

/// Generate a matrix with one independently simulated column per instrument.
///
/// Both lists are required and must be the same length. Every column gets its
/// own random stream seeded from `rng`.
pub fn generate_matrix<R: Rng>(
    initial_prices: Option<&[f64]>,
    volatilities: Option<&[f64]>,
    days: usize,
    news: NewsModel,
    rng: &mut R,
) -> Result<PriceMatrix, StocksimError> {
    let volatilities = match volatilities {
        Some(v) if !v.is_empty() => v,
        _ => {
            return Err(StocksimError::MissingParameter {
                name: "volatilities".into(),
            });
        }
    };
    let initial_prices = match initial_prices {
        Some(p) if !p.is_empty() => p,
        _ => {
            return Err(StocksimError::MissingParameter {
                name: "initial_prices".into(),
            });
        }
    };
    if initial_prices.len() != volatilities.len() {
        return Err(StocksimError::LengthMismatch {
            left: "initial_prices".into(),
            left_len: initial_prices.len(),
            right: "volatilities".into(),
            right_len: volatilities.len(),
        });
    }

    let columns = initial_prices
        .iter()
        .zip(volatilities)
        .map(|(&price, &volatility)| {
            let mut column_rng = StdRng::seed_from_u64(rng.r#gen());
            generate_path(days, price, volatility, news, &mut column_rng)
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::info!(
        "generated {} instruments over {} days",
        columns.len(),
        days
    );
    PriceMatrix::from_columns(columns)
}
