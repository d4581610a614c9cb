//! Configuration validation.
//!
//! Validates every section before a simulation runs.

use crate::domain::error::StocksimError;
use crate::domain::indicator::OscillatorKind;
use crate::ports::config_port::ConfigPort;

pub const SIMULATION: &str = "simulation";
pub const EXECUTION: &str = "execution";
pub const RANDOM: &str = "random";
pub const CROSSING_AVERAGES: &str = "crossing_averages";
pub const MOMENTUM: &str = "momentum";

const KNOWN_SECTIONS: [&str; 5] = [SIMULATION, EXECUTION, RANDOM, CROSSING_AVERAGES, MOMENTUM];

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), StocksimError> {
    for section in unknown_sections(config) {
        log::warn!("ignoring unknown config section [{}]", section);
    }
    validate_simulation_config(config)?;
    validate_execution_config(config)?;
    validate_strategy_config(config)?;
    Ok(())
}

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), StocksimError> {
    validate_method(config)?;
    validate_lists(config)?;
    validate_days(config)?;
    validate_news_probability(config)?;
    validate_seed(config)?;
    Ok(())
}

pub fn validate_execution_config(config: &dyn ConfigPort) -> Result<(), StocksimError> {
    let fees = parse_double(config, EXECUTION, "fees", 20.0)?;
    if !fees.is_finite() || fees < 0.0 {
        return Err(invalid(EXECUTION, "fees", "fees must be non-negative"));
    }
    let amount = parse_double(config, EXECUTION, "amount", 5000.0)?;
    if !amount.is_finite() || amount <= fees {
        return Err(invalid(EXECUTION, "amount", "amount must exceed fees"));
    }
    Ok(())
}

/// Validate the sections of every enabled strategy.
pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), StocksimError> {
    for section in [RANDOM, CROSSING_AVERAGES, MOMENTUM] {
        validate_enabled_flag(config, section)?;
    }
    if is_enabled(config, RANDOM) {
        validate_positive_int(config, RANDOM, "period", 7)?;
        validate_ledger(config, RANDOM)?;
    }
    if is_enabled(config, CROSSING_AVERAGES) {
        validate_crossing_averages(config)?;
        validate_ledger(config, CROSSING_AVERAGES)?;
    }
    if is_enabled(config, MOMENTUM) {
        validate_momentum(config)?;
        validate_ledger(config, MOMENTUM)?;
    }
    Ok(())
}

/// Sections this program does not read. Keys outside any section land in
/// `default` and are not reported.
pub fn unknown_sections(config: &dyn ConfigPort) -> Vec<String> {
    config
        .sections()
        .into_iter()
        .filter(|s| s != "default" && !KNOWN_SECTIONS.contains(&s.as_str()))
        .collect()
}

/// Strategies run unless their section sets `enabled = false`.
pub fn is_enabled(config: &dyn ConfigPort, section: &str) -> bool {
    config.get_bool(section, "enabled", true)
}

fn validate_enabled_flag(config: &dyn ConfigPort, section: &str) -> Result<(), StocksimError> {
    match config.get_string(section, "enabled") {
        Some(raw) if !raw.trim().is_empty() => {
            match raw.trim().to_lowercase().as_str() {
                "true" | "yes" | "1" | "false" | "no" | "0" => Ok(()),
                other => Err(invalid(
                    section,
                    "enabled",
                    format!("'{}' is not a boolean", other),
                )),
            }
        }
        _ => Ok(()),
    }
}

fn validate_method(config: &dyn ConfigPort) -> Result<(), StocksimError> {
    let method = config
        .get_string(SIMULATION, "method")
        .unwrap_or_else(|| "generate".to_string());
    match method.trim().to_lowercase().as_str() {
        "generate" => Ok(()),
        "read" => match config.get_string(SIMULATION, "data_file") {
            Some(s) if !s.trim().is_empty() => Ok(()),
            _ => Err(StocksimError::ConfigMissing {
                section: SIMULATION.to_string(),
                key: "data_file".to_string(),
            }),
        },
        other => Err(invalid(
            SIMULATION,
            "method",
            format!("unknown method '{}', expected 'generate' or 'read'", other),
        )),
    }
}

fn validate_lists(config: &dyn ConfigPort) -> Result<(), StocksimError> {
    let prices = parse_list(config, "initial_prices")?;
    let volatilities = parse_list(config, "volatilities")?;

    if let Some(prices) = &prices {
        if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
            return Err(invalid(
                SIMULATION,
                "initial_prices",
                "initial prices must be positive",
            ));
        }
    }
    if let Some(volatilities) = &volatilities {
        if volatilities.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(invalid(
                SIMULATION,
                "volatilities",
                "volatilities must be non-negative",
            ));
        }
    }

    let generating = config
        .get_string(SIMULATION, "method")
        .is_none_or(|m| m.trim().eq_ignore_ascii_case("generate"));
    if generating {
        let Some(volatilities) = volatilities else {
            return Err(StocksimError::ConfigMissing {
                section: SIMULATION.to_string(),
                key: "volatilities".to_string(),
            });
        };
        let Some(prices) = prices else {
            return Err(StocksimError::ConfigMissing {
                section: SIMULATION.to_string(),
                key: "initial_prices".to_string(),
            });
        };
        if prices.len() != volatilities.len() {
            return Err(invalid(
                SIMULATION,
                "volatilities",
                format!(
                    "{} initial prices but {} volatilities",
                    prices.len(),
                    volatilities.len()
                ),
            ));
        }
    }
    Ok(())
}

/// Parse a comma-separated list from `[simulation]`, if present.
pub fn parse_list(config: &dyn ConfigPort, key: &str) -> Result<Option<Vec<f64>>, StocksimError> {
    match config.get_list(SIMULATION, key) {
        None => Ok(None),
        Some(Ok(values)) => Ok(Some(values)),
        Some(Err(item)) => Err(invalid(
            SIMULATION,
            key,
            format!("'{}' is not a number", item),
        )),
    }
}

fn validate_days(config: &dyn ConfigPort) -> Result<(), StocksimError> {
    if config.get_string(SIMULATION, "days").is_some() {
        validate_positive_int(config, SIMULATION, "days", 0)?;
    }
    Ok(())
}

fn validate_news_probability(config: &dyn ConfigPort) -> Result<(), StocksimError> {
    let value = parse_double(config, SIMULATION, "news_probability", 0.01)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(
            SIMULATION,
            "news_probability",
            "news_probability must be between 0 and 1",
        ));
    }
    Ok(())
}

fn validate_seed(config: &dyn ConfigPort) -> Result<(), StocksimError> {
    parse_seed(config).map(|_| ())
}

/// The configured random seed, if any.
pub fn parse_seed(config: &dyn ConfigPort) -> Result<Option<u64>, StocksimError> {
    match config.get_string(SIMULATION, "seed") {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| invalid(SIMULATION, "seed", "seed must be a non-negative integer")),
    }
}

fn validate_crossing_averages(config: &dyn ConfigPort) -> Result<(), StocksimError> {
    let period_n = validate_positive_int(config, CROSSING_AVERAGES, "period_n", 200)?;
    let period_m = validate_positive_int(config, CROSSING_AVERAGES, "period_m", 50)?;
    if period_m >= period_n {
        return Err(invalid(
            CROSSING_AVERAGES,
            "period_m",
            "period_m must be smaller than period_n",
        ));
    }
    Ok(())
}

fn validate_momentum(config: &dyn ConfigPort) -> Result<(), StocksimError> {
    for (key, default) in [("t_over", 0.75), ("t_under", 0.25)] {
        if !parse_double(config, MOMENTUM, key, default)?.is_finite() {
            return Err(invalid(MOMENTUM, key, format!("{} must be a number", key)));
        }
    }
    validate_positive_int(config, MOMENTUM, "period", 7)?;
    validate_positive_int(config, MOMENTUM, "days_wait", 10)?;
    if let Some(name) = config.get_string(MOMENTUM, "oscillator") {
        name.parse::<OscillatorKind>()
            .map_err(|e| invalid(MOMENTUM, "oscillator", e.to_string()))?;
    }
    Ok(())
}

fn validate_ledger(config: &dyn ConfigPort, section: &str) -> Result<(), StocksimError> {
    match config.get_string(section, "ledger") {
        Some(s) if s.trim().is_empty() => Err(invalid(section, "ledger", "ledger path is empty")),
        _ => Ok(()),
    }
}

fn validate_positive_int(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: i64,
) -> Result<usize, StocksimError> {
    let value = parse_int(config, section, key, default)?;
    if value < 1 {
        return Err(invalid(section, key, format!("{} must be at least 1", key)));
    }
    Ok(value as usize)
}

/// The value of `key` as a float, or `default` when unset. A value that is
/// present but not a number is an error rather than a silent default.
fn parse_double(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
) -> Result<f64, StocksimError> {
    match config.get_string(section, key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(section, key, format!("'{}' is not a number", raw.trim()))),
        _ => Ok(default),
    }
}

fn parse_int(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: i64,
) -> Result<i64, StocksimError> {
    match config.get_string(section, key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(section, key, format!("'{}' is not an integer", raw.trim()))),
        _ => Ok(default),
    }
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> StocksimError {
    StocksimError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}
