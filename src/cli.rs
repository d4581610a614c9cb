//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_ledger_adapter::{CsvLedgerWriter, read_ledger};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_matrix_adapter::{TextMatrixAdapter, write_matrix};
use crate::domain::config_validation::{
    CROSSING_AVERAGES, EXECUTION, MOMENTUM, RANDOM, SIMULATION, is_enabled, parse_list,
    parse_seed, validate_config, validate_simulation_config,
};
use crate::domain::error::StocksimError;
use crate::domain::execution::{ExecutionConfig, LedgerExecution};
use crate::domain::generator::{NewsModel, SIMULATION_DAYS, generate_matrix};
use crate::domain::historical::HistoricalData;
use crate::domain::indicator::OscillatorKind;
use crate::domain::ledger::LedgerRecord;
use crate::domain::performance::{LedgerSummary, StrategyScore, evaluate, summarise};
use crate::domain::strategy::{
    CrossingAveragesParams, MomentumParams, PeriodicRandomParams, Strategy,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::price_data_port::PriceDataPort;

#[derive(Parser, Debug)]
#[command(
    name = "stocksim",
    about = "Synthetic stock prices and rule-based trading strategies"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the price matrix and write it to a file
    Generate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Overrides [simulation] seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run every enabled strategy and compare their ledgers
    Run {
        #[arg(short, long)]
        config: PathBuf,
        /// Overrides [simulation] seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Score existing ledgers against each other
    Evaluate {
        #[arg(short, long = "ledger", required = true, num_args = 1..)]
        ledgers: Vec<PathBuf>,
        #[arg(short, long)]
        instruments: usize,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Generate {
            config,
            output,
            seed,
        } => run_generate(&config, &output, seed),
        Command::Run { config, seed } => run_strategies(&config, seed),
        Command::Evaluate {
            ledgers,
            instruments,
        } => run_evaluate(&ledgers, instruments),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(fail)
}

fn fail(err: StocksimError) -> ExitCode {
    eprintln!("error: {err}");
    (&err).into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationMethod {
    Generate,
    Read,
}

/// The `[simulation]` section, after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSettings {
    pub method: SimulationMethod,
    pub initial_prices: Option<Vec<f64>>,
    pub volatilities: Option<Vec<f64>>,
    pub data_file: Option<PathBuf>,
    pub days: usize,
    pub news: NewsModel,
    pub seed: Option<u64>,
}

pub fn build_simulation_settings(
    config: &dyn ConfigPort,
) -> Result<SimulationSettings, StocksimError> {
    let method = match config.get_string(SIMULATION, "method") {
        Some(m) if m.trim().eq_ignore_ascii_case("read") => SimulationMethod::Read,
        _ => SimulationMethod::Generate,
    };
    let days = config.get_int(SIMULATION, "days", SIMULATION_DAYS as i64);
    let probability = config.get_double(SIMULATION, "news_probability", 0.01);

    Ok(SimulationSettings {
        method,
        initial_prices: parse_list(config, "initial_prices")?,
        volatilities: parse_list(config, "volatilities")?,
        data_file: config
            .get_string(SIMULATION, "data_file")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from),
        days: days.max(0) as usize,
        news: NewsModel { probability },
        seed: parse_seed(config)?,
    })
}

pub fn build_execution_config(config: &dyn ConfigPort) -> ExecutionConfig {
    let defaults = ExecutionConfig::default();
    ExecutionConfig {
        amount: config.get_double(EXECUTION, "amount", defaults.amount),
        fees: config.get_double(EXECUTION, "fees", defaults.fees),
    }
}

/// A strategy together with the ledger file it writes.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyJob {
    pub strategy: Strategy,
    pub ledger: PathBuf,
}

/// Every enabled strategy, in the order random, crossing averages, momentum.
pub fn build_strategies(config: &dyn ConfigPort) -> Result<Vec<StrategyJob>, StocksimError> {
    let mut jobs = Vec::new();

    if is_enabled(config, RANDOM) {
        let defaults = PeriodicRandomParams::default();
        jobs.push(StrategyJob {
            strategy: Strategy::PeriodicRandom(PeriodicRandomParams {
                period: get_usize(config, RANDOM, "period", defaults.period),
            }),
            ledger: ledger_path(config, RANDOM),
        });
    }

    if is_enabled(config, CROSSING_AVERAGES) {
        let defaults = CrossingAveragesParams::default();
        jobs.push(StrategyJob {
            strategy: Strategy::CrossingAverages(CrossingAveragesParams {
                period_n: get_usize(config, CROSSING_AVERAGES, "period_n", defaults.period_n),
                period_m: get_usize(config, CROSSING_AVERAGES, "period_m", defaults.period_m),
            }),
            ledger: ledger_path(config, CROSSING_AVERAGES),
        });
    }

    if is_enabled(config, MOMENTUM) {
        let defaults = MomentumParams::default();
        let oscillator = match config.get_string(MOMENTUM, "oscillator") {
            Some(name) => name.parse::<OscillatorKind>()?,
            None => defaults.oscillator,
        };
        jobs.push(StrategyJob {
            strategy: Strategy::Momentum(MomentumParams {
                t_over: config.get_double(MOMENTUM, "t_over", defaults.t_over),
                t_under: config.get_double(MOMENTUM, "t_under", defaults.t_under),
                period: get_usize(config, MOMENTUM, "period", defaults.period),
                days_wait: get_usize(config, MOMENTUM, "days_wait", defaults.days_wait),
                oscillator,
            }),
            ledger: ledger_path(config, MOMENTUM),
        });
    }

    Ok(jobs)
}

fn get_usize(config: &dyn ConfigPort, section: &str, key: &str, default: usize) -> usize {
    config.get_int(section, key, default as i64).max(0) as usize
}

fn ledger_path(config: &dyn ConfigPort, section: &str) -> PathBuf {
    config
        .get_string(section, "ledger")
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("ledger_{}.txt", section)))
}

/// Random stream for a whole run: seeded when a seed is configured.
pub fn master_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generate or read the price data described by `settings`.
pub fn build_price_data<R: Rng>(
    settings: &SimulationSettings,
    rng: &mut R,
) -> Result<HistoricalData, StocksimError> {
    match settings.method {
        SimulationMethod::Generate => {
            let prices = generate_matrix(
                settings.initial_prices.as_deref(),
                settings.volatilities.as_deref(),
                settings.days,
                settings.news,
                rng,
            )?;
            Ok(HistoricalData {
                volatilities: settings.volatilities.clone().unwrap_or_default(),
                initial_prices: settings.initial_prices.clone().unwrap_or_default(),
                prices,
            })
        }
        SimulationMethod::Read => {
            let path = settings
                .data_file
                .as_ref()
                .ok_or_else(|| StocksimError::ConfigMissing {
                    section: SIMULATION.into(),
                    key: "data_file".into(),
                })?;
            let data = TextMatrixAdapter::new(path).load()?;
            let selection = data.select(
                settings.initial_prices.as_deref(),
                settings.volatilities.as_deref(),
            )?;
            Ok(HistoricalData {
                volatilities: selection.volatilities,
                initial_prices: selection.initial_prices,
                prices: selection.prices,
            })
        }
    }
}

fn run_generate(config_path: &PathBuf, output: &PathBuf, seed: Option<u64>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_simulation_config(&adapter) {
        return fail(e);
    }

    let settings = match build_simulation_settings(&adapter) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };
    let mut rng = master_rng(seed.or(settings.seed));
    let data = match build_price_data(&settings, &mut rng) {
        Ok(d) => d,
        Err(e) => return fail(e),
    };

    match write_matrix(output, &data) {
        Ok(()) => {
            eprintln!(
                "Price data for {} instruments over {} days written to: {}",
                data.instruments(),
                data.prices.days(),
                output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

/// Run every job over `data`, returning the ledger of each in job order.
pub fn run_jobs<R: Rng>(
    jobs: &[StrategyJob],
    data: &HistoricalData,
    execution: &ExecutionConfig,
    rng: &mut R,
) -> Result<Vec<Vec<LedgerRecord>>, StocksimError> {
    let mut ledgers = Vec::with_capacity(jobs.len());
    for job in jobs {
        let writer = CsvLedgerWriter::create(&job.ledger)?;
        let mut executor = LedgerExecution::new(execution.fees, writer);
        let mut strategy_rng = StdRng::seed_from_u64(rng.r#gen());
        job.strategy
            .run(&data.prices, execution.amount, &mut executor, &mut strategy_rng)?;
        executor.into_ledger().into_inner()?;
        ledgers.push(read_ledger(&job.ledger)?);
    }
    Ok(ledgers)
}

fn run_strategies(config_path: &PathBuf, seed: Option<u64>) -> ExitCode {
    // Stage 1: Load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_config(&adapter) {
        return fail(e);
    }

    let settings = match build_simulation_settings(&adapter) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };
    let jobs = match build_strategies(&adapter) {
        Ok(j) => j,
        Err(e) => return fail(e),
    };
    if jobs.is_empty() {
        eprintln!("error: no strategies enabled");
        return ExitCode::from(2);
    }
    let execution = build_execution_config(&adapter);

    // Stage 2: Price data
    let mut rng = master_rng(seed.or(settings.seed));
    let data = match build_price_data(&settings, &mut rng) {
        Ok(d) => d,
        Err(e) => return fail(e),
    };
    eprintln!(
        "Running {} strategies over {} instruments, {} days",
        jobs.len(),
        data.instruments(),
        data.prices.days()
    );

    // Stage 3: Strategies
    let ledgers = match run_jobs(&jobs, &data, &execution, &mut rng) {
        Ok(l) => l,
        Err(e) => return fail(e),
    };

    // Stage 4: Report
    let names: Vec<String> = jobs
        .iter()
        .map(|j| j.strategy.name().to_string())
        .collect();
    for (job, records) in jobs.iter().zip(&ledgers) {
        eprintln!("Ledger written to: {}", job.ledger.display());
        print_summary(job.strategy.name(), &summarise(records));
    }
    print_scores(&names, &evaluate(data.instruments(), &ledgers));
    ExitCode::SUCCESS
}

fn run_evaluate(ledger_paths: &[PathBuf], instruments: usize) -> ExitCode {
    let mut ledgers = Vec::with_capacity(ledger_paths.len());
    for path in ledger_paths {
        match read_ledger(path) {
            Ok(records) => ledgers.push(records),
            Err(e) => return fail(e),
        }
    }

    let names: Vec<String> = ledger_paths
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    for (name, records) in names.iter().zip(&ledgers) {
        print_summary(name, &summarise(records));
    }
    print_scores(&names, &evaluate(instruments, &ledgers));
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_config(&adapter) {
        return fail(e);
    }

    let jobs = match build_strategies(&adapter) {
        Ok(j) => j,
        Err(e) => return fail(e),
    };
    eprintln!("\nEnabled strategies:");
    for job in &jobs {
        eprintln!("  {} -> {}", job.strategy.name(), job.ledger.display());
    }
    for section in [RANDOM, CROSSING_AVERAGES, MOMENTUM] {
        if !is_enabled(&adapter, section) {
            eprintln!("  {} (disabled)", section);
        }
    }

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

fn print_summary(name: &str, summary: &LedgerSummary) {
    println!(
        "{}: {} transactions, final profit {:.2}",
        name, summary.total_transactions, summary.final_profit
    );
}

fn print_scores(names: &[String], scores: &[StrategyScore]) {
    println!("\nStrategy comparison:");
    for score in scores {
        let name = names
            .get(score.strategy_id)
            .map(String::as_str)
            .unwrap_or("?");
        println!(
            "  {}: {} wins ({:.0}%)",
            name,
            score.win_count,
            score.win_rate * 100.0
        );
    }
}
