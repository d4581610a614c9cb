//! CLI integration tests for config-driven runs.
//!
//! Tests cover:
//! - Argument parsing for every subcommand
//! - Config parsing into settings and strategy jobs
//! - Strategy jobs writing ledgers into a temp directory
//! - Read mode against a matrix file on disk
//! - Exit codes of generate, run, evaluate and validate

use clap::Parser;
use stocksim::adapters::csv_ledger_adapter::read_ledger;
use stocksim::adapters::file_config_adapter::FileConfigAdapter;
use stocksim::adapters::text_matrix_adapter::TextMatrixAdapter;
use stocksim::cli::{self, Cli, Command, SimulationMethod};
use stocksim::domain::ledger::TradeAction;
use stocksim::domain::strategy::Strategy;
use stocksim::ports::price_data_port::PriceDataPort;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// A full config whose ledgers land in `dir`.
fn valid_ini(dir: &Path) -> String {
    format!(
        r#"
[simulation]
method = generate
initial_prices = 150, 250
volatilities = 1.8, 3.2
days = 400
seed = 42

[execution]
amount = 5000
fees = 20

[random]
period = 7
ledger = {random}

[crossing_averages]
period_n = 100
period_m = 20
ledger = {crossing}

[momentum]
oscillator = stochastic
days_wait = 5
ledger = {momentum}
"#,
        random = dir.join("ledger_random.txt").display(),
        crossing = dir.join("ledger_crossing.txt").display(),
        momentum = dir.join("ledger_momentum.txt").display(),
    )
}

fn same_code(actual: ExitCode, expected: ExitCode) -> bool {
    format!("{:?}", actual) == format!("{:?}", expected)
}

mod argument_parsing {
    use super::*;

    #[test]
    fn evaluate_takes_several_ledgers() {
        let cli = Cli::try_parse_from([
            "stocksim", "evaluate", "--ledger", "a.txt", "b.txt", "-i", "3",
        ])
        .unwrap();
        match cli.command {
            Command::Evaluate {
                ledgers,
                instruments,
            } => {
                assert_eq!(ledgers, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
                assert_eq!(instruments, 3);
            }
            other => panic!("expected evaluate, got {:?}", other),
        }
    }

    #[test]
    fn evaluate_requires_a_ledger() {
        assert!(Cli::try_parse_from(["stocksim", "evaluate", "-i", "3"]).is_err());
    }

    #[test]
    fn run_accepts_seed_override() {
        let cli = Cli::try_parse_from(["stocksim", "run", "-c", "sim.ini", "--seed", "7"]).unwrap();
        match cli.command {
            Command::Run { config, seed } => {
                assert_eq!(config, PathBuf::from("sim.ini"));
                assert_eq!(seed, Some(7));
            }
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn generate_requires_output() {
        assert!(Cli::try_parse_from(["stocksim", "generate", "-c", "sim.ini"]).is_err());
    }
}

mod config_loading {
    use super::*;

    #[test]
    fn settings_and_jobs_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let ini = write_temp_ini(&valid_ini(dir.path()));
        let adapter = FileConfigAdapter::from_file(ini.path()).unwrap();

        let settings = cli::build_simulation_settings(&adapter).unwrap();
        assert_eq!(settings.method, SimulationMethod::Generate);
        assert_eq!(settings.days, 400);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.volatilities, Some(vec![1.8, 3.2]));

        let jobs = cli::build_strategies(&adapter).unwrap();
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[1].ledger, dir.path().join("ledger_crossing.txt"));
        match &jobs[1].strategy {
            Strategy::CrossingAverages(p) => {
                assert_eq!(p.period_n, 100);
                assert_eq!(p.period_m, 20);
            }
            other => panic!("expected crossing averages, got {:?}", other),
        }
    }

    #[test]
    fn unknown_oscillator_is_rejected() {
        let adapter = FileConfigAdapter::from_string("[momentum]\noscillator = macd\n").unwrap();
        assert!(cli::build_strategies(&adapter).is_err());
    }
}

mod strategy_jobs {
    use super::*;

    fn run_config(dir: &Path, seed: u64) -> Vec<Vec<stocksim::domain::ledger::LedgerRecord>> {
        let adapter = FileConfigAdapter::from_string(&valid_ini(dir)).unwrap();
        let settings = cli::build_simulation_settings(&adapter).unwrap();
        let jobs = cli::build_strategies(&adapter).unwrap();
        let execution = cli::build_execution_config(&adapter);
        let mut rng = cli::master_rng(Some(seed));
        let data = cli::build_price_data(&settings, &mut rng).unwrap();
        cli::run_jobs(&jobs, &data, &execution, &mut rng).unwrap()
    }

    #[test]
    fn every_job_writes_its_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let ledgers = run_config(dir.path(), 42);

        assert_eq!(ledgers.len(), 3);
        for (name, records) in ["random", "crossing", "momentum"].iter().zip(&ledgers) {
            let path = dir.path().join(format!("ledger_{}.txt", name));
            assert_eq!(&read_ledger(&path).unwrap(), records);
            let opening: Vec<_> = records.iter().take_while(|r| r.day == 0).collect();
            assert_eq!(opening.len(), 2);
            assert!(opening.iter().all(|r| r.action == TradeAction::Buy));
            assert!(records.iter().all(|r| r.fee == 20.0));
        }
    }

    #[test]
    fn same_seed_reproduces_ledgers() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        assert_eq!(run_config(first.path(), 5), run_config(second.path(), 5));
    }

    #[test]
    fn read_mode_selects_nearest_columns() {
        let dir = tempfile::tempdir().unwrap();
        let data_file = dir.path().join("stock_data.txt");
        std::fs::write(
            &data_file,
            "1.5 0.7 5.0\n200 50 850\n201 51 845\n199 nan 851\n202 52 860\n",
        )
        .unwrap();

        let ini = format!(
            "[simulation]\nmethod = read\ndata_file = {}\ninitial_prices = 840, 190\n",
            data_file.display()
        );
        let adapter = FileConfigAdapter::from_string(&ini).unwrap();
        let settings = cli::build_simulation_settings(&adapter).unwrap();
        let data = cli::build_price_data(&settings, &mut cli::master_rng(Some(1))).unwrap();

        assert_eq!(data.initial_prices, vec![850.0, 200.0]);
        assert_eq!(data.volatilities, vec![5.0, 1.5]);
        assert_eq!(data.prices.days(), 4);
        assert_eq!(data.prices.price(3, 0).value(), Some(860.0));
    }
}

mod exit_codes {
    use super::*;

    #[test]
    fn validate_accepts_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        let ini = write_temp_ini(&valid_ini(dir.path()));
        let code = cli::run(Cli {
            command: Command::Validate {
                config: ini.path().to_path_buf(),
            },
        });
        assert!(same_code(code, ExitCode::SUCCESS));
    }

    #[test]
    fn validate_rejects_invalid_config() {
        let ini = write_temp_ini("[simulation]\nmethod = generate\ninitial_prices = 100\n");
        let code = cli::run(Cli {
            command: Command::Validate {
                config: ini.path().to_path_buf(),
            },
        });
        assert!(same_code(code, ExitCode::from(2)));
    }

    #[test]
    fn missing_config_file_fails() {
        let code = cli::run(Cli {
            command: Command::Validate {
                config: PathBuf::from("/nonexistent/stocksim.ini"),
            },
        });
        assert!(same_code(code, ExitCode::from(2)));
    }

    #[test]
    fn generate_writes_loadable_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let ini = write_temp_ini(&valid_ini(dir.path()));
        let output = dir.path().join("prices.txt");
        let code = cli::run(Cli {
            command: Command::Generate {
                config: ini.path().to_path_buf(),
                output: output.clone(),
                seed: None,
            },
        });
        assert!(same_code(code, ExitCode::SUCCESS));

        let data = TextMatrixAdapter::new(&output).load().unwrap();
        assert_eq!(data.instruments(), 2);
        assert_eq!(data.prices.days(), 400);
    }

    #[test]
    fn run_then_evaluate() {
        let dir = tempfile::tempdir().unwrap();
        let ini = write_temp_ini(&valid_ini(dir.path()));
        let code = cli::run(Cli {
            command: Command::Run {
                config: ini.path().to_path_buf(),
                seed: Some(3),
            },
        });
        assert!(same_code(code, ExitCode::SUCCESS));

        let ledgers: Vec<PathBuf> = ["random", "crossing", "momentum"]
            .iter()
            .map(|name| dir.path().join(format!("ledger_{}.txt", name)))
            .collect();
        assert!(ledgers.iter().all(|p| p.exists()));

        let code = cli::run(Cli {
            command: Command::Evaluate {
                ledgers,
                instruments: 2,
            },
        });
        assert!(same_code(code, ExitCode::SUCCESS));
    }

    #[test]
    fn evaluate_missing_ledger_is_a_data_failure() {
        let code = cli::run(Cli {
            command: Command::Evaluate {
                ledgers: vec![PathBuf::from("/nonexistent/ledger.txt")],
                instruments: 1,
            },
        });
        assert!(same_code(code, ExitCode::from(5)));
    }
}
