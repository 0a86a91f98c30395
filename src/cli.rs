//! CLI definition and dispatch.

use chrono::{Local, NaiveDate};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::alpha_vantage_adapter::AlphaVantageCacheAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::tracing_progress_adapter::TracingProgressAdapter;
use crate::domain::config_validation::{
    validate_date_range, validate_requested_dates, validate_simulation_config,
    DateRangeViolation,
};
use crate::domain::error::DcaError;
use crate::domain::price_series::PriceSeries;
use crate::domain::simulation::{simulate, SimulationConfig, SimulationReport};
use crate::domain::strategy::{parse_strategies, Strategy};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceDataPort;
use crate::ports::progress_port::SimulationObserver;

pub const DEFAULT_PURCHASE_AMOUNT: f64 = 100.0;

#[derive(Parser, Debug)]
#[command(
    name = "dcasim",
    version,
    about = "Compare dollar-cost averaging strategies on cached daily prices"
)]
pub struct Cli {
    /// Security symbol, e.g. MSFT
    pub security: String,
    /// Start date of the investing (YYYY-MM-DD)
    #[arg(short, long)]
    pub start_date: Option<String>,
    /// End date of the investing (YYYY-MM-DD)
    #[arg(short, long)]
    pub end_date: Option<String>,
    /// Log every purchase and run summary to stderr
    #[arg(short, long)]
    pub verbose: bool,
    /// INI configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory holding <security>_data_full.json cache files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Amount invested at every purchase
    #[arg(long)]
    pub amount: Option<f64>,
    /// Comma-separated subset of daily,weekly,monthly,yearly
    #[arg(long)]
    pub strategies: Option<String>,
}

/// Fully resolved options for one comparison run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub security: String,
    pub data_dir: PathBuf,
    pub purchase_amount: f64,
    pub strategies: Vec<Strategy>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub verbose: bool,
}

pub fn run(cli: Cli) -> ExitCode {
    let config = match load_config(cli.config.as_ref()) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_simulation_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let settings = match build_run_settings(&cli, &config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    init_logging(settings.verbose);

    let data_port = AlphaVantageCacheAdapter::new(settings.data_dir.clone());
    let observer = TracingProgressAdapter::new(settings.security.clone());
    let today = Local::now().date_naive();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_comparison(&data_port, &settings, &observer, today, &mut out)
}

/// Install the stderr `tracing` subscriber. `RUST_LOG` takes precedence over
/// the verbosity flag. Later calls are no-ops.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, ExitCode> {
    let Some(path) = path else {
        return Ok(FileConfigAdapter::empty());
    };
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = DcaError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Merge CLI flags over config values over built-in defaults.
pub fn build_run_settings(cli: &Cli, config: &dyn ConfigPort) -> Result<RunSettings, DcaError> {
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| config.get_string("data", "dir").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));

    let purchase_amount = cli.amount.unwrap_or_else(|| {
        config.get_double("simulation", "purchase_amount", DEFAULT_PURCHASE_AMOUNT)
    });
    if !purchase_amount.is_finite() || purchase_amount <= 0.0 {
        return Err(DcaError::InvalidAmount {
            reason: format!("purchase amount must be positive, got {purchase_amount}"),
        });
    }

    let strategies = match cli
        .strategies
        .clone()
        .or_else(|| config.get_string("simulation", "strategies"))
    {
        Some(list) => parse_strategies(&list)?,
        None => Strategy::ALL.to_vec(),
    };

    let start_date = resolve_date(cli.start_date.as_deref(), config, "start_date")?;
    let end_date = resolve_date(cli.end_date.as_deref(), config, "end_date")?;

    Ok(RunSettings {
        security: cli.security.trim().to_string(),
        data_dir,
        purchase_amount,
        strategies,
        start_date,
        end_date,
        verbose: cli.verbose || config.get_bool("logging", "verbose", false),
    })
}

fn resolve_date(
    cli_value: Option<&str>,
    config: &dyn ConfigPort,
    key: &str,
) -> Result<Option<NaiveDate>, DcaError> {
    let raw = match cli_value {
        Some(v) => Some(v.to_string()),
        None => config.get_string("simulation", key),
    };
    raw.map(|v| parse_date(&v)).transpose()
}

pub fn parse_date(value: &str) -> Result<NaiveDate, DcaError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| DcaError::InvalidDate {
        value: value.to_string(),
    })
}

/// Fill in missing range ends from the first and last dates of `series`.
pub fn resolve_date_range(
    settings: &RunSettings,
    series: &PriceSeries,
) -> Result<(NaiveDate, NaiveDate), DcaError> {
    let start = settings
        .start_date
        .or_else(|| series.first_date())
        .ok_or_else(|| empty_series_error(&settings.security, "start_date"))?;
    let end = settings
        .end_date
        .or_else(|| series.last_date())
        .ok_or_else(|| empty_series_error(&settings.security, "end_date"))?;
    Ok((start, end))
}

fn empty_series_error(security: &str, key: &str) -> DcaError {
    DcaError::ConfigInvalid {
        section: "simulation".to_string(),
        key: key.to_string(),
        reason: format!("no {key} given and the price series for {security} is empty"),
    }
}

pub fn format_result_line(security: &str, report: &SimulationReport) -> String {
    format!(
        "Result of \"{}\" security with \"{}\" investment strategy is {:.2}%",
        security,
        report.strategy.label(),
        100.0 * report.annualized_gain
    )
}

fn report_violation(violation: DateRangeViolation) -> ExitCode {
    eprintln!("{}", violation.message());
    ExitCode::from(1)
}

/// Load prices, validate the range and print one result line per strategy.
///
/// Lines are written as each strategy finishes; the first failure stops the
/// run and determines the exit code.
pub fn run_comparison(
    data_port: &dyn PriceDataPort,
    settings: &RunSettings,
    observer: &dyn SimulationObserver,
    today: NaiveDate,
    out: &mut dyn Write,
) -> ExitCode {
    // Stage 1: Reject explicit dates before touching the cache
    if let Err(v) = validate_requested_dates(settings.start_date, settings.end_date, today) {
        return report_violation(v);
    }

    // Stage 2: Load price data
    let series = match data_port.fetch_closing_prices(&settings.security) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 3: Resolve defaults from the series and re-validate
    let (start, end) = match resolve_date_range(settings, &series) {
        Ok(range) => range,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if let Err(v) = validate_date_range(start, end, today) {
        return report_violation(v);
    }

    // Stage 4: Simulate and print
    for &strategy in &settings.strategies {
        let config = SimulationConfig {
            strategy,
            start_date: start,
            end_date: end,
            purchase_amount: settings.purchase_amount,
        };
        let report = match simulate(&series, &config, observer) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("error: {} failed: {e}", strategy.label());
                return (&e).into();
            }
        };
        if let Err(e) = writeln!(out, "{}", format_result_line(&settings.security, &report)) {
            let err = DcaError::from(e);
            eprintln!("error: {err}");
            return (&err).into();
        }
    }

    ExitCode::SUCCESS
}
