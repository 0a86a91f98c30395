#![allow(dead_code)]

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use dcasim::cli::RunSettings;
use dcasim::domain::error::DcaError;
use dcasim::domain::price_series::PriceSeries;
use dcasim::domain::simulation::{Purchase, SimulationReport};
use dcasim::domain::strategy::Strategy;
use dcasim::ports::data_port::PriceDataPort;
use dcasim::ports::progress_port::SimulationObserver;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

pub struct MockPriceDataPort {
    pub data: HashMap<String, PriceSeries>,
}

impl MockPriceDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    pub fn with_series(mut self, security: &str, series: PriceSeries) -> Self {
        self.data.insert(security.to_string(), series);
        self
    }
}

impl PriceDataPort for MockPriceDataPort {
    fn fetch_closing_prices(&self, security: &str) -> Result<PriceSeries, DcaError> {
        self.data
            .get(security)
            .cloned()
            .ok_or_else(|| DcaError::DataUnavailable {
                security: security.to_string(),
                path: PathBuf::from(format!("{}_data_full.json", security.to_lowercase())),
                remediation: "generate the cache file first".to_string(),
            })
    }
}

/// Observer that keeps every notification for later assertions.
#[derive(Default)]
pub struct RecordingObserver {
    pub purchases: RefCell<Vec<Purchase>>,
    pub reports: RefCell<Vec<SimulationReport>>,
}

impl SimulationObserver for RecordingObserver {
    fn on_purchase(&self, purchase: &Purchase) {
        self.purchases.borrow_mut().push(purchase.clone());
    }

    fn on_complete(&self, report: &SimulationReport) {
        self.reports.borrow_mut().push(report.clone());
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn is_weekend(d: NaiveDate) -> bool {
    matches!(d.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Every weekday in `[start, end]`.
pub fn weekdays(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut d = start;
    while d <= end {
        if !is_weekend(d) {
            days.push(d);
        }
        d += Duration::days(1);
    }
    days
}

/// Weekday series whose price rises linearly from `first_price` to `last_price`.
pub fn linear_weekday_series(
    start: NaiveDate,
    end: NaiveDate,
    first_price: f64,
    last_price: f64,
) -> PriceSeries {
    let days = weekdays(start, end);
    let steps = (days.len().max(2) - 1) as f64;
    PriceSeries::new(
        days.iter()
            .enumerate()
            .map(|(i, d)| (*d, first_price + (last_price - first_price) * i as f64 / steps)),
    )
    .unwrap()
}

pub fn flat_weekday_series(start: NaiveDate, end: NaiveDate, price: f64) -> PriceSeries {
    linear_weekday_series(start, end, price, price)
}

pub fn sample_settings(security: &str) -> RunSettings {
    RunSettings {
        security: security.to_string(),
        data_dir: PathBuf::from("."),
        purchase_amount: 100.0,
        strategies: Strategy::ALL.to_vec(),
        start_date: None,
        end_date: None,
        verbose: false,
    }
}

/// `ExitCode` has no `PartialEq`, so compare through its `Debug` output.
pub fn assert_exit_code(actual: std::process::ExitCode, expected: u8) {
    assert_eq!(
        format!("{actual:?}"),
        format!("{:?}", std::process::ExitCode::from(expected)),
        "unexpected exit code"
    );
}
