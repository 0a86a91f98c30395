//! Alpha Vantage JSON cache adapter.
//!
//! Reads `TIME_SERIES_DAILY` responses previously saved to disk as
//! `<security>_data_full.json` (lower-cased). Nothing is fetched over the
//! network; a missing file is reported with the command that creates it.

use crate::domain::error::DcaError;
use crate::domain::price_series::PriceSeries;
use crate::ports::data_port::PriceDataPort;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const API_KEY_URL: &str = "https://www.alphavantage.co/support/#api-key";

#[derive(Debug, Deserialize)]
struct DailyResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, DailyEntry>>,
}

#[derive(Debug, Deserialize)]
struct DailyEntry {
    #[serde(rename = "4. close")]
    close: String,
}

pub struct AlphaVantageCacheAdapter {
    base_path: PathBuf,
}

impl AlphaVantageCacheAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn cache_file_name(security: &str) -> String {
        format!("{}_data_full.json", security).to_lowercase()
    }

    pub fn cache_path(&self, security: &str) -> PathBuf {
        self.base_path.join(Self::cache_file_name(security))
    }

    fn remediation(security: &str, path: &Path) -> String {
        format!(
            "first get an Alpha Vantage API key at {API_KEY_URL} and then generate the file with:\n  \
             curl 'https://www.alphavantage.co/query?function=TIME_SERIES_DAILY&outputsize=full&symbol={security}&apikey=<api_key>' > {}",
            path.display()
        )
    }

    fn parse(content: &str, path: &Path) -> Result<PriceSeries, DcaError> {
        let response: DailyResponse =
            serde_json::from_str(content).map_err(|e| DcaError::DataParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let time_series = response.time_series.ok_or_else(|| DcaError::DataParse {
            path: path.to_path_buf(),
            reason: "missing \"Time Series (Daily)\" object".into(),
        })?;

        let mut entries = Vec::with_capacity(time_series.len());
        for (date_str, entry) in time_series {
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
                DcaError::DataParse {
                    path: path.to_path_buf(),
                    reason: format!("invalid date '{}': {}", date_str, e),
                }
            })?;
            let close: f64 = entry.close.trim().parse().map_err(|e| DcaError::DataParse {
                path: path.to_path_buf(),
                reason: format!("invalid close value '{}' on {}: {}", entry.close, date, e),
            })?;
            entries.push((date, close));
        }

        PriceSeries::new(entries)
    }
}

impl PriceDataPort for AlphaVantageCacheAdapter {
    fn fetch_closing_prices(&self, security: &str) -> Result<PriceSeries, DcaError> {
        let path = self.cache_path(security);
        if !path.is_file() {
            return Err(DcaError::DataUnavailable {
                security: security.to_string(),
                remediation: Self::remediation(security, &path),
                path,
            });
        }

        let content = fs::read_to_string(&path)?;
        let series = Self::parse(&content, &path)?;
        tracing::debug!(
            security,
            path = %path.display(),
            days = series.len(),
            "loaded price cache"
        );
        Ok(series)
    }
}
