//! Domain error types.

use chrono::NaiveDate;
use std::path::PathBuf;

/// Top-level error type for dcasim.
#[derive(Debug, thiserror::Error)]
pub enum DcaError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown strategy '{name}' (expected daily, weekly, monthly or yearly)")]
    InvalidStrategy { name: String },

    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("price data for {security} is not available at {}\n{remediation}", .path.display())]
    DataUnavailable {
        security: String,
        path: PathBuf,
        remediation: String,
    },

    #[error("failed to parse price data {}: {reason}", .path.display())]
    DataParse { path: PathBuf, reason: String },

    #[error("invalid closing price {price} on {date}")]
    InvalidPrice { date: NaiveDate, price: f64 },

    #[error("no price available on or after {date} ({})", series_end(.last_available))]
    NoPriceAvailable {
        date: NaiveDate,
        last_available: Option<NaiveDate>,
    },

    #[error("duration of {days} days is too short to annualize")]
    DegenerateDuration { days: f64 },

    #[error("invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("date arithmetic out of range from {date}")]
    DateOutOfRange { date: NaiveDate },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn series_end(last_available: &Option<NaiveDate>) -> String {
    match last_available {
        Some(last) => format!("series ends {last}"),
        None => "series is empty".to_string(),
    }
}

impl From<&DcaError> for std::process::ExitCode {
    fn from(err: &DcaError) -> Self {
        let code: u8 = match err {
            DcaError::Io(_) => 1,
            DcaError::ConfigParse { .. }
            | DcaError::ConfigInvalid { .. }
            | DcaError::InvalidStrategy { .. }
            | DcaError::InvalidDate { .. }
            | DcaError::InvalidDateRange { .. } => 2,
            DcaError::DataUnavailable { .. }
            | DcaError::DataParse { .. }
            | DcaError::InvalidPrice { .. } => 3,
            DcaError::NoPriceAvailable { .. } => 4,
            DcaError::DegenerateDuration { .. }
            | DcaError::InvalidAmount { .. }
            | DcaError::DateOutOfRange { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
