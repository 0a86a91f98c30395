//! Configuration and date-range validation.
//!
//! Config files are checked before any price data is loaded; the date range is
//! checked once CLI overrides and series defaults have been applied.

use crate::domain::error::DcaError;
use crate::domain::strategy::parse_strategies;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), DcaError> {
    validate_purchase_amount(config)?;
    validate_strategies(config)?;
    validate_dates(config)?;
    Ok(())
}

fn validate_purchase_amount(config: &dyn ConfigPort) -> Result<(), DcaError> {
    let Some(raw) = config.get_string("simulation", "purchase_amount") else {
        return Ok(());
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(()),
        _ => Err(DcaError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "purchase_amount".to_string(),
            reason: format!("purchase_amount must be a positive number, got '{}'", raw),
        }),
    }
}

fn validate_strategies(config: &dyn ConfigPort) -> Result<(), DcaError> {
    match config.get_string("simulation", "strategies") {
        Some(list) => parse_strategies(&list).map(|_| ()),
        None => Ok(()),
    }
}

/// Format only. Ordering is checked on the merged range, since CLI flags may
/// replace either date.
fn validate_dates(config: &dyn ConfigPort) -> Result<(), DcaError> {
    parse_optional_date(config, "start_date")?;
    parse_optional_date(config, "end_date")?;
    Ok(())
}

fn parse_optional_date(config: &dyn ConfigPort, key: &str) -> Result<Option<NaiveDate>, DcaError> {
    match config.get_string("simulation", key) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| DcaError::ConfigInvalid {
                section: "simulation".to_string(),
                key: key.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", key),
            }),
    }
}

/// Reasons a requested date range cannot be simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangeViolation {
    StartInFuture,
    EndInFuture,
    StartAfterEnd,
}

impl DateRangeViolation {
    pub fn message(&self) -> &'static str {
        match self {
            DateRangeViolation::StartInFuture => "Start date cannot be more than current date",
            DateRangeViolation::EndInFuture => "End date cannot be more than current date",
            DateRangeViolation::StartAfterEnd => "Start date cannot be more than end date",
        }
    }
}

/// Check a range against `today`, reporting the first violation found in the
/// order start-in-future, end-in-future, start-after-end.
pub fn validate_date_range(
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> Result<(), DateRangeViolation> {
    validate_requested_dates(Some(start), Some(end), today)
}

/// Same checks as [`validate_date_range`], skipping any that need a date the
/// caller has not supplied yet.
pub fn validate_requested_dates(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(), DateRangeViolation> {
    if start.is_some_and(|s| s > today) {
        return Err(DateRangeViolation::StartInFuture);
    }
    if end.is_some_and(|e| e > today) {
        return Err(DateRangeViolation::EndInFuture);
    }
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(DateRangeViolation::StartAfterEnd);
        }
    }
    Ok(())
}
