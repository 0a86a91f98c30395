//! Purchase-date stepping.
//!
//! Each strategy advances the cursor by a calendar increment and then pushes
//! any weekend result forward to the following Monday. Month and year
//! increments clamp to the last valid day of the target month, so
//! 2020-01-31 + 1 month is 2020-02-29.

use crate::domain::error::DcaError;
use crate::domain::strategy::Strategy;
use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};

/// Next scheduled purchase date after `date` for `strategy`.
pub fn advance(date: NaiveDate, strategy: Strategy) -> Result<NaiveDate, DcaError> {
    let raw = match strategy {
        Strategy::Daily => date.checked_add_signed(Duration::days(1)),
        Strategy::Weekly => date.checked_add_signed(Duration::weeks(1)),
        Strategy::Monthly => date.checked_add_months(Months::new(1)),
        Strategy::Yearly => date.checked_add_months(Months::new(12)),
    }
    .ok_or(DcaError::DateOutOfRange { date })?;

    initial_alignment(raw)
}

/// Move a weekend date to the following Monday; weekdays are unchanged.
///
/// Saturday and Sunday are two independent checks, evaluated in that order.
pub fn initial_alignment(date: NaiveDate) -> Result<NaiveDate, DcaError> {
    let mut aligned = date;
    if aligned.weekday() == Weekday::Sat {
        aligned = shift_days(aligned, 2)?;
    }
    if aligned.weekday() == Weekday::Sun {
        aligned = shift_days(aligned, 1)?;
    }
    Ok(aligned)
}

fn shift_days(date: NaiveDate, days: i64) -> Result<NaiveDate, DcaError> {
    date.checked_add_signed(Duration::days(days))
        .ok_or(DcaError::DateOutOfRange { date })
}
