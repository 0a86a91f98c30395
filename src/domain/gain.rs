//! Annualized gain (CAGR).

use crate::domain::error::DcaError;

/// Year length used to annualize. Leap days are ignored, so a span covering
/// Feb 29 counts as slightly more than a year.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Compound annual growth rate as a fraction (0.07 means +7% per year).
pub fn annualized_gain(
    invested_amount: f64,
    final_amount: f64,
    duration_days: f64,
) -> Result<f64, DcaError> {
    let years = duration_days / DAYS_PER_YEAR;
    if !(years > 0.0) || !years.is_finite() {
        return Err(DcaError::DegenerateDuration {
            days: duration_days,
        });
    }
    if !(invested_amount > 0.0) {
        return Err(DcaError::InvalidAmount {
            reason: format!("invested amount must be positive, got {invested_amount}"),
        });
    }
    if !(final_amount >= 0.0) {
        return Err(DcaError::InvalidAmount {
            reason: format!("final amount must be non-negative, got {final_amount}"),
        });
    }

    Ok((final_amount / invested_amount).powf(1.0 / years) - 1.0)
}
