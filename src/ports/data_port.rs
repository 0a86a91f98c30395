//! Price data access port trait.

use crate::domain::error::DcaError;
use crate::domain::price_series::PriceSeries;

/// Source of historical closing prices for a security.
pub trait PriceDataPort {
    /// Full daily closing-price history for `security`.
    ///
    /// A source with no local copy of the data reports
    /// [`DcaError::DataUnavailable`] rather than an empty series.
    fn fetch_closing_prices(&self, security: &str) -> Result<PriceSeries, DcaError>;
}
