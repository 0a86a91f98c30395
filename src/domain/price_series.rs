//! Daily closing-price series and forward-filled price lookup.

use crate::domain::calendar;
use crate::domain::error::DcaError;
use crate::domain::strategy::Strategy;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Immutable, sparse mapping from trading day to closing price.
///
/// Dates with no entry are non-trading days (weekends and market holidays).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    closes: BTreeMap<NaiveDate, f64>,
}

impl PriceSeries {
    /// Build a series, rejecting any price that is not finite and positive.
    /// A later entry for the same date replaces an earlier one.
    pub fn new<I>(entries: I) -> Result<Self, DcaError>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let mut closes = BTreeMap::new();
        for (date, price) in entries {
            if !price.is_finite() || price <= 0.0 {
                return Err(DcaError::InvalidPrice { date, price });
            }
            closes.insert(date, price);
        }
        Ok(Self { closes })
    }

    pub fn price_on(&self, date: NaiveDate) -> Option<f64> {
        self.closes.get(&date).copied()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.closes.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.closes.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}

/// Price at `date`, or at the next trading day that has one.
///
/// Returns the price together with the date it was actually taken from. The
/// search steps one business day at a time and gives up with
/// [`DcaError::NoPriceAvailable`] once it passes the last date in the series.
pub fn resolve_price(series: &PriceSeries, date: NaiveDate) -> Result<(f64, NaiveDate), DcaError> {
    let last_available = series.last_date();
    let Some(last) = last_available else {
        return Err(DcaError::NoPriceAvailable {
            date,
            last_available,
        });
    };

    let mut effective = date;
    loop {
        if let Some(price) = series.price_on(effective) {
            return Ok((price, effective));
        }
        tracing::debug!(%effective, "no price for date");
        if effective >= last {
            return Err(DcaError::NoPriceAvailable {
                date,
                last_available,
            });
        }
        effective = calendar::advance(effective, Strategy::Daily)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_series() -> PriceSeries {
        PriceSeries::new([
            (date(2020, 1, 2), 100.0),
            (date(2020, 1, 3), 101.5),
            (date(2020, 1, 6), 99.0),
            (date(2020, 1, 8), 103.0),
        ])
        .unwrap()
    }

    #[test]
    fn new_rejects_non_positive_price() {
        let err = PriceSeries::new([(date(2020, 1, 2), 0.0)]).unwrap_err();
        assert!(matches!(err, DcaError::InvalidPrice { price, .. } if price == 0.0));
    }

    #[test]
    fn new_rejects_nan() {
        assert!(PriceSeries::new([(date(2020, 1, 2), f64::NAN)]).is_err());
    }

    #[test]
    fn bounds_and_len() {
        let series = sample_series();
        assert_eq!(series.len(), 4);
        assert_eq!(series.first_date(), Some(date(2020, 1, 2)));
        assert_eq!(series.last_date(), Some(date(2020, 1, 8)));
        assert!(!series.is_empty());
        assert!(PriceSeries::default().is_empty());
    }

    #[test]
    fn price_on_exact_and_missing() {
        let series = sample_series();
        assert_eq!(series.price_on(date(2020, 1, 3)), Some(101.5));
        assert_eq!(series.price_on(date(2020, 1, 4)), None);
    }

    #[test]
    fn resolve_exact_hit() {
        let series = sample_series();
        assert_eq!(
            resolve_price(&series, date(2020, 1, 6)).unwrap(),
            (99.0, date(2020, 1, 6))
        );
    }

    #[test]
    fn resolve_holiday_forward_fills() {
        // 2020-01-01 is a market holiday
        let series = sample_series();
        assert_eq!(
            resolve_price(&series, date(2020, 1, 1)).unwrap(),
            (100.0, date(2020, 1, 2))
        );
    }

    #[test]
    fn resolve_weekend_forward_fills_to_monday() {
        let series = sample_series();
        assert_eq!(
            resolve_price(&series, date(2020, 1, 4)).unwrap(),
            (99.0, date(2020, 1, 6))
        );
    }

    #[test]
    fn resolve_midweek_gap() {
        let series = sample_series();
        assert_eq!(
            resolve_price(&series, date(2020, 1, 7)).unwrap(),
            (103.0, date(2020, 1, 8))
        );
    }

    #[test]
    fn resolve_past_series_end_errors() {
        let series = sample_series();
        let err = resolve_price(&series, date(2020, 1, 9)).unwrap_err();
        assert!(matches!(
            err,
            DcaError::NoPriceAvailable { last_available: Some(last), .. }
                if last == date(2020, 1, 8)
        ));
    }

    #[test]
    fn resolve_on_empty_series_errors() {
        let err = resolve_price(&PriceSeries::default(), date(2020, 1, 2)).unwrap_err();
        assert!(matches!(
            err,
            DcaError::NoPriceAvailable { last_available: None, .. }
        ));
    }

    #[test]
    fn resolve_stops_when_last_entry_is_on_weekend() {
        // Daily stepping never visits a Saturday, so this entry is unreachable
        // from a weekday before it.
        let series = PriceSeries::new([(date(2020, 1, 4), 50.0)]).unwrap();
        assert!(resolve_price(&series, date(2020, 1, 3)).is_err());
    }
}
