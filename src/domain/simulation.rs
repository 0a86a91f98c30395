//! Dollar-cost averaging simulation.
//!
//! A run buys `purchase_amount` worth of shares on every scheduled date from
//! the aligned start date up to and including `end_date`, then values the
//! accumulated shares at the `end_date` price and annualizes the result.

use crate::domain::calendar;
use crate::domain::error::DcaError;
use crate::domain::gain::annualized_gain;
use crate::domain::price_series::{resolve_price, PriceSeries};
use crate::domain::strategy::Strategy;
use crate::ports::progress_port::SimulationObserver;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub strategy: Strategy,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub purchase_amount: f64,
}

/// One executed purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    /// Date the strategy scheduled the purchase for.
    pub scheduled_date: NaiveDate,
    /// Date whose closing price was used (later than scheduled on holidays).
    pub price_date: NaiveDate,
    pub price: f64,
    pub amount: f64,
    pub shares: f64,
    pub total_invested: f64,
    pub total_shares: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub strategy: Strategy,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub purchases: usize,
    pub invested_amount: f64,
    pub shares_held: f64,
    pub final_share_price: f64,
    pub final_amount: f64,
    pub duration_days: i64,
    pub annualized_gain: f64,
}

impl SimulationReport {
    /// Absolute gain (negative for a loss).
    pub fn gains(&self) -> f64 {
        self.final_amount - self.invested_amount
    }
}

/// Running totals owned by a single run.
#[derive(Debug)]
struct SimulationState {
    invested_amount: f64,
    shares_held: f64,
    purchases: usize,
    current_date: NaiveDate,
}

impl SimulationState {
    fn new(current_date: NaiveDate) -> Self {
        Self {
            invested_amount: 0.0,
            shares_held: 0.0,
            purchases: 0,
            current_date,
        }
    }

    fn buy(&mut self, amount: f64, price: f64, price_date: NaiveDate) -> Purchase {
        let shares = amount / price;
        self.invested_amount += amount;
        self.shares_held += shares;
        self.purchases += 1;
        Purchase {
            scheduled_date: self.current_date,
            price_date,
            price,
            amount,
            shares,
            total_invested: self.invested_amount,
            total_shares: self.shares_held,
        }
    }
}

/// Run one strategy over `series` and report its annualized gain.
///
/// Fails without a partial result if a price cannot be resolved or the
/// duration is too short to annualize. A run whose start and end dates are
/// equal still makes its single purchase before failing with
/// [`DcaError::DegenerateDuration`].
pub fn simulate(
    series: &PriceSeries,
    config: &SimulationConfig,
    observer: &dyn SimulationObserver,
) -> Result<SimulationReport, DcaError> {
    if config.start_date > config.end_date {
        return Err(DcaError::InvalidDateRange {
            start: config.start_date,
            end: config.end_date,
        });
    }
    if !config.purchase_amount.is_finite() || config.purchase_amount <= 0.0 {
        return Err(DcaError::InvalidAmount {
            reason: format!(
                "purchase amount must be positive, got {}",
                config.purchase_amount
            ),
        });
    }

    observer.on_start(config);

    let mut state = SimulationState::new(calendar::initial_alignment(config.start_date)?);
    while state.current_date <= config.end_date {
        let (price, price_date) = resolve_price(series, state.current_date)?;
        let purchase = state.buy(config.purchase_amount, price, price_date);
        observer.on_purchase(&purchase);
        state.current_date = calendar::advance(state.current_date, config.strategy)?;
    }

    // Valuation always uses the requested end date, not the last purchase.
    let (final_share_price, _) = resolve_price(series, config.end_date)?;
    let final_amount = state.shares_held * final_share_price;
    let duration_days = (config.end_date - config.start_date).num_days();

    let gain = annualized_gain(state.invested_amount, final_amount, duration_days as f64)?;

    let report = SimulationReport {
        strategy: config.strategy,
        start_date: config.start_date,
        end_date: config.end_date,
        purchases: state.purchases,
        invested_amount: state.invested_amount,
        shares_held: state.shares_held,
        final_share_price,
        final_amount,
        duration_days,
        annualized_gain: gain,
    };
    observer.on_complete(&report);
    Ok(report)
}
