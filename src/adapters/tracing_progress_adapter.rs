//! Simulation observer that emits `tracing` events.

use crate::domain::simulation::{Purchase, SimulationConfig, SimulationReport};
use crate::ports::progress_port::SimulationObserver;

/// Logs each run under the security it belongs to.
///
/// Purchases are logged at `debug`, run boundaries at `info`; the CLI decides
/// which of these reach the terminal.
pub struct TracingProgressAdapter {
    security: String,
}

impl TracingProgressAdapter {
    pub fn new(security: impl Into<String>) -> Self {
        Self {
            security: security.into(),
        }
    }
}

impl SimulationObserver for TracingProgressAdapter {
    fn on_start(&self, config: &SimulationConfig) {
        tracing::info!(
            security = %self.security,
            strategy = %config.strategy,
            start = %config.start_date,
            end = %config.end_date,
            "analyzing security"
        );
    }

    fn on_purchase(&self, purchase: &Purchase) {
        tracing::debug!(
            security = %self.security,
            date = %purchase.scheduled_date,
            price_date = %purchase.price_date,
            price = format_args!("{:.2}", purchase.price),
            shares = format_args!("{:.4}", purchase.shares),
            total_shares = format_args!("{:.4}", purchase.total_shares),
            value = format_args!("{:.2}", purchase.total_shares * purchase.price),
            "made purchase"
        );
    }

    fn on_complete(&self, report: &SimulationReport) {
        tracing::info!(
            security = %self.security,
            strategy = %report.strategy,
            purchases = report.purchases,
            invested = format_args!("{:.2}", report.invested_amount),
            final_amount = format_args!("{:.2}", report.final_amount),
            final_share_price = format_args!("{:.2}", report.final_share_price),
            gains = format_args!("{:.2}", report.gains()),
            days = report.duration_days,
            "simulation complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_series::PriceSeries;
    use crate::domain::simulation::simulate;
    use crate::domain::strategy::Strategy;
    use chrono::NaiveDate;

    #[test]
    fn drives_a_full_run_without_subscriber() {
        let d = |day| NaiveDate::from_ymd_opt(2020, 1, day).unwrap();
        let series = PriceSeries::new([(d(6), 10.0), (d(7), 11.0), (d(8), 12.0)]).unwrap();
        let config = SimulationConfig {
            strategy: Strategy::Daily,
            start_date: d(6),
            end_date: d(8),
            purchase_amount: 50.0,
        };

        let adapter = TracingProgressAdapter::new("TEST");
        let report = simulate(&series, &config, &adapter).unwrap();
        assert_eq!(report.purchases, 3);
        assert_eq!(adapter.security, "TEST");
    }
}
