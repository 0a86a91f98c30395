//! Simulation progress observer port.

use crate::domain::simulation::{Purchase, SimulationConfig, SimulationReport};

/// Receives progress notifications from a simulation run.
///
/// All methods default to no-ops so observers only implement what they need.
pub trait SimulationObserver {
    fn on_start(&self, _config: &SimulationConfig) {}

    fn on_purchase(&self, _purchase: &Purchase) {}

    fn on_complete(&self, _report: &SimulationReport) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl SimulationObserver for SilentObserver {}
