//! Core domain types and logic.

pub mod strategy;
pub mod calendar;
pub mod price_series;
pub mod gain;
pub mod simulation;
pub mod config_validation;
pub mod error;
