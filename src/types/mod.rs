//! Shared data types

pub mod prediction;

pub use prediction::{Prediction, RiskLevel, RiskThresholds};
