//! Prediction output data structures

use serde::{Deserialize, Serialize};

/// Probability at or above which a transaction is labeled fraudulent.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Risk tier classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Determine risk tier from probability and thresholds.
    ///
    /// Buckets are half-open on the lower bound; HIGH is closed above
    /// at 1.0.
    pub fn from_probability(probability: f64, thresholds: &RiskThresholds) -> Self {
        if probability >= thresholds.high {
            RiskLevel::High
        } else if probability >= thresholds.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Configurable risk tier thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub medium: f64,
    pub high: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium: 0.30,
            high: 0.70,
        }
    }
}

/// Scoring result returned for a single transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Fraud probability in [0, 1]
    pub fraud_probability: f64,

    /// Binary label: 1 = fraud, 0 = legitimate
    pub label: u8,

    /// Coarse risk tier
    pub risk_level: RiskLevel,
}

impl Prediction {
    /// Derive label and risk tier from a probability.
    pub fn from_probability(probability: f64, thresholds: &RiskThresholds) -> Self {
        Self {
            fraud_probability: probability,
            label: u8::from(probability >= DECISION_THRESHOLD),
            risk_level: RiskLevel::from_probability(probability, thresholds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_boundaries() {
        let thresholds = RiskThresholds::default();

        assert_eq!(RiskLevel::from_probability(0.0, &thresholds), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.2999, &thresholds), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.30, &thresholds), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_probability(0.6999, &thresholds), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_probability(0.70, &thresholds), RiskLevel::High);
        assert_eq!(RiskLevel::from_probability(1.0, &thresholds), RiskLevel::High);
    }

    #[test]
    fn test_label_boundary_inclusive_on_high_side() {
        let thresholds = RiskThresholds::default();

        assert_eq!(Prediction::from_probability(0.4999, &thresholds).label, 0);
        assert_eq!(Prediction::from_probability(0.5, &thresholds).label, 1);
        assert_eq!(Prediction::from_probability(0.9, &thresholds).label, 1);
    }

    #[test]
    fn test_risk_level_serializes_uppercase() {
        let json = serde_json::to_string(&RiskLevel::Medium).unwrap();
        assert_eq!(json, "\"MEDIUM\"");
    }

    #[test]
    fn test_prediction_serialization() {
        let prediction = Prediction::from_probability(0.82, &RiskThresholds::default());

        let json = serde_json::to_string(&prediction).unwrap();
        let deserialized: Prediction = serde_json::from_str(&json).unwrap();

        assert_eq!(prediction.fraud_probability, deserialized.fraud_probability);
        assert_eq!(prediction.label, 1);
        assert_eq!(deserialized.risk_level, RiskLevel::High);
    }
}
