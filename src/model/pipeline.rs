//! The fitted scaler + classifier unit that is persisted and served
//!
//! Scaler and classifier are always fit together on the same rows and
//! travel as one artifact, so serving never standardizes with one
//! dataset's statistics while classifying with another's weights. The
//! only constructors are [`FraudPipeline::fit`] and
//! [`FraudPipeline::load`]; an unfitted pipeline is unrepresentable.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ModelError;
use crate::model::classifier::{FitOptions, LogisticRegression};
use crate::model::scaler::StandardScaler;
use crate::types::prediction::{Prediction, RiskThresholds};

/// Immutable standardization + classification pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudPipeline {
    scaler: StandardScaler,
    classifier: LogisticRegression,
}

impl FraudPipeline {
    /// Fit scaler then classifier on the same rows, in that order.
    pub fn fit(matrix: &[Vec<f64>], labels: &[u8], options: &FitOptions) -> Result<Self, ModelError> {
        if matrix.len() != labels.len() {
            return Err(ModelError::LabelMismatch {
                rows: matrix.len(),
                labels: labels.len(),
            });
        }

        let scaler = StandardScaler::fit(matrix)?;
        let standardized: Vec<Vec<f64>> = matrix
            .iter()
            .map(|row| scaler.transform(row))
            .collect::<Result<_, _>>()?;
        let classifier = LogisticRegression::fit(&standardized, labels, options)?;

        Ok(Self { scaler, classifier })
    }

    /// Fraud probability for a raw feature vector. Always in [0, 1].
    pub fn predict_probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        let standardized = self.scaler.transform(features)?;
        self.classifier.predict_probability(&standardized)
    }

    /// Full scoring result: probability, label, and risk tier.
    pub fn predict(
        &self,
        features: &[f64],
        thresholds: &RiskThresholds,
    ) -> Result<Prediction, ModelError> {
        let probability = self.predict_probability(features)?;
        Ok(Prediction::from_probability(probability, thresholds))
    }

    /// Number of feature columns the pipeline was fit on.
    pub fn feature_count(&self) -> usize {
        self.scaler.column_count()
    }

    /// Persist scaler and classifier as a single artifact.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, serde_json::to_vec_pretty(self)?)?;
        info!(path = %path.display(), "Saved pipeline artifact");
        Ok(())
    }

    /// Load a previously saved artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let pipeline: Self = serde_json::from_slice(&bytes)?;
        info!(
            path = %path.display(),
            features = pipeline.feature_count(),
            "Loaded pipeline artifact"
        );
        Ok(pipeline)
    }
}
