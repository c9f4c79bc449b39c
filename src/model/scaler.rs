//! Feature standardization (z-scoring)

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ModelError;

/// Per-column mean and standard deviation learned from training data.
///
/// Frozen after fitting; inference transforms vectors with these
/// statistics only, never with statistics of the data being scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Compute column-wise mean and population standard deviation over
    /// every row of the matrix. Deterministic given fixed input.
    ///
    /// A column with zero variance gets a unit denominator, so its
    /// standardized value is always 0.0.
    pub fn fit(matrix: &[Vec<f64>]) -> Result<Self, ModelError> {
        if matrix.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }

        let rows = matrix.len() as f64;
        let columns = matrix[0].len();

        let mut means = vec![0.0; columns];
        for row in matrix {
            for (mean, &value) in means.iter_mut().zip(row) {
                *mean += value;
            }
        }
        for mean in &mut means {
            *mean /= rows;
        }

        let mut stds = vec![0.0; columns];
        for row in matrix {
            for ((std, &mean), &value) in stds.iter_mut().zip(&means).zip(row) {
                *std += (value - mean).powi(2);
            }
        }
        for (column, std) in stds.iter_mut().enumerate() {
            *std = (*std / rows).sqrt();
            if *std <= f64::EPSILON {
                warn!(column = column, "Zero-variance feature column, standardizing with unit scale");
                *std = 1.0;
            }
        }

        Ok(Self { means, stds })
    }

    /// Z-score a vector with the frozen statistics.
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        if features.len() != self.means.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.means.len(),
                got: features.len(),
            });
        }

        Ok(features
            .iter()
            .zip(self.means.iter().zip(&self.stds))
            .map(|(&value, (&mean, &std))| (value - mean) / std)
            .collect())
    }

    /// Number of feature columns the scaler was fit on.
    pub fn column_count(&self) -> usize {
        self.means.len()
    }
}
