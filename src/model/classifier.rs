//! Class-weighted logistic regression
//!
//! Fraud labels are extremely imbalanced (typically under 1% positive),
//! so fitting upweights the minority class inversely proportional to
//! its frequency. Optimization is deterministic full-batch gradient
//! descent with an L2 penalty and a bounded iteration count.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ModelError;

/// Fitting hyper-parameters.
#[derive(Debug, Clone)]
pub struct FitOptions {
    /// Iteration bound; hitting it without convergence is a warning,
    /// not an error.
    pub max_iter: usize,
    pub learning_rate: f64,
    /// L2 penalty on the weights (the intercept is not penalized).
    pub l2: f64,
    /// Gradient-norm threshold for convergence.
    pub tolerance: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            learning_rate: 0.1,
            l2: 1.0,
            tolerance: 1e-4,
        }
    }
}

/// A weight per standardized feature plus an intercept, defining a
/// linear decision function squashed through the logistic transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    intercept: f64,
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl LogisticRegression {
    /// Fit on standardized rows with binary labels.
    ///
    /// Class weights follow the balanced scheme `n / (2 * n_class)`; a
    /// single-class input falls back to unit weights. Weights start at
    /// zero, so fitting is deterministic for fixed input.
    pub fn fit(matrix: &[Vec<f64>], labels: &[u8], options: &FitOptions) -> Result<Self, ModelError> {
        if matrix.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        if matrix.len() != labels.len() {
            return Err(ModelError::LabelMismatch {
                rows: matrix.len(),
                labels: labels.len(),
            });
        }

        let rows = matrix.len();
        let columns = matrix[0].len();
        let positives = labels.iter().filter(|&&label| label == 1).count();
        let negatives = rows - positives;

        let (positive_weight, negative_weight) = if positives == 0 || negatives == 0 {
            (1.0, 1.0)
        } else {
            (
                rows as f64 / (2.0 * positives as f64),
                rows as f64 / (2.0 * negatives as f64),
            )
        };
        let total_weight = positive_weight * positives as f64 + negative_weight * negatives as f64;

        let mut weights = vec![0.0; columns];
        let mut intercept = 0.0;
        let mut converged = false;

        for iteration in 0..options.max_iter {
            let mut weight_gradient = vec![0.0; columns];
            let mut intercept_gradient = 0.0;

            for (row, &label) in matrix.iter().zip(labels) {
                let probability = sigmoid(intercept + dot(&weights, row));
                let sample_weight = if label == 1 { positive_weight } else { negative_weight };
                let residual = sample_weight * (probability - f64::from(label));

                for (gradient, &value) in weight_gradient.iter_mut().zip(row) {
                    *gradient += residual * value;
                }
                intercept_gradient += residual;
            }

            for (gradient, &weight) in weight_gradient.iter_mut().zip(&weights) {
                *gradient = (*gradient + options.l2 * weight) / total_weight;
            }
            intercept_gradient /= total_weight;

            let gradient_norm = (weight_gradient.iter().map(|g| g * g).sum::<f64>()
                + intercept_gradient * intercept_gradient)
                .sqrt();
            if gradient_norm < options.tolerance {
                debug!(iterations = iteration, "Classifier fit converged");
                converged = true;
                break;
            }

            for (weight, gradient) in weights.iter_mut().zip(&weight_gradient) {
                *weight -= options.learning_rate * gradient;
            }
            intercept -= options.learning_rate * intercept_gradient;
        }

        if !converged {
            warn!(
                max_iter = options.max_iter,
                "Classifier fit did not converge within iteration bound"
            );
        }

        Ok(Self { weights, intercept })
    }

    /// Fraud probability for a standardized vector. Always in [0, 1].
    pub fn predict_probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.weights.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.weights.len(),
                got: features.len(),
            });
        }

        Ok(sigmoid(self.intercept + dot(&self.weights, features)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_data() -> (Vec<Vec<f64>>, Vec<u8>) {
        let matrix: Vec<Vec<f64>> = (-10..10).map(|i| vec![f64::from(i) / 5.0]).collect();
        let labels: Vec<u8> = (-10..10).map(|i| u8::from(i >= 0)).collect();
        (matrix, labels)
    }

    #[test]
    fn test_sigmoid_bounds() {
        assert!(sigmoid(0.0) > 0.49 && sigmoid(0.0) < 0.51);
        assert!(sigmoid(100.0) > 0.99);
        assert!(sigmoid(-100.0) < 0.01);
    }

    #[test]
    fn test_fit_separates_classes() {
        let (matrix, labels) = separable_data();
        let model = LogisticRegression::fit(&matrix, &labels, &FitOptions::default()).unwrap();

        assert!(model.predict_probability(&[2.0]).unwrap() > 0.5);
        assert!(model.predict_probability(&[-2.0]).unwrap() < 0.5);
    }

    #[test]
    fn test_probability_always_in_unit_interval() {
        let (matrix, labels) = separable_data();
        let model = LogisticRegression::fit(&matrix, &labels, &FitOptions::default()).unwrap();

        for value in [-1e6, -3.0, 0.0, 3.0, 1e6] {
            let probability = model.predict_probability(&[value]).unwrap();
            assert!((0.0..=1.0).contains(&probability));
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (matrix, labels) = separable_data();
        let options = FitOptions::default();

        let first = LogisticRegression::fit(&matrix, &labels, &options).unwrap();
        let second = LogisticRegression::fit(&matrix, &labels, &options).unwrap();

        assert_eq!(first.weights, second.weights);
        assert_eq!(first.intercept, second.intercept);
    }

    #[test]
    fn test_balanced_weights_resist_imbalance_collapse() {
        // 1 positive among 21 rows; unweighted fitting would collapse
        // toward predicting the majority class everywhere.
        let mut matrix: Vec<Vec<f64>> = (0..20).map(|i| vec![-1.0 - f64::from(i) * 0.05]).collect();
        let mut labels = vec![0u8; 20];
        matrix.push(vec![2.0]);
        labels.push(1);

        let model = LogisticRegression::fit(&matrix, &labels, &FitOptions::default()).unwrap();
        assert!(model.predict_probability(&[2.0]).unwrap() > 0.5);
    }

    #[test]
    fn test_label_mismatch_rejected() {
        let result = LogisticRegression::fit(&[vec![1.0]], &[1, 0], &FitOptions::default());
        assert!(matches!(
            result,
            Err(ModelError::LabelMismatch { rows: 1, labels: 2 })
        ));
    }
}
