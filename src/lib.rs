//! Fraud Scoring Service Library
//!
//! Scores financial transactions for fraud likelihood. A standardizer +
//! logistic regression pipeline is fit offline from labeled history,
//! persisted as a single artifact, and served frozen over HTTP.

pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod server;
pub mod trainer;
pub mod types;

pub use config::AppConfig;
pub use error::{ModelError, TrainingError, ValidationError};
pub use model::pipeline::FraudPipeline;
pub use types::{Prediction, RiskLevel, RiskThresholds};
