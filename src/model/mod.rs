//! Model fitting and inference components

pub mod classifier;
pub mod pipeline;
pub mod scaler;

pub use classifier::LogisticRegression;
pub use pipeline::FraudPipeline;
pub use scaler::StandardScaler;
