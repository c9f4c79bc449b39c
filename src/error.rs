//! Error types for the fraud scoring service

use thiserror::Error;

/// Payload validation failures. These are caller errors and carry an
/// enumerable reason suitable for returning verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are absent. Lists every missing
    /// field in schema order, not just the first.
    #[error("Missing fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// A present field is a boolean, non-numeric, or non-finite value.
    #[error("Invalid numeric value for {0}")]
    InvalidNumericValue(String),
}

/// Model fitting, inference, and persistence failures.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Cannot fit on an empty training set")]
    EmptyTrainingSet,

    #[error("Row count ({rows}) does not match label count ({labels})")]
    LabelMismatch { rows: usize, labels: usize },

    #[error("Feature vector has {got} values, expected {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed model artifact: {0}")]
    Format(#[from] serde_json::Error),
}

/// Training-run failures. Malformed individual rows are not errors;
/// they are skipped and counted by the dataset loader.
#[derive(Error, Debug)]
pub enum TrainingError {
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("No valid rows found in dataset")]
    EmptyDataset,

    #[error("Failed to read dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Model(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message_lists_all() {
        let err = ValidationError::MissingFields(vec!["V1".to_string(), "Amount".to_string()]);
        assert_eq!(err.to_string(), "Missing fields: V1, Amount");
    }

    #[test]
    fn test_invalid_numeric_message_names_field() {
        let err = ValidationError::InvalidNumericValue("V7".to_string());
        assert_eq!(err.to_string(), "Invalid numeric value for V7");
    }
}
