//! Feature schema and payload validation for fraud scoring.
//!
//! The model consumes 29 features in a fixed order: the PCA components
//! `V1`..`V28` followed by `Amount`. This is the column order the
//! classifier was trained on and must never change independently of
//! retraining. `Time` is accepted on the wire but never enters the
//! model.

use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Required fields in model input order.
pub const REQUIRED_FIELDS: [&str; 29] = [
    "V1", "V2", "V3", "V4", "V5", "V6", "V7", "V8", "V9", "V10", "V11", "V12", "V13", "V14",
    "V15", "V16", "V17", "V18", "V19", "V20", "V21", "V22", "V23", "V24", "V25", "V26", "V27",
    "V28", "Amount",
];

/// Fields accepted for forward compatibility but ignored by the model.
pub const OPTIONAL_FIELDS: [&str; 1] = ["Time"];

/// Number of features consumed by the model.
pub const FEATURE_COUNT: usize = REQUIRED_FIELDS.len();

/// Extract a finite numeric value from a JSON value.
///
/// Numeric strings are coerced the way the upstream clients already
/// send them; booleans are rejected even though they are numerically
/// coercible, and NaN/infinity never pass.
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Bool(_) => None,
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Validate a raw payload against the feature schema.
///
/// Reports every missing required field at once, in schema order.
/// Fields outside the schema are silently accepted. Pure function, no
/// I/O.
pub fn validate_payload(payload: &Map<String, Value>) -> Result<(), ValidationError> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !payload.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    for field in REQUIRED_FIELDS.iter().chain(OPTIONAL_FIELDS.iter()) {
        if let Some(value) = payload.get(*field) {
            if numeric_value(value).is_none() {
                return Err(ValidationError::InvalidNumericValue(field.to_string()));
            }
        }
    }

    Ok(())
}

/// Project a payload through the schema into an ordered feature vector.
pub fn feature_vector(payload: &Map<String, Value>) -> Result<Vec<f64>, ValidationError> {
    validate_payload(payload)?;

    REQUIRED_FIELDS
        .iter()
        .map(|field| {
            numeric_value(&payload[*field])
                .ok_or_else(|| ValidationError::InvalidNumericValue(field.to_string()))
        })
        .collect()
}
