//! Dataset loading, reproducible splitting, and pipeline training

use std::path::Path;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use tracing::{info, warn};

use crate::error::TrainingError;
use crate::features::REQUIRED_FIELDS;
use crate::model::classifier::FitOptions;
use crate::model::pipeline::FraudPipeline;

/// Label column in training data: 0 = legitimate, 1 = fraud.
pub const LABEL_COLUMN: &str = "Class";

/// Parsed training data: one feature row per label.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<u8>,
    /// Rows dropped during parsing. Skips are non-fatal but reported,
    /// since silently losing training data affects reproducibility.
    pub skipped_rows: usize,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of fraud-labeled rows.
    pub fn positives(&self) -> usize {
        self.labels.iter().filter(|&&label| label == 1).count()
    }
}

fn parse_cell(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a delimited dataset file.
///
/// The header must contain `V1..V28`, `Amount`, and `Class`; other
/// columns (e.g. `Time`) are ignored. Rows that fail numeric parsing
/// for any required column are skipped and counted, not fatal.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, TrainingError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut missing = Vec::new();
    let mut feature_indices = Vec::with_capacity(REQUIRED_FIELDS.len());
    for column in REQUIRED_FIELDS {
        match headers.iter().position(|header| header == column) {
            Some(index) => feature_indices.push(index),
            None => missing.push(column.to_string()),
        }
    }
    let label_index = headers.iter().position(|header| header == LABEL_COLUMN);
    if label_index.is_none() {
        missing.push(LABEL_COLUMN.to_string());
    }
    if !missing.is_empty() {
        return Err(TrainingError::MissingColumns(missing));
    }
    let label_index = label_index.unwrap_or_default();

    let mut dataset = Dataset::default();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(_) => {
                dataset.skipped_rows += 1;
                continue;
            }
        };

        let row: Option<Vec<f64>> = feature_indices
            .iter()
            .map(|&index| record.get(index).and_then(parse_cell))
            .collect();
        let label = record
            .get(label_index)
            .and_then(parse_cell)
            .and_then(|value| match value as i64 {
                0 if value == 0.0 => Some(0u8),
                1 if value == 1.0 => Some(1u8),
                _ => None,
            });

        match (row, label) {
            (Some(row), Some(label)) => {
                dataset.features.push(row);
                dataset.labels.push(label);
            }
            _ => dataset.skipped_rows += 1,
        }
    }

    if dataset.is_empty() {
        return Err(TrainingError::EmptyDataset);
    }
    if dataset.skipped_rows > 0 {
        warn!(
            skipped_rows = dataset.skipped_rows,
            "Skipped rows with unparseable values"
        );
    }

    Ok(dataset)
}

/// Stratified train/test partition.
///
/// Indices are grouped per class and each group is shuffled by a PRNG
/// seeded from `seed`, so the same seed and input always yield the
/// identical partition while preserving the class ratio on both sides.
pub fn stratified_split(dataset: &Dataset, test_fraction: f64, seed: u64) -> (Dataset, Dataset) {
    let mut rng = Pcg64::seed_from_u64(seed);
    let mut train = Dataset::default();
    let mut test = Dataset::default();

    for class in [0u8, 1u8] {
        let mut indices: Vec<usize> = (0..dataset.len())
            .filter(|&i| dataset.labels[i] == class)
            .collect();
        indices.shuffle(&mut rng);

        let test_count = (indices.len() as f64 * test_fraction).round() as usize;
        for (position, &index) in indices.iter().enumerate() {
            let partition = if position < test_count { &mut test } else { &mut train };
            partition.features.push(dataset.features[index].clone());
            partition.labels.push(dataset.labels[index]);
        }
    }

    (train, test)
}

/// Split the dataset and fit the pipeline on the training partition
/// only. The test partition is reserved for offline evaluation.
pub fn train(
    dataset: &Dataset,
    test_fraction: f64,
    seed: u64,
    options: &FitOptions,
) -> Result<FraudPipeline, TrainingError> {
    let (train_set, test_set) = stratified_split(dataset, test_fraction, seed);
    info!(
        train_rows = train_set.len(),
        train_positives = train_set.positives(),
        test_rows = test_set.len(),
        test_positives = test_set.positives(),
        seed = seed,
        "Stratified split complete"
    );

    let pipeline = FraudPipeline::fit(&train_set.features, &train_set.labels, options)?;
    Ok(pipeline)
}
