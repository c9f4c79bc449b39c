//! Training Entry Point
//!
//! Fits the standardizer + classifier pipeline from a labeled CSV and
//! persists it for the serving process.

use anyhow::{Context, Result};
use fraud_scoring_service::config::AppConfig;
use fraud_scoring_service::trainer;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("train=info".parse()?)
                .add_directive("fraud_scoring_service=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let data_path = args
        .get(1)
        .map(String::as_str)
        .context("Usage: train <data.csv> [output-path]")?;

    let config = AppConfig::load().unwrap_or_else(|_| AppConfig::default());
    let output = args
        .get(2)
        .cloned()
        .unwrap_or_else(|| config.model.path.clone());

    info!(data = %data_path, output = %output, "Training fraud scoring pipeline");

    let dataset = trainer::load_dataset(data_path)
        .with_context(|| format!("Failed to load dataset from {data_path}"))?;
    info!(
        rows = dataset.len(),
        positives = dataset.positives(),
        skipped_rows = dataset.skipped_rows,
        "Dataset loaded"
    );

    let pipeline = trainer::train(
        &dataset,
        config.training.test_fraction,
        config.training.seed,
        &config.training.fit_options(),
    )?;

    pipeline
        .save(&output)
        .with_context(|| format!("Failed to write pipeline to {output}"))?;

    println!("Saved model pipeline to {output}");
    Ok(())
}
