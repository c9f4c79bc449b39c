//! Fraud Scoring Service - Serving Entry Point
//!
//! Loads the persisted pipeline once and serves scoring requests over
//! HTTP. A failed artifact load degrades the process instead of
//! crashing it: health checks keep answering and predictions are
//! rejected with a fixed error.

use std::sync::Arc;

use anyhow::Result;
use fraud_scoring_service::config::AppConfig;
use fraud_scoring_service::model::pipeline::FraudPipeline;
use fraud_scoring_service::server::{self, AppState};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_else(|_| AppConfig::default());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("fraud_scoring_service={}", config.logging.level).into()
            }),
        )
        .init();

    info!("Starting Fraud Scoring Service");
    info!(
        "Risk tiers: low<{:.2}, medium<{:.2}, high>={:.2}",
        config.detection.risk_levels.medium,
        config.detection.risk_levels.high,
        config.detection.risk_levels.high
    );

    let pipeline = match FraudPipeline::load(&config.model.path) {
        Ok(pipeline) => Some(Arc::new(pipeline)),
        Err(err) => {
            error!(
                path = %config.model.path,
                error = %err,
                "Failed to load model pipeline, serving in degraded mode"
            );
            None
        }
    };

    let state = AppState {
        pipeline,
        risk_levels: config.detection.risk_levels.clone(),
    };
    let app = server::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Listening for scoring requests");
    axum::serve(listener, app).await?;

    Ok(())
}
