//! HTTP serving layer for fraud scoring
//!
//! The pipeline is injected into the router state once at startup and
//! shared read-only across requests; a process whose artifact failed to
//! load still serves health checks and rejects predictions with a fixed
//! error.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::ValidationError;
use crate::features;
use crate::model::pipeline::FraudPipeline;
use crate::types::prediction::{Prediction, RiskThresholds};

pub type ApiResult<T> = Result<T, ApiError>;

/// Shared, read-only serving state
#[derive(Clone)]
pub struct AppState {
    /// The loaded pipeline; `None` means the process is degraded and
    /// rejects predictions while still answering health checks.
    pub pipeline: Option<Arc<FraudPipeline>>,
    pub risk_levels: RiskThresholds,
}

/// Request-level failures mapped onto the response taxonomy: caller
/// errors are 400 with a specific reason, server errors are 500 with a
/// fixed message that leaks no internal detail.
#[derive(Debug)]
pub enum ApiError {
    InvalidPayload,
    NotAnObject,
    Validation(ValidationError),
    ModelUnavailable,
    PredictionFailed,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidPayload => {
                (StatusCode::BAD_REQUEST, "Invalid JSON payload.".to_string())
            }
            ApiError::NotAnObject => (
                StatusCode::BAD_REQUEST,
                "JSON payload must be an object.".to_string(),
            ),
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::ModelUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Model pipeline not loaded.".to_string(),
            ),
            ApiError::PredictionFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Prediction failed. Please try again.".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Create the router with all routes and layers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/predict", post(predict))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
    version: &'static str,
    timestamp: i64,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model_loaded: state.pipeline.is_some(),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Prediction>> {
    let pipeline = state.pipeline.as_ref().ok_or(ApiError::ModelUnavailable)?;

    let Json(payload) = payload.map_err(|_| ApiError::InvalidPayload)?;
    let payload = payload.as_object().ok_or(ApiError::NotAnObject)?;

    let features = features::feature_vector(payload).map_err(ApiError::Validation)?;

    let prediction = pipeline
        .predict(&features, &state.risk_levels)
        .map_err(|err| {
            error!(error = %err, "Prediction failed");
            ApiError::PredictionFailed
        })?;

    Ok(Json(prediction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::classifier::FitOptions;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;

    fn fitted_pipeline() -> FraudPipeline {
        let mut matrix = Vec::new();
        let mut labels = Vec::new();
        for i in 0..10 {
            let jitter = f64::from(i % 3) * 0.1;
            matrix.push(
                (0..features::FEATURE_COUNT)
                    .map(|c| jitter + c as f64 * 0.01)
                    .collect(),
            );
            labels.push(0);
            matrix.push(
                (0..features::FEATURE_COUNT)
                    .map(|c| 6.0 + jitter - c as f64 * 0.01)
                    .collect(),
            );
            labels.push(1);
        }
        FraudPipeline::fit(&matrix, &labels, &FitOptions::default()).unwrap()
    }

    fn router_with_model() -> Router {
        create_router(AppState {
            pipeline: Some(Arc::new(fitted_pipeline())),
            risk_levels: RiskThresholds::default(),
        })
    }

    fn router_without_model() -> Router {
        create_router(AppState {
            pipeline: None,
            risk_levels: RiskThresholds::default(),
        })
    }

    fn zero_payload() -> Value {
        let mut payload = serde_json::Map::new();
        for field in features::REQUIRED_FIELDS {
            payload.insert(field.to_string(), json!(0.0));
        }
        Value::Object(payload)
    }

    fn post_predict(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predict")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn response_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_degraded_model() {
        let response = router_without_model()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["model_loaded"], false);
    }

    #[tokio::test]
    async fn test_predict_without_model_is_server_error() {
        let response = router_without_model()
            .oneshot(post_predict(zero_payload().to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response_json(response).await;
        assert_eq!(body["error"], "Model pipeline not loaded.");
    }

    #[tokio::test]
    async fn test_predict_zero_vector_scores_low() {
        let response = router_with_model()
            .oneshot(post_predict(zero_payload().to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["label"], 0);
        assert_eq!(body["risk_level"], "LOW");
        let probability = body["fraud_probability"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&probability));
    }

    #[tokio::test]
    async fn test_predict_missing_amount_names_field() {
        let mut payload = zero_payload();
        payload.as_object_mut().unwrap().remove("Amount");

        let response = router_with_model()
            .oneshot(post_predict(payload.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("Amount"));
    }

    #[tokio::test]
    async fn test_predict_rejects_non_object_payload() {
        let response = router_with_model()
            .oneshot(post_predict("[1, 2, 3]".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["error"], "JSON payload must be an object.");
    }

    #[tokio::test]
    async fn test_predict_rejects_malformed_body() {
        let response = router_with_model()
            .oneshot(post_predict("{not json".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["error"], "Invalid JSON payload.");
    }

    #[tokio::test]
    async fn test_predict_rejects_boolean_value() {
        let mut payload = zero_payload();
        payload
            .as_object_mut()
            .unwrap()
            .insert("V1".to_string(), json!(true));

        let response = router_with_model()
            .oneshot(post_predict(payload.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["error"], "Invalid numeric value for V1");
    }
}
