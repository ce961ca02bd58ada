//! HTTP routes and handlers

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use spamscore_classifiers::ArtifactFingerprints;
use spamscore_core::Score;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info_span, warn};
use uuid::Uuid;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/score", post(score_text))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .fallback(fallback)
        // Enforced by the Json extractor so oversized bodies still get the
        // JSON error envelope.
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Score a text for spam.
///
/// Expects `{"text": "...", "threshold": 0.5}` with `threshold` optional and
/// answers `{"prediction": bool, "propensity": float}`.
async fn score_text(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Score>, AppError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("score", %request_id);

    span.in_scope(|| {
        let start = Instant::now();
        let result = handle_score(&state, payload);

        let status = match &result {
            Ok(score) => {
                let prediction = if score.prediction { "spam" } else { "ham" };
                metrics::counter!("spamscore_predictions_total", "prediction" => prediction)
                    .increment(1);
                metrics::histogram!("spamscore_scoring_latency_us")
                    .record(start.elapsed().as_micros() as f64);
                debug!(
                    prediction = score.prediction,
                    propensity = score.propensity,
                    "Request scored"
                );
                StatusCode::OK
            }
            Err(e) => {
                metrics::counter!("spamscore_errors_total", "kind" => e.kind()).increment(1);
                warn!("Scoring request failed: {}", e);
                e.status()
            }
        };
        metrics::counter!("spamscore_requests_total", "status" => status.as_u16().to_string())
            .increment(1);

        result.map(Json)
    })
}

fn handle_score(
    state: &AppState,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Score, AppError> {
    // The model is checked before the body, so a missing model is reported
    // even for malformed requests.
    let model = state.model.as_ref().ok_or(AppError::ModelUnavailable)?;

    let Json(body) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::InvalidRequest(format!("Invalid JSON body: {}", rejection.body_text()))
        }
    })?;

    let request = ScoreRequest::from_json(&body, state.config.default_threshold)?;

    model
        .score(&request.text, request.threshold)
        .map_err(|e| {
            error!("Scoring failed: {}", e);
            AppError::Scoring(e.to_string())
        })
}

/// Validated `/score` request
#[derive(Debug, Clone, PartialEq)]
struct ScoreRequest {
    text: String,
    threshold: f64,
}

impl ScoreRequest {
    fn from_json(body: &Value, default_threshold: f64) -> Result<Self, AppError> {
        let text = match body.get("text") {
            None => return Err(AppError::InvalidRequest("No text provided".to_string())),
            Some(Value::String(text)) => text.clone(),
            Some(_) => {
                return Err(AppError::InvalidRequest(
                    "Field 'text' must be a string".to_string(),
                ))
            }
        };

        let threshold = match body.get("threshold") {
            None | Some(Value::Null) => default_threshold,
            Some(value) => value.as_f64().ok_or_else(|| {
                AppError::InvalidRequest("Field 'threshold' must be a number".to_string())
            })?,
        };

        Ok(Self { text, threshold })
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
    classifier: Option<String>,
    n_features: Option<usize>,
    artifacts: Option<ArtifactFingerprints>,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let response = match &state.model {
        Some(model) => HealthResponse {
            status: "ok",
            model_loaded: true,
            classifier: Some(model.classifier_name().to_string()),
            n_features: Some(model.n_features()),
            artifacts: model.fingerprints().cloned(),
        },
        None => HealthResponse {
            status: "degraded",
            model_loaded: false,
            classifier: None,
            n_features: None,
            artifacts: None,
        },
    };

    Json(response)
}

async fn metrics(State(state): State<AppState>) -> String {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

async fn fallback() -> AppError {
    AppError::NotFound
}

/// Error handling
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Model not loaded")]
    ModelUnavailable,

    #[error("{0}")]
    Scoring(String),

    #[error("Not found")]
    NotFound,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::ModelUnavailable | AppError::Scoring(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::PayloadTooLarge => "payload_too_large",
            AppError::ModelUnavailable => "model_unavailable",
            AppError::Scoring(_) => "scoring",
            AppError::NotFound => "not_found",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.to_string(),
            "prediction": null,
            "propensity": null,
        });

        (self.status(), Json(body)).into_response()
    }
}
