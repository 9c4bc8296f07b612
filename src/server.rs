//! HTTP serving layer: the form page and the prediction API.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::metrics::PipelineMetrics;
use crate::pipeline::PricePredictor;
use crate::types::{Prediction, RawAttributes};

/// Shared per-process state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<PricePredictor>,
    pub locations: Arc<Vec<String>>,
    pub metrics: Arc<PipelineMetrics>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/predict", post(predict_handler))
        .route("/locations", get(locations_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Response for a predict request.
///
/// The submitted attributes are echoed back so the form can be re-filled
/// when the user is asked to correct an invalid submission.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Prediction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub form: RawAttributes,
}

async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn predict_handler(
    State(state): State<AppState>,
    Form(attributes): Form<RawAttributes>,
) -> Json<PredictResponse> {
    let start = Instant::now();

    match state.predictor.predict(&attributes) {
        Ok(prediction) => {
            state.metrics.record_success(start.elapsed(), prediction.price);
            info!(
                prediction_id = %prediction.prediction_id,
                price = prediction.price,
                location = %attributes.location,
                processing_time_us = start.elapsed().as_micros(),
                "Prediction served"
            );
            Json(PredictResponse {
                status: "ok",
                prediction: Some(prediction),
                error: None,
                form: attributes,
            })
        }
        Err(e) => {
            state.metrics.record_failure(start.elapsed(), e.reason());
            warn!(reason = e.reason(), "Prediction request failed");
            Json(PredictResponse {
                status: "error",
                prediction: None,
                error: Some(e.to_string()),
                form: attributes,
            })
        }
    }
}

async fn locations_handler(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.locations.as_ref().clone())
}

/// Health summary for the service.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
    location_encodings: usize,
    known_locations: usize,
}

/// Health check endpoint
///
/// Returns 200 OK while the model is loaded, 503 Service Unavailable when
/// the service is running without a model (every prediction will fail).
async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let model_loaded = state.predictor.model_available();

    let (code, status) = if model_loaded {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status,
            model_loaded,
            location_encodings: state.predictor.location_encoder().len(),
            known_locations: state.locations.len(),
        }),
    )
}
