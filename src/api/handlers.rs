//! API route handlers
//!
//! - HTML form: idle page, form submission, About
//! - JSON mirror of predict / about plus the loaded model summary
//! - Liveness check

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use super::envelope::{self, ApiError};
use super::render::FormView;
use crate::model::{ModelSummary, PredictiveModel};
use crate::prediction::{self, Banner, FormInput, PredictionRequest, Predictor, SubmitError};

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Predictor,
    pub model_summary: Arc<ModelSummary>,
}

impl AppState {
    pub fn new(model: Arc<dyn PredictiveModel>, model_summary: ModelSummary) -> Self {
        Self {
            predictor: Predictor::new(model),
            model_summary: Arc::new(model_summary),
        }
    }
}

// ============================================================================
// HTML Form
// ============================================================================

/// GET / - Idle form
pub async fn form_page() -> Html<String> {
    Html(FormView::idle().render())
}

/// POST /predict - "Predict Transmissibility" action
pub async fn submit_form(State(state): State<AppState>, Form(input): Form<FormInput>) -> Html<String> {
    let outcome = state.predictor.submit(&input);
    match &outcome.banner {
        Banner::Success(msg) => info!(%msg, "Form prediction served"),
        Banner::Error(msg) => info!(%msg, "Form submission rejected"),
        Banner::Info(_) => {}
    }
    let view = match outcome.request {
        Some(request) => FormView::from_request(&request, Some(outcome.banner)),
        None => FormView::from_raw(&input, Some(outcome.banner)),
    };
    Html(view.render())
}

/// GET /about - "About" action; current field values are only echoed back
pub async fn about_page(Query(input): Query<FormInput>) -> Html<String> {
    let view = match input.parse() {
        Ok(request) => FormView::from_request(&request, Some(prediction::about())),
        Err(_) => FormView::from_raw(&input, Some(prediction::about())),
    };
    Html(view.render())
}

// ============================================================================
// JSON API
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// Raw model output.
    pub transmissibility: f64,
    /// Two-decimal display value.
    pub display: String,
    pub message: String,
}

/// POST /api/v1/predict
///
/// Body rejections are wrapped in the error envelope rather than left as
/// axum's plain-text responses.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        info!(error = %rejection, "Prediction body rejected");
        ApiError::from(rejection)
    })?;
    match state.predictor.predict(&request) {
        Ok(result) => Ok(envelope::data(PredictResponse {
            transmissibility: result.value,
            display: result.display_value(),
            message: result.message(),
        })),
        Err(SubmitError::Validation(e)) => {
            info!(error = %e, "Prediction request rejected");
            Err(e.into())
        }
        Err(e) => {
            warn!(error = %e, "Prediction failed");
            Err(ApiError::internal(e.to_string()))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AboutResponse {
    pub lines: Vec<String>,
}

/// GET /api/v1/about
pub async fn about() -> Response {
    let lines = prediction::ABOUT_LINES.iter().map(|s| (*s).to_string()).collect();
    envelope::data(AboutResponse { lines })
}

/// GET /api/v1/model - Summary of the loaded model artifact
pub async fn model_info(State(state): State<AppState>) -> Response {
    envelope::data(state.model_summary.as_ref())
}

/// Fallback for unknown `/api/v1/*` paths
pub async fn api_not_found() -> ApiError {
    ApiError::not_found("No such API endpoint")
}

// ============================================================================
// Health
// ============================================================================

/// GET /health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "model": state.predictor.model_kind(),
    }))
}
