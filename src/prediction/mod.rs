//! Prediction form handling
//!
//! Turns one form submission into exactly one displayable outcome:
//! - parse raw fields and validate the domain constraints
//! - invoke the shared model once with the fixed-order feature vector
//! - format the result (two decimals) or the failure message
//!
//! The handler has no memory between submissions. A page starts Idle (no
//! banner), a submit produces a [`Banner`], and the next request is Idle again.

mod request;

pub use request::{
    FieldParseError, FormInput, PredictionRequest, ValidationError, LABEL_PERMX, LABEL_PERMY,
    LABEL_PERMZ, LABEL_PORO,
};

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

use crate::model::{PredictionError, PredictiveModel};

/// Static text shown by the About action.
pub const ABOUT_LINES: [&str; 2] = [
    "This app predicts the production of oil, gas, and water based on reservoir characteristics.",
    "Built with Streamlit.",
];

/// Model output for one request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransmissibilityResult {
    pub value: f64,
}

impl TransmissibilityResult {
    /// Value as displayed, two decimal places.
    pub fn display_value(&self) -> String {
        format!("{:.2}", self.value)
    }

    pub fn message(&self) -> String {
        format!("The predicted Transmissibility is: {}", self.display_value())
    }
}

/// Everything that can stop a submission from producing a result.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SubmitError {
    #[error(transparent)]
    Field(#[from] FieldParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Prediction failed: the model returned an unexpected result.")]
    Prediction(#[source] PredictionError),
}

/// What the page shows after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Banner {
    Success(String),
    Error(String),
    Info(Vec<String>),
}

/// Outcome of one HTML form submission.
#[derive(Debug, Clone)]
pub struct FormOutcome {
    /// Parsed request when the fields were numeric, for echoing back.
    pub request: Option<PredictionRequest>,
    pub banner: Banner,
}

/// Validates requests and calls the load-once model.
#[derive(Clone)]
pub struct Predictor {
    model: Arc<dyn PredictiveModel>,
}

impl Predictor {
    pub fn new(model: Arc<dyn PredictiveModel>) -> Self {
        Self { model }
    }

    pub fn model_kind(&self) -> &'static str {
        self.model.kind()
    }

    /// Validate, then predict exactly once.
    pub fn predict(&self, request: &PredictionRequest) -> Result<TransmissibilityResult, SubmitError> {
        let features = request.validate()?;
        let value = self.model.predict(&features).map_err(|e| {
            error!(error = %e, ?features, "Model prediction failed");
            SubmitError::Prediction(e)
        })?;
        debug!(?features, value, "Prediction complete");
        Ok(TransmissibilityResult { value })
    }

    /// Handle one "Predict Transmissibility" action from the HTML form.
    pub fn submit(&self, input: &FormInput) -> FormOutcome {
        let request = match input.parse() {
            Ok(r) => r,
            Err(e) => {
                return FormOutcome {
                    request: None,
                    banner: Banner::Error(e.to_string()),
                }
            }
        };

        let banner = match self.predict(&request) {
            Ok(result) => Banner::Success(result.message()),
            Err(e) => Banner::Error(e.to_string()),
        };
        FormOutcome {
            request: Some(request),
            banner,
        }
    }
}

/// The About banner; independent of any form state.
pub fn about() -> Banner {
    Banner::Info(ABOUT_LINES.iter().map(|s| (*s).to_string()).collect())
}
