//! Transmissibility Predictor
//!
//! Single-page reservoir form: four parameters in (PERMX, PERMY, PERMZ, PORO),
//! validated, passed to a pre-trained regression model, one transmissibility
//! value out.
//!
//! ## Architecture
//!
//! - **Model**: `PredictiveModel` capability plus the artifact loader
//! - **Prediction**: input parsing, validation, single-call prediction
//! - **API**: HTML form and JSON endpoints over Axum
//! - **Config**: TOML config with env / CLI overrides

pub mod api;
pub mod config;
pub mod model;
pub mod prediction;

pub use config::AppConfig;

pub use model::{
    FeatureVector, ModelArtifact, ModelLoadError, PredictionError, PredictiveModel, FEATURE_NAMES,
};

pub use prediction::{
    Banner, PredictionRequest, Predictor, SubmitError, TransmissibilityResult, ValidationError,
};
