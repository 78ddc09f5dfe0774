//! Predictive model capability and the regressors the artifact format carries.
//!
//! The rest of the application only sees [`PredictiveModel`]: one fixed-order
//! feature vector in, one transmissibility value out. Concrete regressors live
//! in [`linear`] and [`tree`]; [`artifact`] turns a serialized model into a
//! shared trait object once at startup.

pub mod artifact;
pub mod linear;
pub mod tree;

pub use artifact::{
    load, load_from_disk, read_artifact, save_to_disk, ModelArtifact, ModelKind, ModelLoadError,
    ModelSummary,
};
pub use linear::LinearRegressor;
pub use tree::{ForestRegressor, RegressionTree, TreeNode};

use thiserror::Error;

/// Number of input features every model consumes.
pub const NUM_FEATURES: usize = 4;

/// Feature names in vector order.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = ["PERMX", "PERMY", "PERMZ", "PORO"];

/// Fixed-order model input: `[PERMX, PERMY, PERMZ, PORO]`.
pub type FeatureVector = [f64; NUM_FEATURES];

/// Failure of a single `predict` call.
///
/// Well-formed feature vectors are not expected to fail; a variant here means
/// the loaded model misbehaved.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictionError {
    #[error("model produced a non-finite prediction ({0})")]
    NonFinite(f64),
}

/// A trained single-output regression model.
///
/// Implementations are immutable after loading, so one instance can be shared
/// across request handlers without locking.
pub trait PredictiveModel: Send + Sync + std::fmt::Debug {
    /// Predict the transmissibility for one feature vector.
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError>;

    /// Short human-readable model family name (e.g. `"linear"`).
    fn kind(&self) -> &'static str;
}

/// Reject NaN / infinite model output.
pub(crate) fn finite(value: f64) -> Result<f64, PredictionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PredictionError::NonFinite(value))
    }
}
