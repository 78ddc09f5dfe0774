//! Ordinary linear regression: `intercept + Σ coefficient_i * x_i`.

use serde::{Deserialize, Serialize};

use super::{finite, FeatureVector, PredictionError, PredictiveModel, NUM_FEATURES};

/// Fitted linear regressor over the four reservoir features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub intercept: f64,
    /// One coefficient per feature, in feature-vector order.
    pub coefficients: Vec<f64>,
}

impl LinearRegressor {
    pub fn new(intercept: f64, coefficients: [f64; NUM_FEATURES]) -> Self {
        Self {
            intercept,
            coefficients: coefficients.to_vec(),
        }
    }

    /// Structural problems that make the regressor unusable.
    pub fn check(&self) -> Result<(), String> {
        if self.coefficients.len() != NUM_FEATURES {
            return Err(format!(
                "linear model has {} coefficients, expected {}",
                self.coefficients.len(),
                NUM_FEATURES
            ));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("linear model parameters must be finite".to_string());
        }
        Ok(())
    }
}

impl PredictiveModel for LinearRegressor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let sum = self
            .coefficients
            .iter()
            .zip(features.iter())
            .fold(self.intercept, |acc, (c, x)| c.mul_add(*x, acc));
        finite(sum)
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}
