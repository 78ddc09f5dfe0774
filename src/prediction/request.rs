//! Prediction request: parsing raw form input and enforcing domain constraints.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::FeatureVector;

pub const LABEL_PERMX: &str = "Permeability in X direction (PERMX)";
pub const LABEL_PERMY: &str = "Permeability in Y direction (PERMY)";
pub const LABEL_PERMZ: &str = "Permeability in Z direction (PERMZ)";
pub const LABEL_PORO: &str = "Porosity (PORO)";

/// Domain constraint violations, checked permeability first.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Permeability values must be greater than 0.")]
    InvalidPermeability,

    #[error("Porosity must be between 0 and 1.")]
    InvalidPorosity,
}

impl ValidationError {
    /// Stable machine-readable code for the JSON API.
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidPermeability => "INVALID_PERMEABILITY",
            Self::InvalidPorosity => "INVALID_POROSITY",
        }
    }
}

/// Reservoir parameters for one prediction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub permeability_x: f64,
    pub permeability_y: f64,
    pub permeability_z: f64,
    pub porosity: f64,
}

impl PredictionRequest {
    pub fn new(permeability_x: f64, permeability_y: f64, permeability_z: f64, porosity: f64) -> Self {
        Self {
            permeability_x,
            permeability_y,
            permeability_z,
            porosity,
        }
    }

    /// Check the request and produce the model's feature vector.
    ///
    /// Permeability is checked before porosity so the reported error is
    /// deterministic when both are out of range. NaN fails both checks.
    pub fn validate(&self) -> Result<FeatureVector, ValidationError> {
        let permeabilities = [self.permeability_x, self.permeability_y, self.permeability_z];
        if permeabilities.iter().any(|&k| !(k > 0.0)) {
            return Err(ValidationError::InvalidPermeability);
        }
        if !(self.porosity > 0.0 && self.porosity <= 1.0) {
            return Err(ValidationError::InvalidPorosity);
        }
        Ok([
            self.permeability_x,
            self.permeability_y,
            self.permeability_z,
            self.porosity,
        ])
    }
}

/// A form field that could not be read as a number.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{label} must be a number.")]
pub struct FieldParseError {
    pub label: &'static str,
}

/// Raw text fields as posted by the HTML form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub permx: String,
    #[serde(default)]
    pub permy: String,
    #[serde(default)]
    pub permz: String,
    #[serde(default)]
    pub poro: String,
}

impl FormInput {
    /// Parse every field; a blank field takes the widget default of 0.0.
    pub fn parse(&self) -> Result<PredictionRequest, FieldParseError> {
        Ok(PredictionRequest {
            permeability_x: parse_field(&self.permx, LABEL_PERMX)?,
            permeability_y: parse_field(&self.permy, LABEL_PERMY)?,
            permeability_z: parse_field(&self.permz, LABEL_PERMZ)?,
            porosity: parse_field(&self.poro, LABEL_PORO)?,
        })
    }
}

fn parse_field(raw: &str, label: &'static str) -> Result<f64, FieldParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FieldParseError { label }),
    }
}
