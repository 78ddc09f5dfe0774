//! Model artifact: the serialized form of a trained regressor.
//!
//! An artifact is a JSON document carrying a format version, the ordered
//! feature names the model was trained on, and a `kind`-tagged model body.
//! Loading happens once at startup; any failure here is fatal to the process.

use serde::{Deserialize, Serialize};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use super::{ForestRegressor, LinearRegressor, PredictiveModel, RegressionTree, FEATURE_NAMES};

/// Artifact format version this build reads and writes.
pub const FORMAT_VERSION: u32 = 1;

/// Why a model artifact could not be turned into a usable model.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("model artifact not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("model artifact I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] io::Error),

    #[error("model artifact is empty or truncated: {0}")]
    Truncated(String),

    #[error("model artifact is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("unsupported model format version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("model features {found:?} do not match expected {expected:?}")]
    FeatureMismatch {
        found: Vec<String>,
        expected: Vec<String>,
    },

    #[error("invalid model: {0}")]
    InvalidModel(String),
}

/// Model body, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelKind {
    Linear(LinearRegressor),
    Tree(RegressionTree),
    Forest(ForestRegressor),
}

impl ModelKind {
    fn check(&self) -> Result<(), String> {
        match self {
            Self::Linear(m) => m.check(),
            Self::Tree(m) => m.check(),
            Self::Forest(m) => m.check(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear(m) => m.kind(),
            Self::Tree(m) => m.kind(),
            Self::Forest(m) => m.kind(),
        }
    }
}

/// Provenance attached by the training step. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    /// Feature names in the order the model expects them.
    pub features: Vec<String>,
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default)]
    pub metadata: ArtifactMetadata,
    pub model: ModelKind,
}

fn default_target() -> String {
    "TRANSMISSIBILITY".to_string()
}

/// Serializable description of a loaded model for logs and the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub kind: &'static str,
    pub format_version: u32,
    pub features: Vec<String>,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ModelArtifact {
    /// Wrap a model body in a current-version artifact with the standard features.
    pub fn new(model: ModelKind) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            features: FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect(),
            target: default_target(),
            metadata: ArtifactMetadata::default(),
            model,
        }
    }

    /// Parse and validate an artifact from a byte stream.
    pub fn from_reader<R: Read>(mut source: R) -> Result<Self, ModelLoadError> {
        let mut bytes = Vec::new();
        source
            .read_to_end(&mut bytes)
            .map_err(|e| ModelLoadError::Io(PathBuf::from("<stream>"), e))?;
        Self::from_slice(&bytes)
    }

    /// Parse and validate an artifact from bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelLoadError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ModelLoadError::Truncated("no data".to_string()));
        }
        let artifact: Self = serde_json::from_slice(bytes).map_err(|e| {
            if e.is_eof() {
                ModelLoadError::Truncated(e.to_string())
            } else {
                ModelLoadError::Corrupt(e)
            }
        })?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Check version, feature order and model structure.
    pub fn validate(&self) -> Result<(), ModelLoadError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ModelLoadError::UnsupportedVersion {
                found: self.format_version,
                supported: FORMAT_VERSION,
            });
        }
        if !self.features.iter().map(String::as_str).eq(FEATURE_NAMES) {
            return Err(ModelLoadError::FeatureMismatch {
                found: self.features.clone(),
                expected: FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect(),
            });
        }
        self.model.check().map_err(ModelLoadError::InvalidModel)
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            kind: self.model.name(),
            format_version: self.format_version,
            features: self.features.clone(),
            target: self.target.clone(),
            description: self.metadata.description.clone(),
        }
    }

    /// Consume the artifact into a shareable model.
    pub fn into_model(self) -> Arc<dyn PredictiveModel> {
        match self.model {
            ModelKind::Linear(m) => Arc::new(m),
            ModelKind::Tree(m) => Arc::new(m),
            ModelKind::Forest(m) => Arc::new(m),
        }
    }
}

/// Load a model from a byte stream.
pub fn load<R: Read>(source: R) -> Result<Arc<dyn PredictiveModel>, ModelLoadError> {
    ModelArtifact::from_reader(source).map(ModelArtifact::into_model)
}

/// Read and validate an artifact file.
pub fn read_artifact(path: &Path) -> Result<ModelArtifact, ModelLoadError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ModelLoadError::Missing(path.to_path_buf()),
        _ => ModelLoadError::Io(path.to_path_buf(), e),
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "Read model artifact");
    let artifact = ModelArtifact::from_slice(&bytes)?;
    info!(
        path = %path.display(),
        kind = artifact.model.name(),
        version = artifact.format_version,
        "Model artifact loaded"
    );
    Ok(artifact)
}

/// Load a model from an artifact file.
pub fn load_from_disk(path: &Path) -> Result<Arc<dyn PredictiveModel>, ModelLoadError> {
    read_artifact(path).map(ModelArtifact::into_model)
}

/// Save an artifact to disk atomically (write temp file, then rename).
pub fn save_to_disk(artifact: &ModelArtifact, path: &Path) -> io::Result<()> {
    let json = serde_json::to_vec_pretty(artifact)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let tmp_path = path.with_extension("json.tmp");
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&tmp_path, &json)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}
