//! System-wide default constants.

// ============================================================================
// Server
// ============================================================================

/// HTTP bind address when nothing else is configured.
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";

/// Maximum accepted request body (bytes). Four numeric fields fit easily.
pub const MAX_REQUEST_BODY_BYTES: usize = 16 * 1024;

/// Environment variable with a comma-separated list of allowed CORS origins.
pub const ENV_CORS_ORIGINS: &str = "PREDICTOR_CORS_ORIGINS";

// ============================================================================
// Model
// ============================================================================

/// Model artifact path, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "model.json";

// ============================================================================
// Config discovery
// ============================================================================

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "predictor.toml";
