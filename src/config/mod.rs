//! Application Configuration Module
//!
//! ## Loading Order
//!
//! 1. `--config` CLI flag or `PREDICTOR_CONFIG` environment variable
//! 2. `predictor.toml` in the current working directory
//! 3. Built-in defaults
//!
//! `PREDICTOR_SERVER_ADDR` / `PREDICTOR_MODEL_PATH` (or `--addr` / `--model`)
//! are applied on top with [`AppConfig::apply_overrides`].

mod app_config;
pub mod defaults;
pub mod validation;

pub use app_config::*;
