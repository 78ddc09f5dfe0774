//! Transmissibility Predictor
//!
//! Serves the reservoir prediction form backed by a pre-trained model.
//!
//! # Usage
//!
//! ```bash
//! # Serve ./model.json on 0.0.0.0:8080
//! cargo run --release
//!
//! # Explicit model and address
//! ./transmissibility-predictor --model models/forest.json --addr 127.0.0.1:3000
//!
//! # Validate a model artifact and exit (flags work on either side)
//! ./transmissibility-predictor check-model --model models/forest.json
//! ```
//!
//! # Environment Variables
//!
//! - `PREDICTOR_CONFIG`: Path to TOML config (default: `./predictor.toml` if present)
//! - `PREDICTOR_SERVER_ADDR`: Bind address override
//! - `PREDICTOR_MODEL_PATH`: Model artifact override
//! - `PREDICTOR_CORS_ORIGINS`: Comma-separated allowed CORS origins
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::info;

use transmissibility_predictor::api::{create_app, AppState};
use transmissibility_predictor::config::AppConfig;
use transmissibility_predictor::model;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "transmissibility-predictor")]
#[command(about = "Reservoir transmissibility prediction form")]
#[command(version)]
struct CliArgs {
    /// Path to a TOML config file
    #[arg(long, global = true, env = "PREDICTOR_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the server address (default: "0.0.0.0:8080")
    #[arg(short, long, global = true, env = "PREDICTOR_SERVER_ADDR", value_name = "HOST:PORT")]
    addr: Option<String>,

    /// Override the model artifact path (default: "model.json")
    #[arg(short, long, global = true, env = "PREDICTOR_MODEL_PATH", value_name = "PATH")]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Load and validate the model artifact, print its summary, and exit
    CheckModel,
}

// ============================================================================
// Startup
// ============================================================================

/// Load the model artifact or fail startup.
fn load_state(model_path: &Path) -> Result<AppState> {
    let artifact = model::artifact::read_artifact(model_path)
        .with_context(|| format!("Failed to load model from {}", model_path.display()))?;
    let summary = artifact.summary();
    info!(
        kind = summary.kind,
        target = %summary.target,
        features = ?summary.features,
        "✓ Model ready"
    );
    Ok(AppState::new(artifact.into_model(), summary))
}

fn check_model(model_path: &Path) -> Result<()> {
    let artifact = model::artifact::read_artifact(model_path)
        .with_context(|| format!("Model check failed for {}", model_path.display()))?;
    let summary = serde_json::to_string_pretty(&artifact.summary())
        .context("Failed to serialize model summary")?;
    println!("{summary}");
    Ok(())
}

async fn serve(config: &AppConfig, state: AppState, cancel_token: CancellationToken) -> Result<()> {
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.server.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server.addr))?;
    info!("🌐 Prediction form available at: http://{}", config.server.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
            info!("[HttpServer] Received shutdown signal");
        })
        .await
        .context("HTTP server error")?;

    info!("[HttpServer] Graceful shutdown complete");
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let mut config =
        AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    config.apply_overrides(args.addr, args.model);
    config.validate().context("Invalid configuration")?;

    if let Some(SubCommand::CheckModel) = args.command {
        return check_model(&config.model.path);
    }

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  Transmissibility Predictor");
    info!("  Reservoir Simulations Model App");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Without a model nothing can be served.
    let state = load_state(&config.model.path)?;

    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("🛑 Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    serve(&config, state, cancel_token).await?;

    info!("✓ Transmissibility Predictor shutdown complete");
    Ok(())
}
