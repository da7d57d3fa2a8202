pub mod config;
pub mod error;
pub mod op_state;

pub use config::{
    Config, GeminiConfig, LocationConfig, LocationProviderKind, ValidationResult, WeatherConfig,
};
pub use error::{AppError, ConfigError};
pub use op_state::OpState;

use anyhow::Result;

/// Initialize logging for the application.
///
/// Logs go to stderr so the rendered dashboard owns stdout.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("SkyAI core initialized");
    Ok(())
}
