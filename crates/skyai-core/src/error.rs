//! Startup errors for the SkyAI binary.
//!
//! The weather pipeline never fails outright (it falls back to simulated
//! data), so only loading the config and building HTTP clients can stop
//! the program.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Short message for the terminal; the full error goes to the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::HttpClient(_) => "Could not set up networking (TLS backend unavailable?).",
            AppError::Config(e) => e.user_message(),
            AppError::Other(_) => "Something went wrong. Run with RUST_LOG=debug for details.",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read or is not valid TOML.
    #[error("Failed to load configuration: {0}")]
    Load(String),

    /// Parsed, but `Config::validate` reported errors.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Load(_) => "config.toml could not be read. Fix or delete it to regenerate.",
            ConfigError::Invalid(_) => "config.toml has invalid values. See the log for which ones.",
            ConfigError::MissingSetting(_) => "A required setting is missing from config.toml.",
        }
    }
}
