use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

/// Environment variables checked (in order) for the Gemini API key.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Generative Language API settings
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Weather pipeline settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Where the dashboard gets its coordinates from
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key. `GEMINI_API_KEY` / `API_KEY` in the environment take precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the Generative Language API
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Model used for the grounded weather report
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Model used for the background image
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_text_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl GeminiConfig {
    /// Check if an API key is present (not empty or a placeholder)
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty() && !k.starts_with("YOUR_"))
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Language every free-text field of the report is written in
    #[serde(default = "default_language")]
    pub language: String,

    /// Aspect ratio hint for the background image
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,

    /// Refresh interval in minutes for watch mode
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u32,

    /// Drop the previous background when a new image cannot be generated
    #[serde(default)]
    pub clear_background_on_failure: bool,
}

fn default_language() -> String {
    "Korean".to_string()
}

fn default_aspect_ratio() -> String {
    "16:9".to_string()
}

fn default_refresh_minutes() -> u32 {
    15
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            aspect_ratio: default_aspect_ratio(),
            refresh_minutes: default_refresh_minutes(),
            clear_background_on_failure: false,
        }
    }
}

impl WeatherConfig {
    /// Watch-mode refresh period, `None` when `refresh_minutes` is 0.
    pub fn refresh_interval(&self) -> Option<Duration> {
        match self.refresh_minutes {
            0 => None,
            m => Some(Duration::from_secs(u64::from(m) * 60)),
        }
    }
}

/// Source of the user's coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationProviderKind {
    /// Look the position up from the public IP address
    #[default]
    Ip,
    /// Use `latitude`/`longitude` from this file
    Fixed,
    /// Behave like a host without geolocation support
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default)]
    pub provider: LocationProviderKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Base URL of the IP geolocation service
    #[serde(default = "default_ip_lookup_url")]
    pub ip_lookup_url: String,
}

fn default_ip_lookup_url() -> String {
    "https://ipapi.co".to_string()
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider: LocationProviderKind::Ip,
            latitude: None,
            longitude: None,
            ip_lookup_url: default_ip_lookup_url(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, writing defaults there when missing.
    ///
    /// Environment overrides are applied after the file is read.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str::<Config>(&contents).context("Failed to parse config file")?
        } else {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default configuration to {}", path.display());
            config
        };

        Ok(config.with_env_overrides())
    }

    /// Load configuration and validate it.
    ///
    /// Warnings are logged and returned; any validation error rejects the
    /// config.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult), ConfigError> {
        let config = match path {
            Some(p) => Self::load_from(p),
            None => Self::load(),
        }
        .map_err(|e| ConfigError::Load(format!("{e:#}")))?;

        let validation = config.validate();
        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Replace the API key with one from the environment, if set.
    pub fn with_env_overrides(mut self) -> Self {
        let from_env = API_KEY_ENV_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()));
        if from_env.is_some() {
            self.gemini.api_key = from_env;
        }
        self
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.gemini.base_url, "gemini.base_url", &mut result);
        self.validate_url(
            &self.location.ip_lookup_url,
            "location.ip_lookup_url",
            &mut result,
        );

        if self.gemini.text_model.trim().is_empty() {
            result.add_error("gemini.text_model", "Model name must not be empty");
        }
        if self.gemini.image_model.trim().is_empty() {
            result.add_error("gemini.image_model", "Model name must not be empty");
        }
        if self.gemini.timeout_secs == 0 {
            result.add_error("gemini.timeout_secs", "Timeout must be greater than 0");
        }

        if !self.gemini.is_configured() {
            result.add_warning(
                "gemini.api_key",
                "Gemini API key not configured - simulated weather will be shown",
            );
        }

        if self.weather.language.trim().is_empty() {
            result.add_error("weather.language", "Language must not be empty");
        }

        if self.weather.refresh_minutes == 0 {
            result.add_warning(
                "weather.refresh_minutes",
                "Automatic refresh disabled (0 minutes); --watch keeps the first report",
            );
        } else if self.weather.refresh_minutes > 1440 {
            result.add_warning(
                "weather.refresh_minutes",
                "Weather refresh interval is more than 24 hours",
            );
        }

        if self.location.provider == LocationProviderKind::Fixed {
            match (self.location.latitude, self.location.longitude) {
                (Some(lat), Some(lon)) => {
                    if !(-90.0..=90.0).contains(&lat) {
                        result.add_error("location.latitude", "Latitude must be within -90..=90");
                    }
                    if !(-180.0..=180.0).contains(&lon) {
                        result.add_error(
                            "location.longitude",
                            "Longitude must be within -180..=180",
                        );
                    }
                }
                _ => result.add_error(
                    "location",
                    "Fixed provider requires both latitude and longitude",
                ),
            }
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if let Some(port) = url.port() {
                    if port == 0 {
                        result.add_error(field_name, "Port cannot be 0");
                    }
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("skyai");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        // Default config should be valid (only warnings, no errors)
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_missing_api_key_is_warning() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "gemini.api_key"));
    }

    #[test]
    fn test_placeholder_api_key_not_configured() {
        let mut config = Config::default();
        config.gemini.api_key = Some("YOUR_GEMINI_KEY".to_string());
        assert!(!config.gemini.is_configured());
        config.gemini.api_key = Some("real-key".to_string());
        assert!(config.gemini.is_configured());
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.gemini.base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "gemini.base_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.location.ip_lookup_url = "ftp://ipapi.co".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_fixed_provider_requires_coordinates() {
        let mut config = Config::default();
        config.location.provider = LocationProviderKind::Fixed;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "location"));

        config.location.latitude = Some(37.5665);
        config.location.longitude = Some(126.9780);
        assert!(config.validate().is_valid());
    }

    #[test]
    fn test_out_of_range_latitude() {
        let mut config = Config::default();
        config.location.provider = LocationProviderKind::Fixed;
        config.location.latitude = Some(91.0);
        config.location.longitude = Some(0.0);
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "location.latitude"));
    }

    #[test]
    fn test_empty_model_name() {
        let mut config = Config::default();
        config.gemini.image_model = "  ".to_string();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "gemini.image_model"));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [weather]
            language = "English"

            [location]
            provider = "fixed"
            latitude = 51.5
            longitude = -0.12
            "#,
        )
        .unwrap();

        assert_eq!(config.weather.language, "English");
        assert_eq!(config.weather.aspect_ratio, "16:9");
        assert_eq!(config.gemini.text_model, "gemini-3-flash-preview");
        assert_eq!(config.location.provider, LocationProviderKind::Fixed);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.weather.refresh_minutes = 5;
        config.weather.clear_background_on_failure = true;
        config.save_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let reloaded: Config = toml::from_str(&contents).unwrap();
        assert_eq!(reloaded.weather.refresh_minutes, 5);
        assert!(reloaded.weather.clear_background_on_failure);
    }

    #[test]
    fn test_load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.weather.refresh_minutes, 15);
    }

    #[test]
    fn test_env_key_overrides_file_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gemini]\napi_key = \"from-file\"\n").unwrap();

        // Only this test touches these variables.
        std::env::set_var("GEMINI_API_KEY", "from-gemini-env");
        std::env::set_var("API_KEY", "from-api-env");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.gemini.api_key.as_deref(), Some("from-gemini-env"));

        std::env::remove_var("GEMINI_API_KEY");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.gemini.api_key.as_deref(), Some("from-api-env"));

        std::env::set_var("API_KEY", "   ");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.gemini.api_key.as_deref(), Some("from-file"));

        std::env::remove_var("API_KEY");
    }

    #[test]
    fn test_load_validated_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[location]\nprovider = \"fixed\"\n").unwrap();

        match Config::load_validated(Some(&path)) {
            Err(ConfigError::Invalid(summary)) => assert!(summary.contains("location")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_load_validated_reports_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather\nlanguage = ").unwrap();

        assert!(matches!(
            Config::load_validated(Some(&path)),
            Err(ConfigError::Load(_))
        ));
    }

    #[test]
    fn test_load_validated_accepts_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let (config, validation) = Config::load_validated(Some(&path)).unwrap();
        assert!(validation.is_valid());
        assert_eq!(config.location.provider, LocationProviderKind::Ip);
    }

    #[test]
    fn test_refresh_interval() {
        let mut weather = WeatherConfig::default();
        assert_eq!(weather.refresh_interval(), Some(Duration::from_secs(15 * 60)));

        weather.refresh_minutes = 0;
        assert_eq!(weather.refresh_interval(), None);

        let mut config = Config::default();
        config.weather.refresh_minutes = 0;
        let result = config.validate();
        assert!(result
            .warnings
            .iter()
            .any(|w| w.field == "weather.refresh_minutes" && w.message.contains("disabled")));
    }
}
