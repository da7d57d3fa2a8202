use serde::{Deserialize, Serialize};

/// Geographic coordinates in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Seoul City Hall, used whenever the real position is unknown.
    pub const SEOUL: Coordinates = Coordinates {
        latitude: 37.5665,
        longitude: 126.9780,
    };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// One entry of the five-day forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub day: String,
    pub temp: f64,
    pub condition: String,
}

/// A web page the model grounded its answer on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

/// Complete, render-ready weather report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    pub location: String,
    pub temperature: f64,
    pub condition: String,
    pub high: f64,
    pub low: f64,
    pub humidity: f64,
    pub wind_speed: String,
    pub visibility: String,
    pub uv_index: String,
    pub forecast: Vec<ForecastDay>,
    pub ai_analysis: String,
    pub sources: Vec<Source>,
}

/// Number of entries every `WeatherData::forecast` carries.
pub const FORECAST_DAYS: usize = 5;

/// Result of asking the host for the user's position.
///
/// Starts out loading and settles exactly once into either coordinates or
/// an error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeolocationState {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub error: Option<String>,
    pub loading: bool,
}

impl GeolocationState {
    pub fn loading() -> Self {
        Self {
            latitude: None,
            longitude: None,
            error: None,
            loading: true,
        }
    }

    pub fn located(coords: Coordinates) -> Self {
        Self {
            latitude: Some(coords.latitude),
            longitude: Some(coords.longitude),
            error: None,
            loading: false,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            latitude: None,
            longitude: None,
            error: Some(message.into()),
            loading: false,
        }
    }

    /// Coordinates, when the lookup succeeded.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}

impl Default for GeolocationState {
    fn default() -> Self {
        Self::loading()
    }
}

/// Location service errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Geolocation is not supported")]
    Unsupported,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Weather pipeline errors.
///
/// These never reach the dashboard: the fetcher and image generator turn
/// every one of them into their fallback value.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("No API key configured")]
    MissingApiKey,
    #[error("Model returned no usable content")]
    EmptyResponse,
    #[error("No JSON object found in model response")]
    NoJson,
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Schema violation: {0}")]
    Schema(String),
}
