//! Where the user is.
//!
//! The dashboard only needs a pair of coordinates or a reason why there
//! are none; everything else about positioning lives behind
//! [`LocationProvider`].

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::types::{Coordinates, LocationError};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("SkyAI/", env!("CARGO_PKG_VERSION"));

/// A source of the user's current position.
pub trait LocationProvider: Send + Sync {
    fn locate(&self) -> impl Future<Output = Result<Coordinates, LocationError>> + Send;
}

/// Always reports the configured position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

impl LocationProvider for FixedLocation {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// A host without any geolocation capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl LocationProvider for NoLocation {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unsupported)
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    city: Option<String>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

/// Approximate position from the public IP address (ipapi.co).
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: Client,
    base_url: String,
}

impl IpLocator {
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

impl LocationProvider for IpLocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        let url = format!("{}/json/", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::debug!("IP location request failed: {}", e);
            if e.is_timeout() {
                LocationError::Timeout
            } else {
                LocationError::ServiceUnavailable
            }
        })?;

        if !response.status().is_success() {
            tracing::debug!("IP location returned status {}", response.status());
            return Err(LocationError::ServiceUnavailable);
        }

        let body: IpApiResponse = response.json().await.map_err(|e| {
            tracing::debug!("IP location parse error: {}", e);
            LocationError::Other(e.to_string())
        })?;

        if body.error {
            return Err(LocationError::Other(
                body.reason.unwrap_or_else(|| "lookup refused".to_string()),
            ));
        }

        match (body.latitude, body.longitude) {
            (Some(lat), Some(lon)) => {
                tracing::info!(
                    "Located via IP: {} ({:.4}, {:.4})",
                    body.city.as_deref().unwrap_or("unknown city"),
                    lat,
                    lon
                );
                Ok(Coordinates::new(lat, lon))
            }
            _ => Err(LocationError::ServiceUnavailable),
        }
    }
}

/// Provider selected at startup from configuration.
#[derive(Debug, Clone)]
pub enum SystemLocator {
    Ip(IpLocator),
    Fixed(FixedLocation),
    Unsupported(NoLocation),
}

impl LocationProvider for SystemLocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        match self {
            Self::Ip(p) => p.locate().await,
            Self::Fixed(p) => p.locate().await,
            Self::Unsupported(p) => p.locate().await,
        }
    }
}
