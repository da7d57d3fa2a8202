use serde::Serialize;
use skyai_weather::{select_theme, GeolocationState, Theme, WeatherData};

/// Everything the view needs, captured at one instant.
///
/// Snapshots are immutable; the dashboard publishes a new one for every
/// change instead of editing fields in place.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardSnapshot {
    pub geo: GeolocationState,
    pub weather: Option<WeatherData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    pub refreshing: bool,
}

impl DashboardSnapshot {
    pub fn theme(&self) -> Theme {
        select_theme(self.weather.as_ref().map(|w| w.condition.as_str()))
    }

    /// True before the first report has arrived.
    pub fn is_loading(&self) -> bool {
        self.weather.is_none() && (self.geo.loading || self.refreshing)
    }
}
