//! Condition-label classification by ordered keyword rules.

use serde::{Deserialize, Serialize};

/// True if the lowercased `condition` contains any of `keywords`.
pub fn contains_any(condition: &str, keywords: &[&str]) -> bool {
    let c = condition.to_lowercase();
    keywords.iter().any(|k| c.contains(k))
}

/// Visual theme of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Sunny,
    Cloudy,
    Rainy,
    Night,
}

/// First match wins; rain outranks cloud, cloud outranks night.
const THEME_RULES: &[(&[&str], Theme)] = &[
    (&["비", "rain"], Theme::Rainy),
    (&["구름", "흐림", "cloud"], Theme::Cloudy),
    (&["밤", "night"], Theme::Night),
];

impl Theme {
    /// Pick the theme for a condition label. Unrecognised labels are sunny.
    pub fn for_condition(condition: &str) -> Self {
        THEME_RULES
            .iter()
            .find(|(keywords, _)| contains_any(condition, keywords))
            .map(|(_, theme)| *theme)
            .unwrap_or_default()
    }

    /// Stylesheet identifier
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Sunny => "weather-gradient-sunny",
            Self::Cloudy => "weather-gradient-cloudy",
            Self::Rainy => "weather-gradient-rainy",
            Self::Night => "weather-gradient-night",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::Cloudy => "Cloudy",
            Self::Rainy => "Rainy",
            Self::Night => "Night",
        }
    }
}

/// Theme for an optional condition; no data yet means the default theme.
pub fn select_theme(condition: Option<&str>) -> Theme {
    condition.map(Theme::for_condition).unwrap_or_default()
}
