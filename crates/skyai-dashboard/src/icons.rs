//! Weather icon selection for condition labels.

use skyai_weather::theme::contains_any;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Sun,
    CloudRain,
    Cloud,
    Snowflake,
    Zap,
    CloudSun,
}

/// Checked in order; the first rule that matches wins.
const ICON_RULES: &[(&[&str], WeatherIcon)] = &[
    (&["맑음", "sun", "clear"], WeatherIcon::Sun),
    (&["비", "rain"], WeatherIcon::CloudRain),
    (&["구름", "흐림", "cloud"], WeatherIcon::Cloud),
    (&["눈", "snow"], WeatherIcon::Snowflake),
    (&["폭풍", "번개", "storm"], WeatherIcon::Zap),
];

impl WeatherIcon {
    pub fn for_condition(condition: &str) -> Self {
        ICON_RULES
            .iter()
            .find(|(keywords, _)| contains_any(condition, keywords))
            .map(|(_, icon)| *icon)
            .unwrap_or(WeatherIcon::CloudSun)
    }

    pub fn glyph(self) -> &'static str {
        match self {
            WeatherIcon::Sun => "☀",
            WeatherIcon::CloudRain => "🌧",
            WeatherIcon::Cloud => "☁",
            WeatherIcon::Snowflake => "❄",
            WeatherIcon::Zap => "⚡",
            WeatherIcon::CloudSun => "⛅",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_rules() {
        assert_eq!(WeatherIcon::for_condition("맑음"), WeatherIcon::Sun);
        assert_eq!(WeatherIcon::for_condition("Clear sky"), WeatherIcon::Sun);
        assert_eq!(WeatherIcon::for_condition("소나기 비"), WeatherIcon::CloudRain);
        assert_eq!(WeatherIcon::for_condition("구름 많음"), WeatherIcon::Cloud);
        assert_eq!(WeatherIcon::for_condition("흐림"), WeatherIcon::Cloud);
        assert_eq!(WeatherIcon::for_condition("Snow"), WeatherIcon::Snowflake);
        assert_eq!(WeatherIcon::for_condition("뇌우와 번개"), WeatherIcon::Zap);
        assert_eq!(WeatherIcon::for_condition("안개"), WeatherIcon::CloudSun);
    }

    #[test]
    fn test_first_match_wins() {
        // "sunny with rain" hits the sun rule before the rain rule
        assert_eq!(
            WeatherIcon::for_condition("Sunny with rain later"),
            WeatherIcon::Sun
        );
        assert_eq!(WeatherIcon::for_condition("Rain and snow"), WeatherIcon::CloudRain);
    }

    #[test]
    fn test_glyphs_are_distinct() {
        let icons = [
            WeatherIcon::Sun,
            WeatherIcon::CloudRain,
            WeatherIcon::Cloud,
            WeatherIcon::Snowflake,
            WeatherIcon::Zap,
            WeatherIcon::CloudSun,
        ];
        let mut glyphs: Vec<_> = icons.iter().map(|i| i.glyph()).collect();
        glyphs.sort();
        glyphs.dedup();
        assert_eq!(glyphs.len(), icons.len());
    }
}
