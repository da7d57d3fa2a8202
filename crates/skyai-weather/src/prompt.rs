//! Prompt text sent to the text and image models.

use crate::types::Coordinates;

/// Prompt asking for a grounded, structured weather report at `coords`.
///
/// All descriptive text fields must come back in `language`.
pub fn weather_prompt(coords: Coordinates, language: &str) -> String {
    format!(
        "Provide current real-time weather and a 5-day forecast for the location at \
Latitude: {lat}, Longitude: {lng}.
**CRITICAL: All descriptive text fields (location, condition, aiAnalysis) MUST be in {language}.**
Format your response as a JSON object with these exact keys:
- location (city/neighborhood in {language})
- temperature (number, C)
- condition (Short string in {language}, e.g., {examples})
- high (number)
- low (number)
- humidity (number)
- windSpeed (string)
- visibility (string)
- uvIndex (string)
- forecast (array of exactly 5 {{day: string in {language}, temp: number, condition: string in {language}}})
- aiAnalysis (A sensory, emotional advice about the weather mood in {language}, 2 sentences).

Use Google Search to ensure the data is accurate for today.",
        lat = coords.latitude,
        lng = coords.longitude,
        language = language,
        examples = condition_examples(language),
    )
}

/// Sample condition labels. Korean ones are the words the theme and icon
/// rules match on.
fn condition_examples(language: &str) -> &'static str {
    if language.trim().eq_ignore_ascii_case("korean") {
        "\"맑음\", \"흐림\", \"비\""
    } else {
        "\"Clear\", \"Cloudy\", \"Rain\" translated"
    }
}

/// Prompt for an abstract background illustrating `condition`.
pub fn image_prompt(condition: &str) -> String {
    format!(
        "A soft, blurred, artistic minimalist landscape representing {condition} weather, \
top-down view or wide angle, abstract, high quality, no text."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_prompt_mentions_coordinates_and_language() {
        let prompt = weather_prompt(Coordinates::SEOUL, "Korean");
        assert!(prompt.contains("Latitude: 37.5665"));
        assert!(prompt.contains("Longitude: 126.978"));
        assert!(prompt.contains("MUST be in Korean"));
        assert!(prompt.contains("Google Search"));
    }

    #[test]
    fn test_weather_prompt_lists_every_key() {
        let prompt = weather_prompt(Coordinates::new(0.0, 0.0), "English");
        for key in [
            "location", "temperature", "condition", "high", "low", "humidity", "windSpeed",
            "visibility", "uvIndex", "forecast", "aiAnalysis",
        ] {
            assert!(prompt.contains(key), "missing key {key}");
        }
        assert!(prompt.contains("{day: string in English"));
    }

    #[test]
    fn test_korean_prompt_uses_rule_keywords() {
        let prompt = weather_prompt(Coordinates::SEOUL, "Korean");
        assert!(prompt.contains(r#"condition (Short string in Korean, e.g., "맑음", "흐림", "비")"#));
        assert!(!prompt.contains("translated"));

        let prompt = weather_prompt(Coordinates::SEOUL, "English");
        assert!(prompt.contains(r#"e.g., "Clear", "Cloudy", "Rain" translated"#));
    }

    #[test]
    fn test_image_prompt() {
        let prompt = image_prompt("비");
        assert!(prompt.starts_with("A soft, blurred"));
        assert!(prompt.contains("representing 비 weather"));
        assert!(prompt.ends_with("no text."));
    }
}
