//! Pull a validated `WeatherData` out of free-form model text.
//!
//! The model is asked for JSON but answers in prose, so the first
//! brace-delimited span is cut out, parsed, and checked field by field.
//! Any violation is an error; the fetcher turns it into the fallback.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::gemini::GroundingChunk;
use crate::types::{ForecastDay, Source, WeatherData, WeatherError, FORECAST_DAYS};

pub const DEFAULT_SOURCE_TITLE: &str = "날씨 정보 출처";
pub const DEFAULT_SOURCE_URI: &str = "#";

fn json_object_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    // Greedy: first `{` through last `}`.
    PATTERN
        .get_or_init(|| Regex::new(r"\{[\s\S]*\}").ok())
        .as_ref()
}

/// Return the first brace-delimited span of `text`, if any.
pub fn extract_json_object(text: &str) -> Option<&str> {
    json_object_pattern()?.find(text).map(|m| m.as_str())
}

/// Map grounding citations to display sources, filling in defaults.
pub fn sources_from_grounding(chunks: &[GroundingChunk]) -> Vec<Source> {
    chunks
        .iter()
        .map(|chunk| {
            let web = chunk.web.as_ref();
            Source {
                title: web
                    .and_then(|w| w.title.clone())
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| DEFAULT_SOURCE_TITLE.to_string()),
                uri: web
                    .and_then(|w| w.uri.clone())
                    .filter(|u| !u.is_empty())
                    .unwrap_or_else(|| DEFAULT_SOURCE_URI.to_string()),
            }
        })
        .collect()
}

/// Text field that also tolerates a bare number (`"uvIndex": 6`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Text {
    Str(String),
    Num(serde_json::Number),
}

impl From<Text> for String {
    fn from(t: Text) -> Self {
        match t {
            Text::Str(s) => s,
            Text::Num(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeatherPayload {
    location: Text,
    temperature: f64,
    condition: Text,
    high: f64,
    low: f64,
    humidity: f64,
    wind_speed: Text,
    visibility: Text,
    uv_index: Text,
    forecast: Vec<ForecastPayload>,
    ai_analysis: Text,
}

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    day: Text,
    temp: f64,
    condition: Text,
}

/// Extract, parse and validate the report embedded in `text`.
pub fn parse_weather_response(
    text: &str,
    sources: Vec<Source>,
) -> Result<WeatherData, WeatherError> {
    let json = extract_json_object(text).ok_or(WeatherError::NoJson)?;
    let value: serde_json::Value = serde_json::from_str(json)?;
    let payload: WeatherPayload =
        serde_json::from_value(value).map_err(|e| WeatherError::Schema(e.to_string()))?;

    let data = WeatherData {
        location: payload.location.into(),
        temperature: payload.temperature,
        condition: payload.condition.into(),
        high: payload.high,
        low: payload.low,
        humidity: payload.humidity,
        wind_speed: payload.wind_speed.into(),
        visibility: payload.visibility.into(),
        uv_index: payload.uv_index.into(),
        forecast: payload
            .forecast
            .into_iter()
            .map(|f| ForecastDay {
                day: f.day.into(),
                temp: f.temp,
                condition: f.condition.into(),
            })
            .collect(),
        ai_analysis: payload.ai_analysis.into(),
        sources,
    };

    validate(&data)?;
    Ok(data)
}

/// Check the invariants the view relies on.
pub fn validate(data: &WeatherData) -> Result<(), WeatherError> {
    let schema = |msg: String| -> Result<(), WeatherError> { Err(WeatherError::Schema(msg)) };

    if data.forecast.len() != FORECAST_DAYS {
        return schema(format!(
            "forecast must have {} entries, got {}",
            FORECAST_DAYS,
            data.forecast.len()
        ));
    }

    let numbers = [
        ("temperature", data.temperature),
        ("high", data.high),
        ("low", data.low),
        ("humidity", data.humidity),
    ];
    for (field, value) in numbers {
        if !value.is_finite() {
            return schema(format!("{field} is not a finite number"));
        }
    }
    if !(0.0..=100.0).contains(&data.humidity) {
        return schema(format!("humidity {} is outside 0..=100", data.humidity));
    }

    let texts = [
        ("location", &data.location),
        ("condition", &data.condition),
        ("windSpeed", &data.wind_speed),
        ("visibility", &data.visibility),
        ("uvIndex", &data.uv_index),
        ("aiAnalysis", &data.ai_analysis),
    ];
    for (field, value) in texts {
        if value.trim().is_empty() {
            return schema(format!("{field} is empty"));
        }
    }

    for (i, day) in data.forecast.iter().enumerate() {
        if day.day.trim().is_empty() || day.condition.trim().is_empty() {
            return schema(format!("forecast[{i}] has an empty label"));
        }
        if !day.temp.is_finite() {
            return schema(format!("forecast[{i}].temp is not a finite number"));
        }
    }

    Ok(())
}
