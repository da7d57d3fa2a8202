//! Static fallback report shown whenever live data cannot be obtained.

use crate::types::{ForecastDay, Source, WeatherData};

pub const MOCK_LOCATION: &str = "서울특별시";
/// Suffix marking a report as simulated rather than live.
pub const SIMULATED_SUFFIX: &str = " (시뮬레이션)";

fn day(day: &str, temp: f64, condition: &str) -> ForecastDay {
    ForecastDay {
        day: day.to_string(),
        temp,
        condition: condition.to_string(),
    }
}

/// The fixed mock dataset.
pub fn mock_weather_data() -> WeatherData {
    WeatherData {
        location: MOCK_LOCATION.to_string(),
        temperature: 22.0,
        condition: "맑음".to_string(),
        high: 25.0,
        low: 18.0,
        humidity: 45.0,
        wind_speed: "12 km/h".to_string(),
        visibility: "15 km".to_string(),
        uv_index: "6".to_string(),
        forecast: vec![
            day("월", 23.0, "맑음"),
            day("화", 21.0, "흐림"),
            day("수", 19.0, "비"),
            day("목", 22.0, "구름 조금"),
            day("금", 24.0, "맑음"),
        ],
        ai_analysis: "공원을 산책하기에 완벽한 날씨입니다. 온화한 기온과 맑은 하늘에 어울리는 \
가벼운 가디건과 좋아하는 음악을 챙겨보세요. 상쾌한 공기를 즐겨보시길 바랍니다!"
            .to_string(),
        sources: vec![Source {
            title: "SkyAI 시뮬레이션".to_string(),
            uri: "#".to_string(),
        }],
    }
}

/// The mock dataset, labelled as simulated. Returned by the fetcher on failure.
pub fn simulated_weather_data() -> WeatherData {
    WeatherData {
        location: format!("{MOCK_LOCATION}{SIMULATED_SUFFIX}"),
        ..mock_weather_data()
    }
}

/// True if `data` came from the fallback path.
pub fn is_simulated(data: &WeatherData) -> bool {
    data.location.ends_with(SIMULATED_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::validate;

    #[test]
    fn test_mock_satisfies_invariants() {
        assert!(validate(&mock_weather_data()).is_ok());
        assert!(validate(&simulated_weather_data()).is_ok());
    }

    #[test]
    fn test_simulated_location_suffix() {
        let data = simulated_weather_data();
        assert_eq!(data.location, "서울특별시 (시뮬레이션)");
        assert!(is_simulated(&data));
        assert!(!is_simulated(&mock_weather_data()));
    }
}
