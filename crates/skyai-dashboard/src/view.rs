//! Text rendering of a dashboard snapshot.
//!
//! Pure functions of their input; nothing here touches the network or the
//! dashboard's locks.

use std::fmt::Write as _;

use chrono::NaiveDate;
use skyai_weather::WeatherData;

use crate::chart;
use crate::format::{format_date, format_temperature};
use crate::icons::WeatherIcon;
use crate::state::DashboardSnapshot;

pub const LOADING_MESSAGE: &str = "하늘 정보를 찾는 중...";
const RULE: &str = "────────────────────────────────────────";

/// Render the whole dashboard as it would look on `today`.
pub fn render(snapshot: &DashboardSnapshot, today: NaiveDate) -> String {
    let mut out = String::new();
    render_header(&mut out, snapshot);

    if let Some(error) = &snapshot.geo.error {
        let _ = writeln!(out, "⚠ 위치를 확인할 수 없어 서울 기준으로 표시합니다 ({error})");
    }

    match &snapshot.weather {
        Some(weather) => {
            render_hero(&mut out, weather, today);
            render_tiles(&mut out, weather);
            render_forecast(&mut out, weather);
            render_chart(&mut out, weather);
            render_sources(&mut out, weather);
        }
        None if snapshot.is_loading() => {
            let _ = writeln!(out, "\n  {LOADING_MESSAGE}");
        }
        None => {}
    }

    render_background(&mut out, snapshot);
    out
}

fn render_header(out: &mut String, snapshot: &DashboardSnapshot) {
    let theme = snapshot.theme();
    let refresh = if snapshot.refreshing {
        "↻ 새로고침 중..."
    } else {
        "↻ 새로고침"
    };
    let _ = writeln!(
        out,
        "[S] SkyAI  ·  {}  ({})   {}",
        theme.description(),
        theme.css_class(),
        refresh
    );
    let _ = writeln!(out, "{RULE}");
}

fn render_hero(out: &mut String, weather: &WeatherData, today: NaiveDate) {
    let icon = WeatherIcon::for_condition(&weather.condition);
    let _ = writeln!(out, "📍 {}", weather.location);
    let _ = writeln!(out, "{}", format_date(today));
    let _ = writeln!(
        out,
        "\n  {}  {}  {}",
        icon.glyph(),
        format_temperature(weather.temperature),
        weather.condition
    );
    let _ = writeln!(out, "  최고: {}° 최저: {}°", weather.high, weather.low);
    let _ = writeln!(out, "\n  ✦ \"{}\"", weather.ai_analysis);
    let _ = writeln!(out, "{RULE}");
}

fn render_tiles(out: &mut String, weather: &WeatherData) {
    let humidity = format!("{}%", weather.humidity);
    let tiles = [
        ("습도", humidity.as_str()),
        ("풍속", weather.wind_speed.as_str()),
        ("가시거리", weather.visibility.as_str()),
        ("자외선", weather.uv_index.as_str()),
    ];
    for (label, value) in tiles {
        let _ = writeln!(out, "  {label}: {value}");
    }
    let _ = writeln!(out, "{RULE}");
}

fn render_forecast(out: &mut String, weather: &WeatherData) {
    let _ = writeln!(out, "5일간의 예보");
    for day in &weather.forecast {
        let icon = WeatherIcon::for_condition(&day.condition);
        let _ = writeln!(
            out,
            "  {}  {} {:<12} {:>4}",
            day.day,
            icon.glyph(),
            day.condition,
            format_temperature(day.temp)
        );
    }
    let _ = writeln!(out, "{RULE}");
}

fn render_chart(out: &mut String, weather: &WeatherData) {
    let _ = writeln!(out, "기온 추이");
    for line in chart::render(&weather.forecast, chart::CHART_HEIGHT) {
        let _ = writeln!(out, "{line}");
    }
}

fn render_sources(out: &mut String, weather: &WeatherData) {
    if weather.sources.is_empty() {
        return;
    }
    let _ = writeln!(out, "{RULE}");
    for source in &weather.sources {
        let _ = writeln!(out, "출처: {} <{}>", source.title, source.uri);
    }
}

fn render_background(out: &mut String, snapshot: &DashboardSnapshot) {
    let Some(uri) = &snapshot.background else {
        return;
    };
    let mime = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .unwrap_or("image");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "🖼 배경 이미지: {} ({} bytes)", mime, uri.len());
}
