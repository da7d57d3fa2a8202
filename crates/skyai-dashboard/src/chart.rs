//! Temperature trend chart drawn with block characters.

use skyai_weather::ForecastDay;

use crate::format::round_half_up;

/// Rows of plot area, excluding the day labels.
pub const CHART_HEIGHT: usize = 8;
/// Padding added below the coldest and above the warmest day.
pub const DOMAIN_PADDING: f64 = 5.0;
const COLUMN_WIDTH: usize = 6;
const AXIS_WIDTH: usize = 5;

/// Y-axis range `[min - 5, max + 5]`, or `None` for an empty forecast.
pub fn domain(forecast: &[ForecastDay]) -> Option<(f64, f64)> {
    let mut temps = forecast.iter().map(|d| d.temp);
    let first = temps.next()?;
    let (min, max) = temps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
    Some((min - DOMAIN_PADDING, max + DOMAIN_PADDING))
}

/// Filled height of one column, `1..=height`.
fn level(temp: f64, lo: f64, hi: f64, height: usize) -> usize {
    let span = hi - lo;
    if span <= 0.0 {
        return height / 2;
    }
    let scaled = round_half_up((temp - lo) / span * height as f64);
    scaled.clamp(1, height as i64) as usize
}

/// Render the area chart, one string per line.
///
/// Each day is a column: `●` marks the temperature, `░` fills the area
/// below it. The axis shows the rounded domain bounds.
pub fn render(forecast: &[ForecastDay], height: usize) -> Vec<String> {
    if height == 0 {
        return Vec::new();
    }
    let Some((lo, hi)) = domain(forecast) else {
        return Vec::new();
    };
    let levels: Vec<usize> = forecast
        .iter()
        .map(|d| level(d.temp, lo, hi, height))
        .collect();

    let mut lines = Vec::with_capacity(height + 1);
    for row in 0..height {
        let threshold = height - row;
        let axis = if row == 0 {
            format!("{:>3}° ", round_half_up(hi))
        } else if row + 1 == height {
            format!("{:>3}° ", round_half_up(lo))
        } else {
            " ".repeat(AXIS_WIDTH)
        };

        let mut line = axis;
        line.push('│');
        for &filled in &levels {
            let cell = if filled == threshold {
                "●"
            } else if filled > threshold {
                "░"
            } else {
                " "
            };
            line.push_str(&format!("{:^width$}", cell, width = COLUMN_WIDTH));
        }
        lines.push(line.trim_end().to_string());
    }

    let mut labels = " ".repeat(AXIS_WIDTH);
    labels.push(' ');
    for day in forecast {
        labels.push_str(&format!("{:^width$}", day.day, width = COLUMN_WIDTH));
    }
    lines.push(labels.trim_end().to_string());

    lines
}
