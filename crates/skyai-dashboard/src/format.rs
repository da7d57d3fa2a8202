use chrono::NaiveDate;

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// `22.4` -> `"22°"`
pub fn format_temperature(value: f64) -> String {
    format!("{}°", round_half_up(value))
}

/// Long date as shown under the location, e.g. `"Monday, October 19"`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}
