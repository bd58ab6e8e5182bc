use chrono::{DateTime, NaiveDate, Utc};

#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y").to_string()
}

#[must_use]
pub fn format_day(value: NaiveDate) -> String {
    value.format("%b %-d").to_string()
}

#[must_use]
pub fn format_optional_date(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "—".to_string(), format_date)
}

/// Render a 0..=1 ratio or a 0..=100 score as a whole percentage.
#[must_use]
pub fn format_percent(value: f64) -> String {
    let percent = if value <= 1.0 { value * 100.0 } else { value };
    format!("{:.0}%", percent.clamp(0.0, 100.0))
}
