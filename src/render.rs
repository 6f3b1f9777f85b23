//! Plain-text console rendering of a forecast bundle
//!
//! Consumes the extraction output; absent fields render as `--` so a drifted
//! page still produces a readable report.

use crate::models::{ForecastBundle, Place, Segment, TodayForecast};
use std::fmt::Write;

fn opt_str(value: Option<&str>) -> &str {
    value.unwrap_or("--")
}

fn opt_temp(value: Option<i32>) -> String {
    value.map_or_else(|| "--".to_string(), |t| format!("{t}°F"))
}

/// Render a complete forecast report for one place.
#[must_use]
pub fn render_forecast(place: &Place, bundle: &ForecastBundle) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Weather for {}", place.display_name);
    let _ = writeln!(out, "{}", "=".repeat(12 + place.display_name.len()));
    out.push_str(&render_today(&bundle.today));

    if !bundle.outlook.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Outlook:");
        for day in &bundle.outlook {
            let _ = writeln!(
                out,
                "  {:<8} {} / {}  {}  rain {}",
                opt_str(day.date_label.as_deref()),
                opt_temp(day.temp_high_f),
                opt_temp(day.temp_low_f),
                opt_str(day.condition.as_deref()),
                opt_str(day.chance_of_rain_percent.as_deref()),
            );
        }
    }
    out
}

fn render_today(today: &TodayForecast) -> String {
    let mut out = String::new();
    let current = &today.current;

    let _ = writeln!(
        out,
        "Now: {} ({}), feels like {}",
        opt_temp(current.temperature_f),
        opt_str(current.condition.as_deref()),
        opt_temp(current.felt_temperature_f),
    );
    if let Some(time_label) = &current.time_label {
        let _ = writeln!(out, "  {time_label}");
    }
    let _ = writeln!(
        out,
        "  humidity {}  UV {}  wind {}",
        opt_str(current.humidity_percent.as_deref()),
        opt_str(current.uv_index.as_deref()),
        opt_str(current.wind_description.as_deref()),
    );
    let _ = writeln!(
        out,
        "High {} / Low {}",
        opt_temp(today.temp_high_f),
        opt_temp(today.temp_low_f),
    );

    let _ = writeln!(out);
    for segment in Segment::ALL {
        let forecast = today.segment(segment);
        let marker = if forecast.is_active { "*" } else { " " };
        let _ = writeln!(
            out,
            "{marker} {:<10} {}  {}  rain {}",
            segment.to_string(),
            opt_temp(forecast.temperature_f),
            opt_str(forecast.condition.as_deref()),
            opt_str(forecast.chance_of_rain_percent.as_deref()),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DaySegmentForecast, OutlookDay};

    fn sample_bundle() -> ForecastBundle {
        let mut today = TodayForecast {
            temp_high_f: Some(81),
            temp_low_f: Some(64),
            ..TodayForecast::default()
        };
        today.current.temperature_f = Some(75);
        today.current.condition = Some("Partly Cloudy".to_string());
        today.segments[Segment::Afternoon.index()] = DaySegmentForecast {
            temperature_f: Some(81),
            condition: Some("Sunny".to_string()),
            chance_of_rain_percent: Some("5%".to_string()),
            is_active: true,
        };
        today.active_segment = Some(Segment::Afternoon);

        ForecastBundle::new(
            today,
            vec![OutlookDay {
                date_label: Some("Sun 24".to_string()),
                condition: Some("Rain".to_string()),
                chance_of_rain_percent: Some("80%".to_string()),
                temp_high_f: Some(72),
                temp_low_f: Some(60),
            }],
        )
    }

    #[test]
    fn test_render_includes_all_sections() {
        let place = Place::new("p1", "Gary, Indiana, United States");
        let report = render_forecast(&place, &sample_bundle());
        assert!(report.contains("Weather for Gary, Indiana, United States"));
        assert!(report.contains("High 81°F / Low 64°F"));
        assert!(report.contains("* afternoon"));
        assert!(report.contains("Sun 24"));
        assert!(report.contains("80%"));
    }

    #[test]
    fn test_render_degrades_to_placeholders() {
        let place = Place::new("p1", "Nowhere");
        let bundle = ForecastBundle::new(TodayForecast::default(), Vec::new());
        let report = render_forecast(&place, &bundle);
        assert!(report.contains("High -- / Low --"));
        assert!(!report.contains("Outlook:"));
        // No active marker when no segment is flagged.
        assert!(!report.contains("* "));
    }
}
