//! Calendar-event construction from extracted forecasts
//!
//! Builds the event value a calendar integration would create; talking to an
//! actual calendar API (and its token handling) lives outside this crate.

use crate::models::{OutlookDay, Place, TodayForecast};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// An all-day weather event derived from a forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastEvent {
    pub summary: String,
    pub description: String,
    /// Source date label; `None` means "today"
    pub date_label: Option<String>,
    pub is_all_day: bool,
}

fn temp_or_dash(value: Option<i32>) -> String {
    value.map_or_else(|| "--".to_string(), |t| t.to_string())
}

impl ForecastEvent {
    /// Derive today's event body from the high/low and condition.
    #[must_use]
    pub fn from_today(place: &Place, today: &TodayForecast) -> Self {
        let condition = today
            .current
            .condition
            .as_deref()
            .unwrap_or("Weather")
            .to_string();
        Self {
            summary: format!("{condition} {}°/{}°",
                temp_or_dash(today.temp_high_f),
                temp_or_dash(today.temp_low_f),
            ),
            description: format!(
                "{}: high {}°F, low {}°F, {}",
                place.display_name,
                temp_or_dash(today.temp_high_f),
                temp_or_dash(today.temp_low_f),
                condition,
            ),
            date_label: None,
            is_all_day: true,
        }
    }

    /// Derive an event body for one outlook day.
    #[must_use]
    pub fn from_outlook_day(place: &Place, day: &OutlookDay) -> Self {
        let condition = day.condition.as_deref().unwrap_or("Weather").to_string();
        Self {
            summary: format!(
                "{condition} {}°/{}°",
                temp_or_dash(day.temp_high_f),
                temp_or_dash(day.temp_low_f),
            ),
            description: format!(
                "{}: high {}°F, low {}°F, {}",
                place.display_name,
                temp_or_dash(day.temp_high_f),
                temp_or_dash(day.temp_low_f),
                condition,
            ),
            date_label: day.date_label.clone(),
            is_all_day: true,
        }
    }
}

impl Display for ForecastEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.summary)?;
        match &self.date_label {
            Some(label) => writeln!(f, "   📅 {label}")?,
            None => writeln!(f, "   📅 Today")?,
        }
        writeln!(f, "   {}", self.description)
    }
}
