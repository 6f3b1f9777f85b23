//! Forecast models: today's breakdown and the multi-day outlook
//!
//! All of these are value objects built once per pipeline invocation and
//! handed to a consumer; nothing here is mutated afterwards or persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// One of the four fixed day periods today's forecast is broken out into.
///
/// `ALL` is the canonical evaluation order; the active-segment tie-break
/// depends on it (see `extract`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Morning,
    Afternoon,
    Evening,
    Overnight,
}

impl Segment {
    /// Fixed canonical order: morning, afternoon, evening, overnight.
    pub const ALL: [Segment; 4] = [
        Segment::Morning,
        Segment::Afternoon,
        Segment::Evening,
        Segment::Overnight,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Segment::Morning => "morning",
            Segment::Afternoon => "afternoon",
            Segment::Evening => "evening",
            Segment::Overnight => "overnight",
        }
    }

    /// Position of this segment within the today container's child rows.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Segment::Morning => 0,
            Segment::Afternoon => 1,
            Segment::Evening => 2,
            Segment::Overnight => 3,
        }
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Forecast for a single day segment (one of the four fixed periods).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySegmentForecast {
    /// Temperature in Fahrenheit, `None` when absent or unparseable
    pub temperature_f: Option<i32>,
    /// Condition label, e.g. "Partly Cloudy"
    pub condition: Option<String>,
    /// Rain chance as the source's percentage string, e.g. "20%"
    pub chance_of_rain_percent: Option<String>,
    /// Whether the source flags this segment as the current period
    pub is_active: bool,
}

/// Snapshot of current conditions at fetch time. All fields degrade to `None`
/// independently when their markup is missing or malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentSnapshot {
    /// Source timestamp label, e.g. "as of 2:13 pm EDT"
    pub time_label: Option<String>,
    pub temperature_f: Option<i32>,
    pub felt_temperature_f: Option<i32>,
    pub condition: Option<String>,
    pub humidity_percent: Option<String>,
    pub uv_index: Option<String>,
    pub wind_description: Option<String>,
}

/// Today's forecast: high/low, current snapshot, and the four segments.
///
/// Invariant: at most one segment has `is_active == true`, and
/// `active_segment` (when `Some`) names exactly that segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayForecast {
    pub temp_high_f: Option<i32>,
    pub temp_low_f: Option<i32>,
    pub current: CurrentSnapshot,
    /// Segment forecasts in `Segment::ALL` order
    pub segments: [DaySegmentForecast; 4],
    pub active_segment: Option<Segment>,
}

impl TodayForecast {
    #[must_use]
    pub fn segment(&self, segment: Segment) -> &DaySegmentForecast {
        &self.segments[segment.index()]
    }
}

/// A forecast row for one day beyond today.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlookDay {
    /// Date label as rendered by the source, e.g. "Sat 23"
    pub date_label: Option<String>,
    pub condition: Option<String>,
    pub chance_of_rain_percent: Option<String>,
    pub temp_high_f: Option<i32>,
    pub temp_low_f: Option<i32>,
}

/// Complete extraction result for one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastBundle {
    pub today: TodayForecast,
    /// Outlook days in source row order, "today" row excluded
    pub outlook: Vec<OutlookDay>,
    /// When this forecast was extracted
    pub fetched_at: DateTime<Utc>,
}

impl ForecastBundle {
    #[must_use]
    pub fn new(today: TodayForecast, outlook: Vec<OutlookDay>) -> Self {
        Self {
            today,
            outlook,
            fetched_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_order_is_fixed() {
        assert_eq!(
            Segment::ALL.map(Segment::as_str),
            ["morning", "afternoon", "evening", "overnight"]
        );
        for (i, segment) in Segment::ALL.iter().enumerate() {
            assert_eq!(segment.index(), i);
        }
    }

    #[test]
    fn test_segment_accessor_maps_by_position() {
        let mut today = TodayForecast::default();
        today.segments[1].temperature_f = Some(74);
        assert_eq!(today.segment(Segment::Afternoon).temperature_f, Some(74));
        assert_eq!(today.segment(Segment::Morning).temperature_f, None);
    }

    #[test]
    fn test_default_today_is_fully_null() {
        let today = TodayForecast::default();
        assert!(today.temp_high_f.is_none());
        assert!(today.temp_low_f.is_none());
        assert!(today.active_segment.is_none());
        assert!(today.segments.iter().all(|s| !s.is_active));
    }

    #[test]
    fn test_segment_serializes_lowercase() {
        let json = serde_json::to_string(&Segment::Overnight).unwrap();
        assert_eq!(json, "\"overnight\"");
    }
}
