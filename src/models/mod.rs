//! Data models for the skycast pipeline
//!
//! This module contains the core domain models organized by concern:
//! - Place: a candidate location returned by the search service
//! - Forecast: today's forecast breakdown and the multi-day outlook

pub mod forecast;
pub mod place;

// Re-export all public types for convenient access
pub use forecast::{
    CurrentSnapshot, DaySegmentForecast, ForecastBundle, OutlookDay, Segment, TodayForecast,
};
pub use place::Place;
