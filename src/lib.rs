//! skycast - weather.com forecasts as structured data
//!
//! This library resolves free-text place queries against the weather.com
//! location search service and extracts a normalized multi-period forecast
//! out of the fetched page's markup.

pub mod api;
pub mod calendar;
pub mod config;
pub mod error;
pub mod extract;
pub mod location_resolver;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod selectors;
pub mod tools;

// Re-export core types for public API
pub use api::WeatherClient;
pub use calendar::ForecastEvent;
pub use config::SkycastConfig;
pub use error::SkycastError;
pub use extract::{Diagnostic, DiagnosticKind, ExtractionEngine};
pub use location_resolver::LocationResolver;
pub use models::{
    CurrentSnapshot, DaySegmentForecast, ForecastBundle, OutlookDay, Place, Segment, TodayForecast,
};
pub use pipeline::ForecastPipeline;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SkycastError>;
