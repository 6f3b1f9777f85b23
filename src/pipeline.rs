//! Composition root wiring the two pipeline stages together
//!
//! One invocation runs resolve -> (caller picks) -> fetch -> extract in
//! strict sequence. The pipeline holds no mutable state, so independent
//! invocations are safe to run concurrently without coordination.

use crate::api::WeatherClient;
use crate::config::SkycastConfig;
use crate::extract::ExtractionEngine;
use crate::location_resolver::LocationResolver;
use crate::models::{ForecastBundle, Place};
use crate::Result;
use scraper::Html;

/// The two-stage forecast pipeline: location resolution plus markup
/// extraction.
pub struct ForecastPipeline {
    client: WeatherClient,
    engine: ExtractionEngine,
}

impl ForecastPipeline {
    /// Build a pipeline from configuration.
    pub fn new(config: SkycastConfig) -> Result<Self> {
        let engine = ExtractionEngine::new(config.forecast.outlook_days);
        let client = WeatherClient::new(config)?;
        Ok(Self { client, engine })
    }

    /// Resolve a free-text query into candidate places.
    pub fn resolve(&self, query: &str) -> Result<Vec<Place>> {
        LocationResolver::resolve(&self.client, query)
    }

    /// Fetch and extract the forecast for a selected place id.
    pub fn forecast(&self, place_id: &str) -> Result<ForecastBundle> {
        let markup = self.client.fetch_forecast_page(place_id)?;
        let doc = Html::parse_document(&markup);
        Ok(self.engine.extract_forecast(&doc))
    }
}
