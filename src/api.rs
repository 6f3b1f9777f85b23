//! HTTP client for the weather.com search endpoint and forecast pages
//!
//! One plain blocking client with a timeout and user agent from config. There
//! is deliberately no retry, backoff, or caching layer here: a failed call
//! aborts the run and is reported to the caller, and any retry policy belongs
//! to the host.

use crate::Result;
use crate::config::SkycastConfig;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const USER_AGENT: &str = "skycast/0.1.0";

/// Named search operation carried by every location search call.
pub const SEARCH_OPERATION: &str = "getSunV3LocationSearchUrlConfig";

/// Blocking client for both stages of the pipeline: the location search call
/// and the forecast page fetch.
pub struct WeatherClient {
    client: reqwest::blocking::Client,
    config: SkycastConfig,
}

impl WeatherClient {
    /// Create a new client from configuration.
    pub fn new(config: SkycastConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.search.timeout_seconds.into());

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, config })
    }

    /// Issue one location search call for `query` and return the raw response
    /// envelope. Decoding the envelope is the resolver's concern.
    #[instrument(skip(self), fields(query = query))]
    pub fn search_locations(&self, query: &str) -> Result<Value> {
        debug!(endpoint = %self.config.search.endpoint, "location search request");

        let body = json!([{
            "name": SEARCH_OPERATION,
            "params": {
                "query": query,
                "language": self.config.search.language,
                "locationType": self.config.search.location_type,
            },
        }]);

        let response = self
            .client
            .post(&self.config.search.endpoint)
            .json(&body)
            .send()?
            .error_for_status()?;

        let envelope: Value = response.json()?;
        info!("location search call succeeded");
        Ok(envelope)
    }

    /// Fetch the forecast page for a selected place id and return its markup.
    #[instrument(skip(self), fields(place_id = place_id))]
    pub fn fetch_forecast_page(&self, place_id: &str) -> Result<String> {
        let url = self.forecast_url(place_id);
        debug!(%url, "forecast page request");

        let response = self.client.get(&url).send()?.error_for_status()?;
        let markup = response.text()?;

        if markup.is_empty() {
            warn!(%url, "forecast page response was empty");
        } else {
            info!(bytes = markup.len(), "forecast page fetched");
        }
        Ok(markup)
    }

    /// Forecast page URL for a place id.
    #[must_use]
    pub fn forecast_url(&self, place_id: &str) -> String {
        format!(
            "{}/weather/today/l/{}",
            self.config.forecast.base_url.trim_end_matches('/'),
            place_id
        )
    }

    #[must_use]
    pub fn config(&self) -> &SkycastConfig {
        &self.config
    }
}
