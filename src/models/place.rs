//! Candidate place model produced by location resolution

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A candidate location with a provider-specific identifier and a
/// human-readable display label.
///
/// Produced fresh per query, never cached, never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// Provider-specific place identifier used to build the forecast page URL
    pub place_id: String,
    /// Human-readable label, e.g. "Gary, Indiana, United States"
    pub display_name: String,
}

impl Place {
    #[must_use]
    pub fn new(place_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            display_name: display_name.into(),
        }
    }
}

impl Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name)
    }
}
