//! Location resolution: free-text query to an ordered list of candidate places
//!
//! The search service wraps its results in an envelope whose operation key is
//! not guaranteed stable across deployments, so the decoder reads whichever
//! single key is present under the `dal` namespace and fails loudly when it
//! finds competing keys. The result data itself is stored as parallel arrays
//! indexed by position, which the resolver zips into `Place` records in
//! source order; there is no client-side re-ranking or de-duplication.

use crate::api::WeatherClient;
use crate::models::Place;
use crate::{Result, SkycastError};
use serde_json::Value;
use tracing::debug;

/// Namespace the dynamically-named operation key lives under.
const ENVELOPE_NAMESPACE: &str = "dal";

/// Service resolving free-text place queries against the search endpoint.
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve a query into an ordered (possibly empty) list of places.
    ///
    /// The query is expected to be non-empty; validating user input is the
    /// caller's concern.
    pub fn resolve(client: &WeatherClient, query: &str) -> Result<Vec<Place>> {
        debug!(query, "resolving location query");
        let envelope = client.search_locations(query)?;
        let places = decode_search_envelope(&envelope)?;
        debug!(candidates = places.len(), "location query resolved");
        Ok(places)
    }
}

/// Decode the search response envelope into candidate places.
///
/// Expected shape: `{ "dal": { "<operation key>": { "data": { "location":
/// { "placeId": [...], "city": [...], ... } } } } }` with exactly one
/// operation key. Two or more keys mean an unreviewed upstream change and are
/// a hard decode failure rather than a silent guess.
pub fn decode_search_envelope(envelope: &Value) -> Result<Vec<Place>> {
    let namespace = envelope
        .get(ENVELOPE_NAMESPACE)
        .and_then(Value::as_object)
        .ok_or_else(|| {
            SkycastError::decode(format!(
                "response has no '{ENVELOPE_NAMESPACE}' namespace object"
            ))
        })?;

    let mut operations = namespace.iter();
    let Some((operation, payload)) = operations.next() else {
        // An empty namespace is a no-results response, not a contract break.
        return Ok(Vec::new());
    };
    if operations.next().is_some() {
        return Err(SkycastError::AmbiguousEnvelope {
            keys: namespace.keys().cloned().collect::<Vec<_>>().join(", "),
        });
    }

    debug!(operation, "search envelope decoded");
    Ok(project_places(payload))
}

/// Zip the parallel result arrays into `Place` records, preserving source
/// order. A payload without a `placeId` array yields an empty list.
fn project_places(payload: &Value) -> Vec<Place> {
    let location = payload.pointer("/data/location");
    let Some(place_ids) = location
        .and_then(|l| l.get("placeId"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    let column = |name: &str| location.and_then(|l| l.get(name)).and_then(Value::as_array);
    let cities = column("city");
    let admin_districts = column("adminDistrict");
    let countries = column("country");
    let at = |col: Option<&Vec<Value>>, i: usize| -> Option<String> {
        col.and_then(|c| c.get(i))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    place_ids
        .iter()
        .enumerate()
        .filter_map(|(i, id)| {
            let place_id = id.as_str()?;
            let display_name = [
                at(cities, i),
                at(admin_districts, i),
                at(countries, i),
            ]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
            let display_name = if display_name.is_empty() {
                place_id.to_string()
            } else {
                display_name
            };
            Some(Place::new(place_id, display_name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(payload: Value) -> Value {
        json!({ "dal": { "getSunV3LocationSearchUrlConfig": payload } })
    }

    #[test]
    fn test_single_city_resolves_to_one_place() {
        let response = envelope(json!({
            "data": {
                "location": {
                    "placeId": ["c9e2b29e"],
                    "city": ["Gary"],
                    "adminDistrict": ["Indiana"],
                    "country": ["United States"],
                }
            }
        }));
        let places = decode_search_envelope(&response).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].place_id, "c9e2b29e");
        assert_eq!(places[0].display_name, "Gary, Indiana, United States");
    }

    #[test]
    fn test_parallel_arrays_zip_in_source_order() {
        let response = envelope(json!({
            "data": {
                "location": {
                    "placeId": ["p1", "p2", "p3"],
                    "city": ["Springfield", "Springfield", "Springfield"],
                    "adminDistrict": ["Illinois", "Missouri", null],
                    "country": ["United States", "United States", "United States"],
                }
            }
        }));
        let places = decode_search_envelope(&response).unwrap();
        assert_eq!(places.len(), 3);
        assert_eq!(places[0].display_name, "Springfield, Illinois, United States");
        assert_eq!(places[1].display_name, "Springfield, Missouri, United States");
        // A null column entry is simply skipped in the label.
        assert_eq!(places[2].display_name, "Springfield, United States");
    }

    #[test]
    fn test_missing_place_id_array_is_empty_not_error() {
        let response = envelope(json!({
            "data": { "location": { "city": ["Gary"] } }
        }));
        let places = decode_search_envelope(&response).unwrap();
        assert!(places.is_empty());
    }

    #[test]
    fn test_missing_location_object_is_empty() {
        let response = envelope(json!({ "data": {} }));
        assert!(decode_search_envelope(&response).unwrap().is_empty());
    }

    #[test]
    fn test_competing_keys_are_ambiguous() {
        let response = json!({
            "dal": {
                "getSunV3LocationSearchUrlConfig": { "data": {} },
                "getSunV3LocationSearchBetaUrlConfig": { "data": {} },
            }
        });
        let err = decode_search_envelope(&response).unwrap_err();
        match err {
            SkycastError::AmbiguousEnvelope { keys } => {
                assert!(keys.contains("getSunV3LocationSearchUrlConfig"));
                assert!(keys.contains("getSunV3LocationSearchBetaUrlConfig"));
            }
            other => panic!("expected AmbiguousEnvelope, got {other:?}"),
        }
    }

    #[test]
    fn test_renamed_operation_key_still_decodes() {
        // The operation key literal is not stable across deployments; any
        // single key under the namespace must work.
        let response = json!({
            "dal": {
                "getSunV4LocationSearch": {
                    "data": {
                        "location": {
                            "placeId": ["p1"],
                            "city": ["Gary"],
                            "adminDistrict": ["Indiana"],
                            "country": ["United States"],
                        }
                    }
                }
            }
        });
        let places = decode_search_envelope(&response).unwrap();
        assert_eq!(places.len(), 1);
    }

    #[test]
    fn test_empty_namespace_is_no_results() {
        let response = json!({ "dal": {} });
        assert!(decode_search_envelope(&response).unwrap().is_empty());
    }

    #[test]
    fn test_missing_namespace_is_decode_error() {
        let response = json!({ "unexpected": {} });
        let err = decode_search_envelope(&response).unwrap_err();
        assert!(matches!(err, SkycastError::Decode { .. }));
    }

    #[test]
    fn test_place_id_without_label_columns_falls_back_to_id() {
        let response = envelope(json!({
            "data": { "location": { "placeId": ["p1"] } }
        }));
        let places = decode_search_envelope(&response).unwrap();
        assert_eq!(places[0].display_name, "p1");
    }
}
