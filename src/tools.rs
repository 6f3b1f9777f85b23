//! Schema-typed tool boundary over the pipeline
//!
//! Exposes the two pipeline operations as callable, schema-described
//! functions with JSON-serializable results, so a tool-calling host can wire
//! them up without knowing anything about this crate's internals. The
//! conversational orchestration around these calls is the host's job.

use crate::pipeline::ForecastPipeline;
use crate::{Result, SkycastError};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

pub const SEARCH_LOCATIONS_TOOL: &str = "search_locations";
pub const GET_FORECAST_TOOL: &str = "get_forecast";

/// Parameters for the `search_locations` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchLocationsParams {
    /// Free-text place query, e.g. "Gary, Indiana"
    pub query: String,
}

/// Parameters for the `get_forecast` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetForecastParams {
    /// Place id from a prior `search_locations` call
    pub place_id: String,
}

/// One callable tool: name, human description, and JSON schema for its input.
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

fn schema_json<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or_default()
}

/// Describe the tools this crate exposes.
#[must_use]
pub fn tool_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: SEARCH_LOCATIONS_TOOL,
            description: "Resolve a free-text place query into candidate locations, \
                          ordered as the search service returned them.",
            input_schema: schema_json::<SearchLocationsParams>(),
        },
        ToolSpec {
            name: GET_FORECAST_TOOL,
            description: "Fetch and extract the normalized forecast (today plus outlook) \
                          for a place id.",
            input_schema: schema_json::<GetForecastParams>(),
        },
    ]
}

/// Dispatch a tool call by name with JSON arguments.
pub fn dispatch(pipeline: &ForecastPipeline, name: &str, args: Value) -> Result<Value> {
    match name {
        SEARCH_LOCATIONS_TOOL => {
            let params: SearchLocationsParams = decode_args(args)?;
            if params.query.trim().is_empty() {
                return Err(SkycastError::user_input("query cannot be empty"));
            }
            let places = pipeline.resolve(params.query.trim())?;
            to_result(&places)
        }
        GET_FORECAST_TOOL => {
            let params: GetForecastParams = decode_args(args)?;
            if params.place_id.trim().is_empty() {
                return Err(SkycastError::user_input("place_id cannot be empty"));
            }
            let bundle = pipeline.forecast(params.place_id.trim())?;
            to_result(&bundle)
        }
        unknown => Err(SkycastError::user_input(format!(
            "unknown tool '{unknown}'"
        ))),
    }
}

fn decode_args<T: for<'de> Deserialize<'de>>(args: Value) -> Result<T> {
    serde_json::from_value(args)
        .map_err(|e| SkycastError::user_input(format!("invalid tool arguments: {e}")))
}

fn to_result<T: serde::Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| SkycastError::decode(format!("result serialization failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SkycastConfig;

    #[test]
    fn test_tool_specs_have_schemas() {
        let specs = tool_specs();
        assert_eq!(specs.len(), 2);
        for spec in specs {
            let props = spec.input_schema.get("properties");
            assert!(props.is_some(), "{} has no properties", spec.name);
        }
        let names: Vec<_> = tool_specs().iter().map(|s| s.name).collect();
        assert!(names.contains(&SEARCH_LOCATIONS_TOOL));
        assert!(names.contains(&GET_FORECAST_TOOL));
    }

    #[test]
    fn test_unknown_tool_rejected() {
        let pipeline = ForecastPipeline::new(SkycastConfig::default()).unwrap();
        let err = dispatch(&pipeline, "make_coffee", serde_json::json!({})).unwrap_err();
        assert!(matches!(err, SkycastError::UserInput { .. }));
    }

    #[test]
    fn test_blank_query_rejected_before_any_network_call() {
        let pipeline = ForecastPipeline::new(SkycastConfig::default()).unwrap();
        let err = dispatch(
            &pipeline,
            SEARCH_LOCATIONS_TOOL,
            serde_json::json!({ "query": "   " }),
        )
        .unwrap_err();
        assert!(matches!(err, SkycastError::UserInput { .. }));
    }

    #[test]
    fn test_malformed_args_rejected() {
        let pipeline = ForecastPipeline::new(SkycastConfig::default()).unwrap();
        let err = dispatch(
            &pipeline,
            GET_FORECAST_TOOL,
            serde_json::json!({ "place": 7 }),
        )
        .unwrap_err();
        assert!(matches!(err, SkycastError::UserInput { .. }));
    }
}
