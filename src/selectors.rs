//! Selector catalog: the single source of truth for where each field lives
//!
//! The CSS source strings are plain consts so the field-to-structure mapping
//! stays auditable in one place; `Catalog` compiles them once. When the
//! upstream page drifts, this file is the only one that should need touching.

use crate::models::CurrentSnapshot;
use crate::normalize;
use scraper::{ElementRef, Selector};

// -- today --------------------------------------------------------------

const TODAY_CONTAINER: &str = r#"section[data-testid="TodayWeatherModule"]"#;
const TODAY_DETAILS: &str = r#"div[data-testid="TodaysDetailsHeader"]"#;

const CURRENT_SCOPE: &str = r#"div[data-testid="CurrentConditionsBlock"]"#;
const CURRENT_TIME: &str = r#"span[data-testid="CurrentTimestamp"]"#;
const CURRENT_TEMPERATURE: &str = r#"span[data-testid="CurrentTemperature"]"#;
const CURRENT_FEELS_LIKE: &str = r#"span[data-testid="FeelsLikeTemperature"]"#;
const CURRENT_CONDITION: &str = r#"div[data-testid="CurrentPhrase"]"#;
const CURRENT_HUMIDITY: &str = r#"span[data-testid="HumidityValue"]"#;
const CURRENT_UV: &str = r#"span[data-testid="UVIndexValue"]"#;
const CURRENT_WIND: &str = r#"span[data-testid="WindValue"]"#;

/// Shared temperature leaf. Within a scope these appear in document order;
/// the first is the high and the last is the low. That first/last convention
/// is an assumption about source ordering and is relied on verbatim for both
/// the today details header and each outlook row.
const TEMPERATURE_LEAF: &str = r#"span[data-testid="TemperatureValue"]"#;

// -- day segments -------------------------------------------------------

const SEGMENT_ROWS: &str = r#"ul[data-testid="DaypartTable"] > li[data-testid="DaypartColumn"]"#;
const SEGMENT_CONDITION: &str = r#"div[data-testid="wxPhrase"]"#;
const SEGMENT_RAIN: &str = r#"span[data-testid="PercentageValue"]"#;

/// Class marker the source puts on the daypart column for the current period.
/// Tested structurally against each segment row's class list, never against a
/// rendered value.
pub const ACTIVE_MARKER_CLASS: &str = "Column--active";

// -- outlook ------------------------------------------------------------

const OUTLOOK_CONTAINER: &str = r#"section[data-testid="DailyForecastModule"]"#;
const OUTLOOK_ROWS: &str =
    r#"ul[data-testid="DailyForecastList"] > li[data-testid="DailyForecastRow"]"#;
const OUTLOOK_DATE: &str = r#"span[data-testid="DailyDate"]"#;

/// A compiled structural query together with its CSS source, kept so
/// diagnostics can name the selector that missed.
#[derive(Debug, Clone)]
pub struct Query {
    pub css: &'static str,
    selector: Selector,
}

impl Query {
    fn new(css: &'static str) -> Self {
        // Catalog strings are literals reviewed with this file; a parse
        // failure here is a programming error, not a runtime condition.
        let selector = Selector::parse(css).expect("selector literal must parse");
        Self { css, selector }
    }

    #[must_use]
    pub fn selector(&self) -> &Selector {
        &self.selector
    }
}

/// One current-snapshot field: diagnostic name, structural query source, and
/// the normalizer that writes the value into the snapshot.
///
/// `apply` returns `Err(raw)` when the leaf text was present but not
/// parseable; the engine turns that into a malformed-value diagnostic while
/// the field itself stays `None`.
pub struct CurrentField {
    pub name: &'static str,
    pub css: &'static str,
    pub apply: fn(&mut CurrentSnapshot, &ElementRef) -> Result<(), String>,
}

fn apply_temperature_into(
    slot: &mut Option<i32>,
    el: &ElementRef,
) -> Result<(), String> {
    let Some(raw) = normalize::label(el) else {
        return Ok(());
    };
    match normalize::classify_temperature(&raw) {
        normalize::TemperatureText::Value(value) => {
            *slot = Some(value);
            Ok(())
        }
        normalize::TemperatureText::Empty => Ok(()),
        normalize::TemperatureText::Malformed => Err(raw),
    }
}

fn apply_time_label(snapshot: &mut CurrentSnapshot, el: &ElementRef) -> Result<(), String> {
    snapshot.time_label = normalize::label(el);
    Ok(())
}

fn apply_temperature(snapshot: &mut CurrentSnapshot, el: &ElementRef) -> Result<(), String> {
    apply_temperature_into(&mut snapshot.temperature_f, el)
}

fn apply_felt_temperature(snapshot: &mut CurrentSnapshot, el: &ElementRef) -> Result<(), String> {
    apply_temperature_into(&mut snapshot.felt_temperature_f, el)
}

fn apply_condition(snapshot: &mut CurrentSnapshot, el: &ElementRef) -> Result<(), String> {
    snapshot.condition = normalize::label(el);
    Ok(())
}

fn apply_humidity(snapshot: &mut CurrentSnapshot, el: &ElementRef) -> Result<(), String> {
    snapshot.humidity_percent = normalize::percent(el);
    Ok(())
}

fn apply_uv_index(snapshot: &mut CurrentSnapshot, el: &ElementRef) -> Result<(), String> {
    snapshot.uv_index = normalize::label(el);
    Ok(())
}

fn apply_wind(snapshot: &mut CurrentSnapshot, el: &ElementRef) -> Result<(), String> {
    snapshot.wind_description = normalize::label(el);
    Ok(())
}

/// Declarative field table for the current-conditions snapshot, consumed by
/// one generic extract-or-null-with-diagnostic pass in the engine.
pub const CURRENT_FIELDS: [CurrentField; 7] = [
    CurrentField {
        name: "current.time_label",
        css: CURRENT_TIME,
        apply: apply_time_label,
    },
    CurrentField {
        name: "current.temperature_f",
        css: CURRENT_TEMPERATURE,
        apply: apply_temperature,
    },
    CurrentField {
        name: "current.felt_temperature_f",
        css: CURRENT_FEELS_LIKE,
        apply: apply_felt_temperature,
    },
    CurrentField {
        name: "current.condition",
        css: CURRENT_CONDITION,
        apply: apply_condition,
    },
    CurrentField {
        name: "current.humidity_percent",
        css: CURRENT_HUMIDITY,
        apply: apply_humidity,
    },
    CurrentField {
        name: "current.uv_index",
        css: CURRENT_UV,
        apply: apply_uv_index,
    },
    CurrentField {
        name: "current.wind_description",
        css: CURRENT_WIND,
        apply: apply_wind,
    },
];

/// All compiled queries the extraction engine walks.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub today_container: Query,
    pub today_details: Query,
    pub current_scope: Query,
    pub current_fields: Vec<Query>,
    pub temperature_leaf: Query,
    pub segment_rows: Query,
    pub segment_condition: Query,
    pub segment_rain_chance: Query,
    pub outlook_container: Query,
    pub outlook_rows: Query,
    pub outlook_date: Query,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            today_container: Query::new(TODAY_CONTAINER),
            today_details: Query::new(TODAY_DETAILS),
            current_scope: Query::new(CURRENT_SCOPE),
            current_fields: CURRENT_FIELDS.iter().map(|f| Query::new(f.css)).collect(),
            temperature_leaf: Query::new(TEMPERATURE_LEAF),
            segment_rows: Query::new(SEGMENT_ROWS),
            segment_condition: Query::new(SEGMENT_CONDITION),
            segment_rain_chance: Query::new(SEGMENT_RAIN),
            outlook_container: Query::new(OUTLOOK_CONTAINER),
            outlook_rows: Query::new(OUTLOOK_ROWS),
            outlook_date: Query::new(OUTLOOK_DATE),
        }
    }
}

/// Structural test for the active-period marker on a segment row.
#[must_use]
pub fn is_active_row(el: &ElementRef) -> bool {
    el.value().classes().any(|c| c.contains(ACTIVE_MARKER_CLASS))
}
