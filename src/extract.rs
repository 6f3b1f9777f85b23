//! Extraction engine: walks the selector catalog over fetched markup and
//! builds the normalized forecast
//!
//! Every structural lookup degrades the same way: zero matches mean a `None`
//! field plus exactly one diagnostic naming what was looked up, never an
//! error. The engine therefore always returns a complete `ForecastBundle`,
//! even against a page whose layout has drifted out from under the catalog.

use crate::models::{
    CurrentSnapshot, DaySegmentForecast, ForecastBundle, OutlookDay, Segment, TodayForecast,
};
use crate::normalize::{self, TemperatureText};
use crate::selectors::{self, CURRENT_FIELDS, Catalog, Query};
use scraper::{ElementRef, Html};
use tracing::{debug, warn};

/// Non-fatal record emitted when an expected structural element is absent or
/// a present leaf holds unparseable text. Used to detect upstream markup
/// drift; never alters control flow or the result shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Logical field the lookup was for, e.g. `today.segments.morning`
    pub field: String,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The structural query matched zero nodes
    SelectorMiss { selector: &'static str },
    /// Leaf text was present but did not normalize
    MalformedValue { raw: String },
}

/// Collects diagnostics for one extraction pass and mirrors each record to
/// the operator log.
#[derive(Debug, Default)]
struct DiagnosticLog {
    records: Vec<Diagnostic>,
}

impl DiagnosticLog {
    fn miss(&mut self, field: impl Into<String>, selector: &'static str) {
        let field = field.into();
        warn!(%field, selector, "selector matched no nodes");
        self.records.push(Diagnostic {
            field,
            kind: DiagnosticKind::SelectorMiss { selector },
        });
    }

    fn malformed(&mut self, field: impl Into<String>, raw: impl Into<String>) {
        let field = field.into();
        let raw = raw.into();
        warn!(%field, %raw, "leaf text did not normalize");
        self.records.push(Diagnostic {
            field,
            kind: DiagnosticKind::MalformedValue { raw },
        });
    }
}

/// Generic extract-or-null-with-diagnostic lookup. An absent scope counts as
/// a zero-match lookup, so callers below a missing container still get their
/// per-field diagnostics without special-casing.
fn find_in<'a>(
    scope: Option<ElementRef<'a>>,
    query: &Query,
    field: impl Into<String>,
    log: &mut DiagnosticLog,
) -> Option<ElementRef<'a>> {
    let hit = scope.and_then(|s| s.select(query.selector()).next());
    if hit.is_none() {
        log.miss(field, query.css);
    }
    hit
}

/// Parse a temperature leaf, reporting malformed (but not blank) text.
fn temp_of(
    el: &ElementRef,
    field: impl Into<String>,
    log: &mut DiagnosticLog,
) -> Option<i32> {
    let raw = normalize::label(el)?;
    match normalize::classify_temperature(&raw) {
        TemperatureText::Value(value) => Some(value),
        TemperatureText::Empty => None,
        TemperatureText::Malformed => {
            log.malformed(field, raw);
            None
        }
    }
}

/// Selector-driven forecast extractor.
///
/// Pure function of its input document; holds no state between invocations
/// beyond the compiled catalog and the configured outlook horizon, so
/// concurrent extractions need no coordination.
#[derive(Debug, Clone)]
pub struct ExtractionEngine {
    catalog: Catalog,
    outlook_days: usize,
}

impl ExtractionEngine {
    /// Create an engine retaining `outlook_days` rows beyond today.
    #[must_use]
    pub fn new(outlook_days: usize) -> Self {
        Self {
            catalog: Catalog::default(),
            outlook_days,
        }
    }

    /// Extract `{ today, outlook }` from a fetched forecast page.
    #[must_use]
    pub fn extract_forecast(&self, doc: &Html) -> ForecastBundle {
        self.extract_forecast_with_diagnostics(doc).0
    }

    /// Like [`extract_forecast`](Self::extract_forecast) but also returns the
    /// diagnostics recorded during the pass, for callers (and tests) that
    /// watch for selector drift.
    #[must_use]
    pub fn extract_forecast_with_diagnostics(
        &self,
        doc: &Html,
    ) -> (ForecastBundle, Vec<Diagnostic>) {
        let mut log = DiagnosticLog::default();
        let today = self.extract_today(doc, &mut log);
        let outlook = self.extract_outlook(doc, &mut log);
        debug!(
            outlook_days = outlook.len(),
            diagnostics = log.records.len(),
            "extraction pass complete"
        );
        (ForecastBundle::new(today, outlook), log.records)
    }

    fn extract_today(&self, doc: &Html, log: &mut DiagnosticLog) -> TodayForecast {
        let container = find_in(
            Some(doc.root_element()),
            &self.catalog.today_container,
            "today",
            log,
        );
        let current = self.extract_current(container, log);
        let (temp_high_f, temp_low_f) = self.extract_high_low(container, log);
        let (segments, active_segment) = self.extract_segments(container, log);
        TodayForecast {
            temp_high_f,
            temp_low_f,
            current,
            segments,
            active_segment,
        }
    }

    fn extract_current(
        &self,
        container: Option<ElementRef>,
        log: &mut DiagnosticLog,
    ) -> CurrentSnapshot {
        let scope = find_in(container, &self.catalog.current_scope, "current", log);
        let mut snapshot = CurrentSnapshot::default();
        for (field, query) in CURRENT_FIELDS.iter().zip(&self.catalog.current_fields) {
            if let Some(el) = find_in(scope, query, field.name, log)
                && let Err(raw) = (field.apply)(&mut snapshot, &el)
            {
                log.malformed(field.name, raw);
            }
        }
        snapshot
    }

    /// High/low convention: all temperature leaves in the details scope in
    /// document order; the first is the high, the last is the low.
    fn extract_high_low(
        &self,
        container: Option<ElementRef>,
        log: &mut DiagnosticLog,
    ) -> (Option<i32>, Option<i32>) {
        let details = find_in(container, &self.catalog.today_details, "today.details", log);
        let leaves: Vec<ElementRef> = details
            .map(|d| d.select(self.catalog.temperature_leaf.selector()).collect())
            .unwrap_or_default();
        if leaves.is_empty() {
            log.miss("today.temp_high_f", self.catalog.temperature_leaf.css);
            log.miss("today.temp_low_f", self.catalog.temperature_leaf.css);
            return (None, None);
        }
        let high = leaves
            .first()
            .and_then(|el| temp_of(el, "today.temp_high_f", log));
        let low = leaves
            .last()
            .and_then(|el| temp_of(el, "today.temp_low_f", log));
        (high, low)
    }

    fn extract_segments(
        &self,
        container: Option<ElementRef>,
        log: &mut DiagnosticLog,
    ) -> ([DaySegmentForecast; 4], Option<Segment>) {
        let rows: Vec<ElementRef> = match container {
            Some(c) => {
                let rows: Vec<_> = c.select(self.catalog.segment_rows.selector()).collect();
                if rows.is_empty() {
                    log.miss("today.segments", self.catalog.segment_rows.css);
                }
                rows
            }
            None => {
                log.miss("today.segments", self.catalog.segment_rows.css);
                Vec::new()
            }
        };

        let mut segments: [DaySegmentForecast; 4] = Default::default();
        for segment in Segment::ALL {
            segments[segment.index()] =
                self.extract_segment(segment, rows.get(segment.index()).copied(), log);
        }

        // The markup does not structurally enforce a single active flag, so
        // the engine does: fixed morning -> overnight order, first active
        // wins, later flags are cleared.
        let active_segment = Segment::ALL
            .into_iter()
            .find(|s| segments[s.index()].is_active);
        if let Some(active) = active_segment {
            for segment in Segment::ALL {
                if segment != active {
                    segments[segment.index()].is_active = false;
                }
            }
        }
        (segments, active_segment)
    }

    fn extract_segment(
        &self,
        segment: Segment,
        row: Option<ElementRef>,
        log: &mut DiagnosticLog,
    ) -> DaySegmentForecast {
        let Some(row) = row else {
            log.miss(
                format!("today.segments.{segment}"),
                self.catalog.segment_rows.css,
            );
            return DaySegmentForecast::default();
        };

        let temperature_f = find_in(
            Some(row),
            &self.catalog.temperature_leaf,
            format!("today.segments.{segment}.temperature_f"),
            log,
        )
        .and_then(|el| temp_of(&el, format!("today.segments.{segment}.temperature_f"), log));
        let condition = find_in(
            Some(row),
            &self.catalog.segment_condition,
            format!("today.segments.{segment}.condition"),
            log,
        )
        .and_then(|el| normalize::label(&el));
        let chance_of_rain_percent = find_in(
            Some(row),
            &self.catalog.segment_rain_chance,
            format!("today.segments.{segment}.chance_of_rain_percent"),
            log,
        )
        .and_then(|el| normalize::percent(&el));

        DaySegmentForecast {
            temperature_f,
            condition,
            chance_of_rain_percent,
            is_active: selectors::is_active_row(&row),
        }
    }

    fn extract_outlook(&self, doc: &Html, log: &mut DiagnosticLog) -> Vec<OutlookDay> {
        let Some(container) = find_in(
            Some(doc.root_element()),
            &self.catalog.outlook_container,
            "outlook",
            log,
        ) else {
            return Vec::new();
        };

        let rows: Vec<ElementRef> = container
            .select(self.catalog.outlook_rows.selector())
            .collect();
        if rows.is_empty() {
            log.miss("outlook.rows", self.catalog.outlook_rows.css);
            return Vec::new();
        }

        // Row 0 duplicates today; keep up to the configured horizon after it.
        rows.into_iter()
            .skip(1)
            .take(self.outlook_days)
            .enumerate()
            .map(|(i, row)| self.extract_outlook_day(i, row, log))
            .collect()
    }

    fn extract_outlook_day(
        &self,
        index: usize,
        row: ElementRef,
        log: &mut DiagnosticLog,
    ) -> OutlookDay {
        let date_label = find_in(
            Some(row),
            &self.catalog.outlook_date,
            format!("outlook[{index}].date_label"),
            log,
        )
        .and_then(|el| normalize::label(&el));
        let condition = find_in(
            Some(row),
            &self.catalog.segment_condition,
            format!("outlook[{index}].condition"),
            log,
        )
        .and_then(|el| normalize::label(&el));
        let chance_of_rain_percent = find_in(
            Some(row),
            &self.catalog.segment_rain_chance,
            format!("outlook[{index}].chance_of_rain_percent"),
            log,
        )
        .and_then(|el| normalize::percent(&el));

        // Same first/last convention as the today header, scoped to the row.
        let leaves: Vec<ElementRef> =
            row.select(self.catalog.temperature_leaf.selector()).collect();
        let (temp_high_f, temp_low_f) = if leaves.is_empty() {
            log.miss(
                format!("outlook[{index}].temp_high_f"),
                self.catalog.temperature_leaf.css,
            );
            log.miss(
                format!("outlook[{index}].temp_low_f"),
                self.catalog.temperature_leaf.css,
            );
            (None, None)
        } else {
            (
                leaves
                    .first()
                    .and_then(|el| temp_of(el, format!("outlook[{index}].temp_high_f"), log)),
                leaves
                    .last()
                    .and_then(|el| temp_of(el, format!("outlook[{index}].temp_low_f"), log)),
            )
        };

        OutlookDay {
            date_label,
            condition,
            chance_of_rain_percent,
            temp_high_f,
            temp_low_f,
        }
    }
}
