//! Pure normalizers converting raw leaf text into typed values
//!
//! Every function here degrades to `None` instead of failing: the extraction
//! engine depends on these never raising, whatever the markup contains.

use scraper::ElementRef;

/// Outcome of normalizing a raw temperature leaf.
///
/// `Empty` and `Malformed` both surface as `None` values; the distinction only
/// feeds the engine's diagnostics (a malformed value is worth reporting, a
/// blank placeholder like `"°"` is not).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemperatureText {
    Value(i32),
    Empty,
    Malformed,
}

/// Classify a raw temperature leaf, e.g. `"72°"`.
///
/// Strips one trailing degree glyph and parses the remainder as a base-10
/// integer. Empty or whitespace-only input (before or after stripping) is
/// `Empty`, anything that still fails to parse is `Malformed`.
#[must_use]
pub fn classify_temperature(raw: &str) -> TemperatureText {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_suffix('°').unwrap_or(trimmed).trim();
    if stripped.is_empty() {
        return TemperatureText::Empty;
    }
    match stripped.parse::<i32>() {
        Ok(value) => TemperatureText::Value(value),
        Err(_) => TemperatureText::Malformed,
    }
}

/// Normalize a raw temperature leaf into Fahrenheit degrees.
///
/// Empty input normalizes to `None` (never 0), and so does anything that
/// fails to parse after stripping the degree glyph; this never panics.
#[must_use]
pub fn temperature_f(raw: &str) -> Option<i32> {
    match classify_temperature(raw) {
        TemperatureText::Value(value) => Some(value),
        TemperatureText::Empty | TemperatureText::Malformed => None,
    }
}

/// Plain leaf text of a node, excluding all descendant subtrees.
///
/// The source page interleaves icon markup with the literal text we want
/// (e.g. `<span><svg .../>20%</span>`), so reading the full descendant text
/// would pick up stray nested strings. Concatenating only the direct
/// text-node children isolates the trailing plain text without touching the
/// document.
#[must_use]
pub fn own_text(el: &ElementRef) -> String {
    let mut out = String::new();
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(&text.text);
        }
    }
    out.trim().to_string()
}

/// Full descendant text of a node, whitespace-collapsed; empty becomes `None`.
#[must_use]
pub fn label(el: &ElementRef) -> Option<String> {
    let joined = el.text().collect::<String>();
    let collapsed = joined.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Percentage string from a node's own leaf text, e.g. `"20%"`.
#[must_use]
pub fn percent(el: &ElementRef) -> Option<String> {
    let text = own_text(el);
    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use scraper::{Html, Selector};

    #[rstest]
    #[case("72°", Some(72))]
    #[case("-4°", Some(-4))]
    #[case("72", Some(72))]
    #[case("  81°  ", Some(81))]
    #[case("", None)]
    #[case("   ", None)]
    #[case("°", None)]
    #[case("--°", None)]
    #[case("N/A", None)]
    #[case("72°F", None)]
    fn test_temperature_normalization(#[case] raw: &str, #[case] expected: Option<i32>) {
        assert_eq!(temperature_f(raw), expected);
    }

    #[rstest]
    #[case("72°", TemperatureText::Value(72))]
    #[case("", TemperatureText::Empty)]
    #[case("   ", TemperatureText::Empty)]
    #[case("°", TemperatureText::Empty)]
    #[case("--°", TemperatureText::Malformed)]
    #[case("N/A", TemperatureText::Malformed)]
    fn test_temperature_classification(#[case] raw: &str, #[case] expected: TemperatureText) {
        assert_eq!(classify_temperature(raw), expected);
    }

    fn first_span(doc: &Html) -> ElementRef<'_> {
        let sel = Selector::parse("span.target").expect("selector literal must parse");
        doc.select(&sel).next().expect("fixture has target span")
    }

    #[test]
    fn test_own_text_excludes_descendants() {
        let doc = Html::parse_fragment(
            r#"<span class="target"><svg><title>rain icon</title></svg>20%</span>"#,
        );
        let el = first_span(&doc);
        assert_eq!(own_text(&el), "20%");
        // Document structure is untouched: the descendant text is still there
        assert!(el.text().collect::<String>().contains("rain icon"));
    }

    #[test]
    fn test_own_text_interleaved() {
        let doc = Html::parse_fragment(
            r#"<span class="target">Chance <b>of</b> rain</span>"#,
        );
        let el = first_span(&doc);
        assert_eq!(own_text(&el), "Chance  rain");
    }

    #[test]
    fn test_own_text_no_text_children() {
        let doc = Html::parse_fragment(r#"<span class="target"><i>icon</i></span>"#);
        let el = first_span(&doc);
        assert_eq!(own_text(&el), "");
        assert_eq!(percent(&el), None);
    }

    #[test]
    fn test_percent_keeps_literal() {
        let doc = Html::parse_fragment(r#"<span class="target"><i></i>65%</span>"#);
        let el = first_span(&doc);
        assert_eq!(percent(&el), Some("65%".to_string()));
    }

    #[test]
    fn test_label_collapses_whitespace() {
        let doc = Html::parse_fragment(
            "<span class=\"target\">Partly\n   Cloudy</span>",
        );
        let el = first_span(&doc);
        assert_eq!(label(&el), Some("Partly Cloudy".to_string()));
    }

    #[test]
    fn test_label_empty_is_none() {
        let doc = Html::parse_fragment(r#"<span class="target">   </span>"#);
        let el = first_span(&doc);
        assert_eq!(label(&el), None);
    }
}
