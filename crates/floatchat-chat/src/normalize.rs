//! Backend payload normalization.
//!
//! The backend's response shape varies with the question asked: narrative
//! only, narrative plus chart, chart plus SQL, geographic traces, explicit
//! coordinate lists. `normalize` flattens every variation into one canonical
//! `NormalizedResponse` so the rest of the engine never touches raw JSON.
//!
//! Normalization is total: any payload that deserialized yields a usable
//! response. Missing or malformed fields degrade to their empty forms.

use floatchat_client::ChatPayload;
use floatchat_core::{ChartSpec, GeoPoint};

/// Narrative used when the backend returns no usable answer text.
pub const FALLBACK_NARRATIVE: &str =
    "I couldn't find an answer for that. Try asking about temperature, salinity, or float locations.";

/// Canonical presentation artifacts derived from one backend response.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResponse {
    /// Narrative answer text. Never empty.
    pub narrative: String,
    /// Renderable chart, when the payload carried one.
    pub chart: Option<ChartSpec>,
    /// Generated SQL text. Empty when the backend supplied none.
    pub generated_query: String,
    /// Geographic points for the map surface.
    pub locations: Vec<GeoPoint>,
}

impl NormalizedResponse {
    /// Whether the response carried anything beyond narrative text.
    pub fn has_artifacts(&self) -> bool {
        self.chart.is_some() || !self.generated_query.is_empty() || !self.locations.is_empty()
    }
}

/// Derive canonical artifacts from a backend payload.
///
/// Deterministic and pure. Location precedence: an explicit `locations`
/// list wins whenever at least one entry parses; otherwise a leading
/// `scattermapbox` trace is mined for coordinate pairs; otherwise empty.
pub fn normalize(payload: &ChatPayload) -> NormalizedResponse {
    let narrative = match &payload.insights {
        Some(text) if !text.trim().is_empty() => text.clone(),
        _ => FALLBACK_NARRATIVE.to_string(),
    };

    let chart = payload.plotly_json.as_ref().and_then(parse_chart);

    let generated_query = payload.sql_query.clone().unwrap_or_default();

    let locations = explicit_locations(payload).unwrap_or_else(|| {
        chart
            .as_ref()
            .map(mapbox_locations)
            .unwrap_or_default()
    });

    NormalizedResponse {
        narrative,
        chart,
        generated_query,
        locations,
    }
}

// -- Private helpers --

/// Parse a `plotly_json` value into a chart, keeping it only when there is
/// something to draw. Anything malformed degrades to `None`, silently.
fn parse_chart(value: &serde_json::Value) -> Option<ChartSpec> {
    let chart: ChartSpec = serde_json::from_value(value.clone()).ok()?;
    if chart.is_renderable() {
        Some(chart)
    } else {
        None
    }
}

/// Explicit backend-supplied coordinates, when at least one entry parses.
///
/// Entries that fail to parse are dropped individually; `None` means the
/// whole list is unusable and the caller should fall back to the chart.
fn explicit_locations(payload: &ChatPayload) -> Option<Vec<GeoPoint>> {
    let entries = payload.locations.as_ref()?.as_array()?;
    let points: Vec<GeoPoint> = entries
        .iter()
        .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
        .collect();
    if points.is_empty() {
        None
    } else {
        Some(points)
    }
}

/// Coordinate pairs mined from a leading `scattermapbox` trace.
///
/// Pairs are zipped index-by-index; indices past the shorter of the two
/// arrays are dropped. Labels are positional ("Point 1", "Point 2", ...).
fn mapbox_locations(chart: &ChartSpec) -> Vec<GeoPoint> {
    let trace = match chart.series.first() {
        Some(trace) if trace.kind == "scattermapbox" => trace,
        _ => return Vec::new(),
    };
    match (trace.numeric_series("lat"), trace.numeric_series("lon")) {
        (Some(lats), Some(lons)) => lats
            .into_iter()
            .zip(lons)
            .enumerate()
            .map(|(index, (lat, lon))| {
                GeoPoint::labeled(lat, lon, format!("Point {}", index + 1))
            })
            .collect(),
        _ => Vec::new(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> ChatPayload {
        serde_json::from_value(value).unwrap()
    }

    fn mapbox_payload() -> ChatPayload {
        payload(json!({
            "insights": "Found 2 float profiles in the Arabian Sea.",
            "plotly_json": {
                "data": [{"type": "scattermapbox", "lat": [10, 20], "lon": [70, 80]}],
                "layout": {"mapbox": {"style": "open-street-map"}}
            },
            "sql_query": "SELECT latitude, longitude FROM profiles"
        }))
    }

    // ---- Narrative ----

    #[test]
    fn test_insights_pass_through_verbatim() {
        let normalized = normalize(&payload(json!({
            "insights": "Average salinity was 35.1 PSU."
        })));
        assert_eq!(normalized.narrative, "Average salinity was 35.1 PSU.");
    }

    #[test]
    fn test_missing_insights_use_fallback() {
        let normalized = normalize(&payload(json!({})));
        assert_eq!(normalized.narrative, FALLBACK_NARRATIVE);
    }

    #[test]
    fn test_blank_insights_use_fallback() {
        let normalized = normalize(&payload(json!({"insights": "   \n\t "})));
        assert_eq!(normalized.narrative, FALLBACK_NARRATIVE);
    }

    #[test]
    fn test_narrative_is_never_empty() {
        assert!(!FALLBACK_NARRATIVE.is_empty());
        let normalized = normalize(&payload(json!({"insights": ""})));
        assert!(!normalized.narrative.is_empty());
    }

    // ---- Chart ----

    #[test]
    fn test_valid_chart_is_kept() {
        let normalized = normalize(&payload(json!({
            "plotly_json": {
                "data": [
                    {"type": "scatter", "x": [5.0, 10.0], "y": [28.4, 26.9]},
                    {"type": "scatter", "x": [5.0, 10.0], "y": [35.0, 35.2]}
                ],
                "layout": {"yaxis": {"autorange": "reversed"}}
            }
        })));
        let chart = normalized.chart.expect("chart should survive");
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].kind, "scatter");
        assert_eq!(chart.layout["yaxis"]["autorange"], "reversed");
    }

    #[test]
    fn test_absent_chart_is_none() {
        let normalized = normalize(&payload(json!({"insights": "text only"})));
        assert!(normalized.chart.is_none());
    }

    #[test]
    fn test_null_chart_is_none() {
        let normalized = normalize(&payload(json!({"plotly_json": null})));
        assert!(normalized.chart.is_none());
    }

    #[test]
    fn test_chart_without_traces_is_dropped() {
        let normalized = normalize(&payload(json!({
            "plotly_json": {"data": [], "layout": {"title": "empty"}}
        })));
        assert!(normalized.chart.is_none());

        let normalized = normalize(&payload(json!({
            "plotly_json": {"layout": {"title": "no data key"}}
        })));
        assert!(normalized.chart.is_none());
    }

    #[test]
    fn test_malformed_chart_degrades_to_none() {
        let normalized = normalize(&payload(json!({
            "insights": "still fine",
            "plotly_json": "<html>not a chart</html>"
        })));
        assert!(normalized.chart.is_none());
        assert_eq!(normalized.narrative, "still fine");

        let normalized = normalize(&payload(json!({
            "plotly_json": {"data": ["not a trace object"]}
        })));
        assert!(normalized.chart.is_none());
    }

    // ---- Generated query ----

    #[test]
    fn test_sql_query_pass_through() {
        let normalized = normalize(&payload(json!({
            "sql_query": "SELECT AVG(temperature) FROM measurements"
        })));
        assert_eq!(
            normalized.generated_query,
            "SELECT AVG(temperature) FROM measurements"
        );
    }

    #[test]
    fn test_missing_sql_query_is_empty() {
        let normalized = normalize(&payload(json!({})));
        assert_eq!(normalized.generated_query, "");
    }

    // ---- Locations ----

    #[test]
    fn test_explicit_locations_used_verbatim() {
        let normalized = normalize(&payload(json!({
            "locations": [
                {"lat": -5.25, "lon": 72.5, "label": "Float 2902746"},
                {"lat": 12.0, "lon": 68.0}
            ]
        })));
        assert_eq!(
            normalized.locations,
            vec![
                GeoPoint::labeled(-5.25, 72.5, "Float 2902746".to_string()),
                GeoPoint::new(12.0, 68.0),
            ]
        );
    }

    #[test]
    fn test_explicit_locations_beat_the_mapbox_heuristic() {
        let mut payload = mapbox_payload();
        payload.locations = Some(json!([{"lat": 1.0, "lon": 2.0, "label": "explicit"}]));

        let normalized = normalize(&payload);
        assert_eq!(
            normalized.locations,
            vec![GeoPoint::labeled(1.0, 2.0, "explicit".to_string())]
        );
    }

    #[test]
    fn test_unparseable_explicit_entries_are_dropped_individually() {
        let normalized = normalize(&payload(json!({
            "locations": [
                {"lat": "north", "lon": 72.5},
                {"lat": 12.0, "lon": 68.0}
            ]
        })));
        assert_eq!(normalized.locations, vec![GeoPoint::new(12.0, 68.0)]);
    }

    #[test]
    fn test_wholly_unparseable_explicit_list_falls_back_to_chart() {
        let mut payload = mapbox_payload();
        payload.locations = Some(json!(["garbage", 42]));

        let normalized = normalize(&payload);
        assert_eq!(normalized.locations.len(), 2);
        assert_eq!(normalized.locations[0].label.as_deref(), Some("Point 1"));
    }

    #[test]
    fn test_mapbox_heuristic_builds_labeled_points() {
        let normalized = normalize(&mapbox_payload());
        assert_eq!(
            normalized.locations,
            vec![
                GeoPoint::labeled(10.0, 70.0, "Point 1".to_string()),
                GeoPoint::labeled(20.0, 80.0, "Point 2".to_string()),
            ]
        );
    }

    #[test]
    fn test_mapbox_heuristic_zips_to_the_shorter_array() {
        let normalized = normalize(&payload(json!({
            "plotly_json": {
                "data": [{"type": "scattermapbox", "lat": [10, 20, 30], "lon": [70]}]
            }
        })));
        assert_eq!(
            normalized.locations,
            vec![GeoPoint::labeled(10.0, 70.0, "Point 1".to_string())]
        );
    }

    #[test]
    fn test_non_mapbox_chart_yields_no_locations() {
        let normalized = normalize(&payload(json!({
            "plotly_json": {
                "data": [{"type": "scatter", "lat": [10, 20], "lon": [70, 80]}]
            }
        })));
        assert!(normalized.locations.is_empty());
    }

    #[test]
    fn test_mapbox_with_bad_coordinate_arrays_yields_no_locations() {
        let normalized = normalize(&payload(json!({
            "plotly_json": {
                "data": [{"type": "scattermapbox", "lat": [10, "x"], "lon": [70, 80]}]
            }
        })));
        assert!(normalized.locations.is_empty());

        let normalized = normalize(&payload(json!({
            "plotly_json": {
                "data": [{"type": "scattermapbox", "lat": [10, 20]}]
            }
        })));
        assert!(normalized.locations.is_empty());
    }

    #[test]
    fn test_heuristic_only_reads_the_first_trace() {
        let normalized = normalize(&payload(json!({
            "plotly_json": {
                "data": [
                    {"type": "scatter", "x": [1], "y": [2]},
                    {"type": "scattermapbox", "lat": [10], "lon": [70]}
                ]
            }
        })));
        assert!(normalized.locations.is_empty());
    }

    // ---- Totality & artifacts ----

    #[test]
    fn test_normalize_is_deterministic() {
        let payload = mapbox_payload();
        assert_eq!(normalize(&payload), normalize(&payload));
    }

    #[test]
    fn test_insights_only_payload_defaults_everything_else() {
        let normalized = normalize(&payload(json!({"insights": "Just words."})));
        assert_eq!(normalized.narrative, "Just words.");
        assert!(normalized.chart.is_none());
        assert_eq!(normalized.generated_query, "");
        assert!(normalized.locations.is_empty());
        assert!(!normalized.has_artifacts());
    }

    #[test]
    fn test_has_artifacts_for_each_artifact_kind() {
        let with_chart = normalize(&payload(json!({
            "plotly_json": {"data": [{"type": "scatter", "y": [1]}]}
        })));
        assert!(with_chart.has_artifacts());

        let with_query = normalize(&payload(json!({"sql_query": "SELECT 1"})));
        assert!(with_query.has_artifacts());

        let with_locations = normalize(&payload(json!({
            "locations": [{"lat": 0.0, "lon": 0.0}]
        })));
        assert!(with_locations.has_artifacts());
    }

    #[test]
    fn test_empty_payload_normalizes_to_fallback_only() {
        let normalized = normalize(&ChatPayload::default());
        assert_eq!(normalized.narrative, FALLBACK_NARRATIVE);
        assert!(!normalized.has_artifacts());
    }
}
