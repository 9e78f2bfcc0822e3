//! Presentation panels over the dashboard snapshot.
//!
//! Each panel renders one snapshot field. An absent backing field becomes a
//! fixed placeholder, never an error. Visibility is shell-local state:
//! toggling a panel neither refetches nor republishes anything.

use std::fmt;

use floatchat_core::config::DashboardConfig;
use floatchat_core::{ChartSpec, DashboardSnapshot, GeoPoint};

/// Shown in the chart panel before any visualization exists.
pub const CHART_PLACEHOLDER: &str = "No visualization yet. Ask about the data to generate one.";
/// Shown in the map panel when no float locations are known.
pub const MAP_PLACEHOLDER: &str = "No float locations to display.";
/// Shown in the query panel before any SQL has been generated.
pub const QUERY_PLACEHOLDER: &str = "No SQL query generated yet.";

// =============================================================================
// Panel Kinds & Visibility
// =============================================================================

/// The three toggleable dashboard surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Chart,
    Map,
    Query,
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelKind::Chart => write!(f, "chart"),
            PanelKind::Map => write!(f, "map"),
            PanelKind::Query => write!(f, "query"),
        }
    }
}

/// Which panels the shell currently shows.
///
/// Purely local presentation state, separate from the snapshot; flipping a
/// flag has no effect on the log or the hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelVisibility {
    pub chart: bool,
    pub map: bool,
    pub query: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

impl PanelVisibility {
    /// Seed visibility from configuration.
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            chart: config.show_chart,
            map: config.show_map,
            query: config.show_query,
        }
    }

    /// Flip one panel, returning its new state.
    pub fn toggle(&mut self, kind: PanelKind) -> bool {
        let flag = match kind {
            PanelKind::Chart => &mut self.chart,
            PanelKind::Map => &mut self.map,
            PanelKind::Query => &mut self.query,
        };
        *flag = !*flag;
        *flag
    }

    /// Whether the given panel is currently shown.
    pub fn is_shown(&self, kind: PanelKind) -> bool {
        match kind {
            PanelKind::Chart => self.chart,
            PanelKind::Map => self.map,
            PanelKind::Query => self.query,
        }
    }
}

// =============================================================================
// Panel Content
// =============================================================================

/// Renderable content of one panel for a given snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelContent {
    /// Text the panel displays verbatim.
    Text(String),
    /// Fixed placeholder for an absent backing field.
    Placeholder(&'static str),
}

impl PanelContent {
    pub fn as_str(&self) -> &str {
        match self {
            PanelContent::Text(text) => text,
            PanelContent::Placeholder(text) => text,
        }
    }
}

/// Content of `kind` for `snapshot`.
pub fn panel_content(kind: PanelKind, snapshot: &DashboardSnapshot) -> PanelContent {
    match kind {
        PanelKind::Chart => chart_content(snapshot),
        PanelKind::Map => map_content(snapshot),
        PanelKind::Query => query_content(snapshot),
    }
}

/// Display copy of a stored chart.
///
/// Overlays presentation defaults (currently `layout.autosize`) on a clone.
/// The stored artifact is never touched, and hints the backend already set
/// are kept as-is.
pub fn display_chart(chart: &ChartSpec) -> ChartSpec {
    let mut copy = chart.clone();
    match &mut copy.layout {
        serde_json::Value::Object(layout) => {
            layout
                .entry("autosize".to_string())
                .or_insert(serde_json::Value::Bool(true));
        }
        serde_json::Value::Null => {
            copy.layout = serde_json::json!({ "autosize": true });
        }
        // A non-object layout is the backend's problem; pass it through.
        _ => {}
    }
    copy
}

// -- Private helpers --

fn chart_content(snapshot: &DashboardSnapshot) -> PanelContent {
    match &snapshot.chart {
        Some(chart) => {
            let display = display_chart(chart);
            match serde_json::to_string_pretty(&display) {
                Ok(text) => PanelContent::Text(text),
                Err(_) => PanelContent::Placeholder(CHART_PLACEHOLDER),
            }
        }
        None => PanelContent::Placeholder(CHART_PLACEHOLDER),
    }
}

fn map_content(snapshot: &DashboardSnapshot) -> PanelContent {
    if snapshot.locations.is_empty() {
        return PanelContent::Placeholder(MAP_PLACEHOLDER);
    }
    let lines: Vec<String> = snapshot.locations.iter().map(format_point).collect();
    PanelContent::Text(lines.join("\n"))
}

fn query_content(snapshot: &DashboardSnapshot) -> PanelContent {
    if snapshot.generated_query.is_empty() {
        PanelContent::Placeholder(QUERY_PLACEHOLDER)
    } else {
        PanelContent::Text(snapshot.generated_query.clone())
    }
}

fn format_point(point: &GeoPoint) -> String {
    match &point.label {
        Some(label) => format!(
            "{}: {:.4}, {:.4}",
            label, point.latitude, point.longitude
        ),
        None => format!("{:.4}, {:.4}", point.latitude, point.longitude),
    }
}

// =============================================================================
// Tests
// =============================================================================
