use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Who authored a conversation message.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// Typed by the person at the prompt.
    User,
    /// Derived from a backend response, or synthesized on failure.
    Assistant,
}

// =============================================================================
// Newtype Wrappers
// =============================================================================

/// Unique identifier for a conversation message.
///
/// Identity only; log position is the authoritative ordering key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unix timestamp in seconds since epoch.
///
/// Compared by value. Two Timestamps with the same inner value are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp())
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.0, 0).unwrap_or_default()
    }
}

// =============================================================================
// Chart Artifacts
// =============================================================================

/// A single trace within a chart: the declared trace kind plus whatever
/// fields the backend attached (axes, markers, colors).
///
/// Only `kind` is ever interpreted, to recognize geographic traces. Every
/// other field passes through to the renderer untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceSpec {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl TraceSpec {
    /// Reads a trace field as a numeric array.
    ///
    /// Returns None when the field is missing, not an array, or contains a
    /// non-numeric element.
    pub fn numeric_series(&self, key: &str) -> Option<Vec<f64>> {
        let values = self.fields.get(key)?.as_array()?;
        values.iter().map(|v| v.as_f64()).collect()
    }
}

/// An assistant-produced chart specification.
///
/// `series` carries the traces (wire name `data`); `layout` is an opaque bag
/// of rendering hints. A ChartSpec is exclusively owned by the message that
/// produced it; redisplay copies it rather than mutating it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "data", default)]
    pub series: Vec<TraceSpec>,
    #[serde(default)]
    pub layout: serde_json::Value,
}

impl ChartSpec {
    /// A chart with no traces has nothing to draw.
    pub fn is_renderable(&self) -> bool {
        !self.series.is_empty()
    }
}

// =============================================================================
// Geography
// =============================================================================

/// A geographic point in decimal degrees, as surfaced on the map view.
///
/// Always derived: either from an explicit backend location list or from a
/// geographic trace in the latest chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            label: None,
        }
    }

    pub fn labeled(latitude: f64, longitude: f64, label: String) -> Self {
        Self {
            latitude,
            longitude,
            label: Some(label),
        }
    }
}

// =============================================================================
// Entity Structs
// =============================================================================

/// A single entry in the conversation log.
///
/// Messages are immutable once appended. `created_at` is for display only
/// and never participates in ordering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: MessageRole,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// Chart produced by this turn. Never present on user messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSpec>,
    /// Query the backend generated for this turn. Never present on user
    /// messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_query: Option<String>,
}

impl Message {
    /// Builds a user message. User messages never carry artifacts.
    pub fn user(text: String) -> Self {
        Self {
            id: MessageId::new(),
            role: MessageRole::User,
            text,
            created_at: Utc::now(),
            chart: None,
            generated_query: None,
        }
    }

    /// Builds an assistant message with whatever artifacts the turn produced.
    pub fn assistant(text: String, chart: Option<ChartSpec>, generated_query: Option<String>) -> Self {
        Self {
            id: MessageId::new(),
            role: MessageRole::Assistant,
            text,
            created_at: Utc::now(),
            chart,
            generated_query,
        }
    }
}

/// The artifact slice of the most recent assistant turn, as consumed by the
/// dashboard surfaces.
///
/// Replaced wholesale on publication, never merged field-by-field across
/// turns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Latest chart, if the turn produced one.
    pub chart: Option<ChartSpec>,
    /// Latest generated query; empty means there is none to show.
    pub generated_query: String,
    /// Latest geographic points; empty means there are none to show.
    pub locations: Vec<GeoPoint>,
}

impl DashboardSnapshot {
    /// True when no surface has anything to display.
    pub fn is_empty(&self) -> bool {
        self.chart.is_none() && self.generated_query.is_empty() && self.locations.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
