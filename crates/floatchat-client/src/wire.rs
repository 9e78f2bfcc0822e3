use serde::{Deserialize, Serialize};

// =============================================================================
// Request
// =============================================================================

/// Request body for `POST /chat`.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest {
    pub query: String,
}

// =============================================================================
// Success Payload
// =============================================================================

/// Raw success payload from `POST /chat`.
///
/// Deliberately loose: every field is optional so absent, null, or oddly
/// shaped values still deserialize. Interpretation and defaulting happen in
/// the normalizer, not here; the only hard requirement is that the body is a
/// JSON object.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatPayload {
    /// Narrative answer text.
    #[serde(default)]
    pub insights: Option<String>,
    /// Chart specification, passed through opaquely.
    #[serde(default)]
    pub plotly_json: Option<serde_json::Value>,
    /// Query the backend generated to answer the question.
    #[serde(default)]
    pub sql_query: Option<String>,
    /// Explicit geographic points, when the backend supplies them.
    #[serde(default)]
    pub locations: Option<serde_json::Value>,
}

// =============================================================================
// Error Body
// =============================================================================

/// Error body shape the backend uses for non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Extracts a server-supplied explanation from an error body, if any.
    ///
    /// Prefers `detail` over `message`. String values are used verbatim;
    /// structured values (validation error lists) are rendered compactly.
    pub(crate) fn explanation(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        let value = parsed.detail.as_ref().or(parsed.message.as_ref())?;
        Some(match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}
