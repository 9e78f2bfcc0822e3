use thiserror::Error;

/// Errors surfaced by the transport client.
///
/// Display strings double as the user-facing failure description embedded in
/// synthetic assistant messages, so they stay readable rather than technical.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced an HTTP response (connect, DNS, timeout).
    #[error("could not reach the backend: {0}")]
    Unreachable(String),

    /// The backend answered non-2xx. `detail` prefers the server-supplied
    /// `detail` or `message` field, falling back to the bare status line.
    #[error("{detail}")]
    Backend { status: u16, detail: String },

    /// A 2xx response whose body was not the promised JSON object.
    #[error("the backend returned an unreadable response: {0}")]
    MalformedResponse(String),

    /// The HTTP client itself could not be constructed.
    #[error("failed to initialize HTTP client: {0}")]
    Initialization(String),
}

impl From<TransportError> for floatchat_core::FloatChatError {
    fn from(err: TransportError) -> Self {
        floatchat_core::FloatChatError::Transport(err.to_string())
    }
}
