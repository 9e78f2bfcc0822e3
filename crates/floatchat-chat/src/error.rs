//! Error types for the conversation engine.

/// Errors a submission can be rejected with.
///
/// These are the only errors `submit` surfaces. Transport failures never
/// reach the caller; they are converted into a synthetic assistant message
/// and a `QueryFailed` notice.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("query cannot be empty")]
    EmptyQuery,
    #[error("a request is already in flight")]
    RequestInFlight,
}
