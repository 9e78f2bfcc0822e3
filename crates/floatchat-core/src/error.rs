use thiserror::Error;

/// Top-level error type for the FloatChat system.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for FloatChatError` so that the `?` operator works
/// seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FloatChatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for FloatChatError {
    fn from(err: toml::de::Error) -> Self {
        FloatChatError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for FloatChatError {
    fn from(err: toml::ser::Error) -> Self {
        FloatChatError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for FloatChatError {
    fn from(err: serde_json::Error) -> Self {
        FloatChatError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for FloatChat operations.
pub type Result<T> = std::result::Result<T, FloatChatError>;
