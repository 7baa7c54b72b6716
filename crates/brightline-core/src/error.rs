use thiserror::Error;

/// Top-level error type for the Brightline backend.
///
/// Subsystem crates define their own error types; this one covers the
/// shared concerns (configuration loading, I/O and serialization) that
/// every crate can surface through `?`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudioError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for StudioError {
    fn from(err: toml::de::Error) -> Self {
        StudioError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for StudioError {
    fn from(err: toml::ser::Error) -> Self {
        StudioError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for StudioError {
    fn from(err: serde_json::Error) -> Self {
        StudioError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Brightline operations.
pub type Result<T> = std::result::Result<T, StudioError>;
