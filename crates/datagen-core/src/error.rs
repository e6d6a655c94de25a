use thiserror::Error;

/// Core error type shared across Datagen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A request is structurally unusable (e.g. zero records).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// A value could not be interpreted as the expected kind.
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Convenience alias for results returned by Datagen crates.
pub type Result<T> = std::result::Result<T, Error>;
