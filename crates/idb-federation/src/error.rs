//! Federation error types.
//!
//! The taxonomy separates setup-time failures (configuration) from
//! per-call failures (malformed keys, malformed rows, store errors).
//! Credential mismatches and empty lookups are NOT errors: providers
//! report them as `false`/`None` so callers can tell a negative result
//! from a failure.

use thiserror::Error;

/// Errors that can occur during federation operations.
#[derive(Debug, Error)]
pub enum FederationError {
    /// Invalid provider configuration. Surfaced at setup time and fatal
    /// to provider activation.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed composite storage key.
    #[error("Invalid storage key: {0}")]
    InvalidStorageKey(String),

    /// Malformed or incomplete row data (e.g. an expected column is
    /// absent from the result set).
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Underlying store failure, wrapped with the driver's original
    /// message. Never retried and never swallowed at this layer.
    #[error("Store error: {0}")]
    Store(String),
}

impl FederationError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates an invalid storage key error.
    #[must_use]
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidStorageKey(msg.into())
    }

    /// Creates an invalid data error.
    #[must_use]
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Creates a store error.
    #[must_use]
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Checks if this is a configuration error.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Checks if this error is fatal to a single call rather than to the
    /// provider as a whole.
    #[must_use]
    pub const fn is_call_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidStorageKey(_) | Self::InvalidData(_) | Self::Store(_)
        )
    }
}

/// Result type for federation operations.
pub type FederationResult<T> = Result<T, FederationError>;
