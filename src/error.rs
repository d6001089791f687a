/// Errors raised while building durations, policies or their configuration.
///
/// The lifecycle queries themselves are total and never produce one of these.
#[derive(Debug, thiserror::Error)]
pub enum ExpiryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid expiry configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("failed to encode expiry configuration: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Result type alias.
pub type ExpiryResult<T> = Result<T, ExpiryError>;

impl ExpiryError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ExpiryError::InvalidArgument(msg.into())
    }
}
