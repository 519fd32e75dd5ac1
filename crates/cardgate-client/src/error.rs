use cardgate_core::CoreError;
use cardgate_crypto::{CryptoError, ValidationError};

/// Errors surfaced by the gateway client.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Unusable key material or configuration. Not retryable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Connection failure or timeout; no response was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// The gateway answered with a non-2xx status.
    #[error("gateway returned HTTP {status}")]
    HttpStatus { status: u16, body: String },

    /// The gateway answered, but not with a JSON object we can read.
    #[error("cannot decode gateway response: {0}")]
    Decode(String),

    /// A signature on the response or one of its extensions did not verify.
    #[error("gateway response failed verification: {0}")]
    Verification(String),

    /// The caller's arguments were rejected before anything was signed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl GatewayError {
    /// Whether the gateway could not be reached or refused the request.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus { .. })
    }
}

impl From<ValidationError> for GatewayError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Decode(msg) => Self::Decode(msg),
            ValidationError::Verification(msg) => Self::Verification(msg),
        }
    }
}

impl From<CryptoError> for GatewayError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::InvalidInput(msg) => Self::InvalidRequest(msg),
            other => Self::Configuration(other.to_string()),
        }
    }
}

impl From<CoreError> for GatewayError {
    fn from(err: CoreError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}
