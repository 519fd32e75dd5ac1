/// Core protocol errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("payload validation failed: {0}")]
    ValidationError(String),

    #[error("deserialization error: {0}")]
    DeserializationError(#[from] serde_json::Error),
}
