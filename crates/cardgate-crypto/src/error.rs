/// Key handling and signing errors.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("signing failed: {0}")]
    SigningError(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Why a gateway response was not accepted.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The body is not a JSON object, or a known field has the wrong shape.
    #[error("cannot decode response: {0}")]
    Decode(String),

    /// The signature of the response or of one of its extensions is missing or wrong.
    #[error("signature verification failed: {0}")]
    Verification(String),
}
