//! Signing and verification for the Cardgate payment protocol.
//!
//! Requests are signed with the merchant's RSA key; responses are checked
//! against the gateway's public key. Both sides digest the canonical message
//! of `cardgate-core` with SHA-256 and use PKCS#1 v1.5 signatures, carried as
//! base64 in a trailing `signature` field.

pub mod envelope;
pub mod error;
pub mod keys;
pub mod response;
pub mod signing;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use envelope::{assemble, SignedEnvelope, SIGNATURE_FIELD};
pub use error::{CryptoError, ValidationError};
pub use keys::{PrivateKey, PublicKey};
pub use response::{
    validate_response, verify_gateway_return, MaskedCardExtension, UnverifiedResponse,
    VerifiedResponse, RESPONSE_FIELDS,
};
pub use signing::{sign, sign_pem, verify, verify_encoded, verify_pem};
