use base64::{engine::general_purpose::STANDARD, Engine as _};
use rsa::Pkcs1v15Sign;
use sha2::{Digest, Sha256};

use cardgate_core::{canonical_message, Payload};

use crate::error::CryptoError;
use crate::keys::{PrivateKey, PublicKey};

fn digest(payload: &Payload) -> Vec<u8> {
    let message = canonical_message(payload);
    tracing::trace!(message_len = message.len(), "digesting canonical message");
    Sha256::digest(&message).to_vec()
}

/// Sign `payload`'s canonical message. Returns the base64-encoded signature.
pub fn sign(payload: &Payload, key: &PrivateKey) -> Result<String, CryptoError> {
    let raw = key
        .rsa()
        .sign(Pkcs1v15Sign::new::<Sha256>(), &digest(payload))
        .map_err(|e| CryptoError::SigningError(e.to_string()))?;
    Ok(STANDARD.encode(raw))
}

/// Sign with a PEM private key parsed on the spot.
pub fn sign_pem(payload: &Payload, private_key_pem: &str) -> Result<String, CryptoError> {
    sign(payload, &PrivateKey::from_pem(private_key_pem)?)
}

/// Check a raw (already base64-decoded) signature over `payload`.
///
/// Never errors: a malformed signature or a wrong digest is just `false`.
pub fn verify(payload: &Payload, signature: &[u8], key: &PublicKey) -> bool {
    key.rsa()
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest(payload), signature)
        .is_ok()
}

/// Like [`verify`], but with a PEM public key parsed at call time.
/// An unparsable key verifies nothing.
pub fn verify_pem(payload: &Payload, signature: &[u8], public_key_pem: &str) -> bool {
    match PublicKey::from_pem(public_key_pem) {
        Ok(key) => verify(payload, signature, &key),
        Err(e) => {
            tracing::warn!(error = %e, "public key rejected during verification");
            false
        }
    }
}

/// Verify a base64-encoded signature as carried on the wire.
pub fn verify_encoded(payload: &Payload, signature_b64: &str, key: &PublicKey) -> bool {
    match STANDARD.decode(signature_b64) {
        Ok(raw) => verify(payload, &raw, key),
        Err(_) => false,
    }
}
