use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use cardgate_core::{Payload, Value};

use crate::error::CryptoError;
use crate::keys::PrivateKey;
use crate::signing::sign;

/// Name of the trailing signature field on every signed object.
pub const SIGNATURE_FIELD: &str = "signature";

/// A request payload plus its signature, ready to transmit.
///
/// Serializes as the payload fields in order followed by `signature`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    payload: Payload,
    signature: String,
}

impl SignedEnvelope {
    /// The signed fields, without the signature.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Base64 signature.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// All fields with `signature` appended last.
    pub fn to_payload(&self) -> Payload {
        let mut out = self.payload.clone();
        out.insert(SIGNATURE_FIELD, self.signature.as_str());
        out
    }

    /// Field values in order, signature last, as they appear in GET URLs.
    pub fn path_segments(&self) -> Vec<String> {
        self.payload
            .values()
            .map(Value::to_message_text)
            .chain(std::iter::once(self.signature.clone()))
            .collect()
    }
}

impl Serialize for SignedEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.payload.len() + 1))?;
        for (k, v) in self.payload.iter() {
            map.serialize_entry(k, v)?;
        }
        map.serialize_entry(SIGNATURE_FIELD, &self.signature)?;
        map.end()
    }
}

/// Build and sign the payload for one gateway operation.
///
/// Pairs must arrive in the gateway's documented order for the operation;
/// they are never reordered. Empty values (null, `""`, `[]`, `{}`) are
/// dropped before signing, while `0` and `false` are kept.
pub fn assemble<I, K, V>(key: &PrivateKey, pairs: I) -> Result<SignedEnvelope, CryptoError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    let mut payload = Payload::new();
    for (name, value) in pairs {
        let name = name.into();
        if name == SIGNATURE_FIELD {
            return Err(CryptoError::InvalidInput(format!(
                "`{SIGNATURE_FIELD}` is reserved for the computed signature"
            )));
        }
        let value = value.into();
        if !value.is_empty() {
            payload.insert(name, value);
        }
    }

    let signature = sign(&payload, key)?;
    tracing::debug!(fields = payload.len(), "assembled signed payload");
    Ok(SignedEnvelope { payload, signature })
}
