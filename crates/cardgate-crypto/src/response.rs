//! Gateway response validation.
//!
//! A response is parsed into an [`UnverifiedResponse`], which exposes no data.
//! Only [`UnverifiedResponse::verify`] turns it into a [`VerifiedResponse`],
//! and it does so only when the main signature and every recognised extension
//! signature check out.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use cardgate_core::{CardProvider, ExtensionKind, Payload, PaymentStatus, ResultCode, Value};

use crate::envelope::SIGNATURE_FIELD;
use crate::error::ValidationError;
use crate::keys::PublicKey;
use crate::signing::verify_encoded;

/// Response fields covered by the gateway signature, in signing order.
pub const RESPONSE_FIELDS: [&str; 8] = [
    "payId",
    "customerId",
    "dttm",
    "resultCode",
    "resultMessage",
    "paymentStatus",
    "authCode",
    "merchantData",
];

/// Signed fields that are integers even when delivered as text.
const INTEGER_FIELDS: [&str; 2] = ["resultCode", "paymentStatus"];

const EXTENSIONS_FIELD: &str = "extensions";
const EXTENSION_TAG_FIELD: &str = "extension";

#[derive(Debug)]
struct SignedPart {
    fields: Payload,
    signature: Option<String>,
}

impl SignedPart {
    fn check(&self, key: &PublicKey, what: &str) -> Result<(), ValidationError> {
        let signature = self.signature.as_deref().ok_or_else(|| {
            ValidationError::Verification(format!("{what} carries no signature"))
        })?;
        if verify_encoded(&self.fields, signature, key) {
            Ok(())
        } else {
            tracing::warn!(part = what, "gateway signature rejected");
            Err(ValidationError::Verification(format!("cannot verify {what}")))
        }
    }
}

/// A parsed gateway response whose signatures have not been checked yet.
#[derive(Debug)]
pub struct UnverifiedResponse {
    main: SignedPart,
    extensions: Vec<(ExtensionKind, SignedPart)>,
}

impl UnverifiedResponse {
    /// Parse a JSON response body.
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        let mut data = Payload::from_json_slice(body)
            .map_err(|e| ValidationError::Decode(e.to_string()))?;
        let signature = take_signature(&mut data);

        let extensions = match data.remove(EXTENSIONS_FIELD) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::List(items)) => items.into_iter().filter_map(parse_extension).collect(),
            Some(_) => {
                return Err(ValidationError::Decode(
                    "`extensions` is not an array".into(),
                ))
            }
        };

        Ok(Self {
            main: SignedPart {
                fields: data.project(&RESPONSE_FIELDS),
                signature,
            },
            extensions,
        })
    }

    /// Build from the flat string mapping of a gateway redirect (query or form post).
    ///
    /// The gateway signs `resultCode` and `paymentStatus` as integers, so
    /// they are coerced before verification; a non-integer is a decode error.
    pub fn from_form<I, K, V>(data: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut data: Payload = data
            .into_iter()
            .map(|(k, v)| (k.into(), Value::Str(v.into())))
            .collect();
        let signature = take_signature(&mut data);
        Ok(Self {
            main: SignedPart {
                fields: coerce_integers(data.project(&RESPONSE_FIELDS))?,
                signature,
            },
            extensions: Vec::new(),
        })
    }

    /// Check every signature against the gateway key.
    ///
    /// A single bad extension rejects the whole response.
    pub fn verify(self, key: &PublicKey) -> Result<VerifiedResponse, ValidationError> {
        self.main.check(key, "response")?;

        let mut extensions = Vec::with_capacity(self.extensions.len());
        for (kind, part) in self.extensions {
            part.check(key, kind.tag())?;
            extensions.push(MaskedCardExtension {
                kind,
                payload: part.fields,
            });
        }

        let payload = coerce_integers(self.main.fields)?;
        Ok(VerifiedResponse {
            payload,
            extensions,
        })
    }
}

fn take_signature(data: &mut Payload) -> Option<String> {
    match data.remove(SIGNATURE_FIELD) {
        Some(Value::Str(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

fn parse_extension(item: Value) -> Option<(ExtensionKind, SignedPart)> {
    let Value::Object(mut fields) = item else {
        return None;
    };
    let tag = fields.get(EXTENSION_TAG_FIELD).and_then(Value::as_str)?;
    let Some(kind) = ExtensionKind::from_tag(tag) else {
        tracing::debug!(extension = tag, "skipping unsupported response extension");
        return None;
    };
    let signature = take_signature(&mut fields);
    Some((
        kind,
        SignedPart {
            fields: fields.project(&ExtensionKind::SIGNED_FIELDS),
            signature,
        },
    ))
}

fn coerce_integers(mut payload: Payload) -> Result<Payload, ValidationError> {
    for field in INTEGER_FIELDS {
        let Some(value) = payload.get(field) else {
            continue;
        };
        let number = value.coerce_int().ok_or_else(|| {
            ValidationError::Decode(format!("`{field}` is not an integer: {value}"))
        })?;
        payload.insert(field, number);
    }
    Ok(payload)
}

/// Parse and verify a JSON response body in one step.
pub fn validate_response(body: &[u8], key: &PublicKey) -> Result<VerifiedResponse, ValidationError> {
    UnverifiedResponse::from_json(body)?.verify(key)
}

/// Verify the data the gateway hands back through the customer's browser.
pub fn verify_gateway_return<I, K, V>(
    data: I,
    key: &PublicKey,
) -> Result<VerifiedResponse, ValidationError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    UnverifiedResponse::from_form(data)?.verify(key)
}

/// A masked-card extension whose signature has been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedCardExtension {
    kind: ExtensionKind,
    payload: Payload,
}

impl MaskedCardExtension {
    pub fn kind(&self) -> ExtensionKind {
        self.kind
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn dttm(&self) -> Option<&str> {
        self.payload.get("dttm").and_then(Value::as_str)
    }

    /// Short masked number, e.g. `****1234`.
    pub fn masked_cln(&self) -> Option<&str> {
        self.payload.get("maskedCln").and_then(Value::as_str)
    }

    /// Card expiry as `MM/YY`.
    pub fn expiration(&self) -> Option<&str> {
        self.payload.get("expiration").and_then(Value::as_str)
    }

    /// Masked number keeping the first six and last four digits.
    pub fn long_masked_cln(&self) -> Option<&str> {
        self.payload.get("longMaskedCln").and_then(Value::as_str)
    }

    pub fn card_provider(&self) -> Option<CardProvider> {
        self.long_masked_cln().and_then(CardProvider::detect)
    }
}

impl Serialize for MaskedCardExtension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.payload.serialize(serializer)
    }
}

/// A gateway response whose signatures have all been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedResponse {
    payload: Payload,
    extensions: Vec<MaskedCardExtension>,
}

impl VerifiedResponse {
    /// The signed response fields, with `resultCode`/`paymentStatus` as integers.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn extensions(&self) -> &[MaskedCardExtension] {
        &self.extensions
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.payload.get(field)
    }

    pub fn pay_id(&self) -> Option<&str> {
        self.get("payId").and_then(Value::as_str)
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.get("customerId").and_then(Value::as_str)
    }

    pub fn dttm(&self) -> Option<&str> {
        self.get("dttm").and_then(Value::as_str)
    }

    pub fn result_code(&self) -> Option<ResultCode> {
        self.get("resultCode")
            .and_then(Value::as_i64)
            .map(ResultCode::from_code)
    }

    pub fn result_message(&self) -> Option<&str> {
        self.get("resultMessage").and_then(Value::as_str)
    }

    pub fn payment_status(&self) -> Option<PaymentStatus> {
        self.get("paymentStatus")
            .and_then(Value::as_i64)
            .map(PaymentStatus::from_code)
    }

    pub fn auth_code(&self) -> Option<&str> {
        self.get("authCode").and_then(Value::as_str)
    }

    pub fn merchant_data(&self) -> Option<&str> {
        self.get("merchantData").and_then(Value::as_str)
    }

    pub fn into_parts(self) -> (Payload, Vec<MaskedCardExtension>) {
        (self.payload, self.extensions)
    }
}

impl Serialize for VerifiedResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let with_extensions = !self.extensions.is_empty();
        let len = self.payload.len() + usize::from(with_extensions);
        let mut map = serializer.serialize_map(Some(len))?;
        for (k, v) in self.payload.iter() {
            map.serialize_entry(k, v)?;
        }
        if with_extensions {
            map.serialize_entry(EXTENSIONS_FIELD, &self.extensions)?;
        }
        map.end()
    }
}
