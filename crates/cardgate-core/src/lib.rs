//! Core types for the Cardgate signed payment protocol.
//!
//! Payloads are explicit ordered `(name, value)` sequences: the field order is
//! part of the wire contract because it fixes the canonical message that gets
//! signed.

pub mod case;
pub mod error;
pub mod message;
pub mod order;
pub mod payload;
pub mod timestamp;
pub mod types;

pub use case::{convert_keys_to_camel_case, to_camel_case};
pub use error::CoreError;
pub use message::{canonical_message, canonical_string};
pub use order::{cart_value, CartItem, Customer, CustomerAccount, CustomerLogin};
pub use payload::{Payload, Value};
pub use timestamp::{dttm, format_dttm, DTTM_FORMAT};
pub use types::{
    CardProvider, Currency, Endpoint, ExtensionKind, Language, PayOperation, PaymentStatus,
    ResultCode, ReturnMethod,
};
