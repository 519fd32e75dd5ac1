//! Cardgate client: signed calls against the card payment gateway API.
//!
//! [`GatewayClient`] assembles each request in the gateway's field order,
//! signs it with the merchant key, sends it over an [`HttpTransport`] and
//! hands back only responses whose signatures verify.

pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod transport;

pub use client::{endpoint_url, parse_base_url, signed_url, GatewayClient};
pub use config::{ClientConfig, GatewayConfig, HttpConfig, LoggingConfig, SANDBOX_BASE_URL};
pub use error::GatewayError;
pub use request::{OneclickInit, PaymentInit, MAX_DESCRIPTION_CHARS};
pub use transport::{HttpMethod, HttpResponse, HttpTransport, ReqwestTransport};
