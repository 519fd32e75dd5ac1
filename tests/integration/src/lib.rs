//! Fixtures shared by the cross-crate tests: a configured client and
//! gateway-side response builders.

use cardgate_client::{ClientConfig, GatewayClient};
use cardgate_core::Value;
use cardgate_crypto::testing;

pub const MERCHANT_ID: &str = "M1MIPS0000";
pub const DTTM: &str = "20240101120000";

/// A client configured the way a deployment would be, pointed at `base_url`.
pub fn client_for(base_url: &str) -> GatewayClient {
    let mut config = ClientConfig::default();
    config.gateway.merchant_id = MERCHANT_ID.into();
    config.gateway.base_url = base_url.into();
    config.gateway.private_key = testing::MERCHANT_PRIVATE_KEY_PEM.into();
    config.gateway.gateway_public_key = testing::GATEWAY_PUBLIC_KEY_PEM.into();
    config.http.timeout_secs = 5;
    GatewayClient::from_config(&config)
        .expect("fixture config builds a client")
        .with_clock(fixed_dttm)
}

fn fixed_dttm() -> String {
    DTTM.into()
}

/// A response object signed with the gateway fixture key.
pub fn gateway_signed<I, K, V>(pairs: I) -> serde_json::Value
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    testing::signed_object(&testing::gateway_key(), pairs)
}

/// A plain successful answer for `pay_id` in `payment_status`.
pub fn status_body(pay_id: &str, payment_status: i64) -> serde_json::Value {
    gateway_signed([
        ("payId", Value::from(pay_id)),
        ("dttm", DTTM.into()),
        ("resultCode", 0.into()),
        ("resultMessage", "OK".into()),
        ("paymentStatus", payment_status.into()),
    ])
}

/// A signed masked-card extension object.
pub fn masked_card_extension(tag: &str, long_masked_cln: &str) -> serde_json::Value {
    gateway_signed([
        ("extension", tag),
        ("dttm", DTTM),
        ("maskedCln", "****4242"),
        ("expiration", "12/30"),
        ("longMaskedCln", long_masked_cln),
    ])
}
