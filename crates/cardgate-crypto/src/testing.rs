//! Fixture keys and gateway-side helpers for tests.

use cardgate_core::Value;

use crate::envelope::assemble;
use crate::keys::{PrivateKey, PublicKey};

pub const MERCHANT_PRIVATE_KEY_PEM: &str = include_str!("../../../fixtures/merchant.key");
pub const MERCHANT_PRIVATE_KEY_PKCS8_PEM: &str = include_str!("../../../fixtures/merchant.pk8.key");
pub const MERCHANT_PUBLIC_KEY_PEM: &str = include_str!("../../../fixtures/merchant.pub");
pub const GATEWAY_PRIVATE_KEY_PEM: &str = include_str!("../../../fixtures/gateway.key");
pub const GATEWAY_PUBLIC_KEY_PEM: &str = include_str!("../../../fixtures/gateway.pub");

/// Gateway signature over `M|20240101120000|0|OK`.
pub const ECHO_SIGNATURE: &str = "ikcQ9swGr/XyE4zFNvRh80voOjjhPb9o0XdOHsPx4lT7KgkrotH/l/vI7XIoVeGqtE/hhRhkcaJmw3AiWlbT27eEDqD0NrOXDv4IkdDn9+9fu8JBhJf0O0gWGBeSh2tdtNx8NwBtdA0E0Wbd8ildo6T8mcyq+HDTPtfSOi6dp2ziAeGPlmyeS8kFtbjrNKSbJwBTUhdETHpZYNQUH6MOJxZN721LD392HYGv26ttdPz8xpkTDw5cXUJf7Iq8RSK3cI3kD1bRRMqNmdj3buiLFZRSM1OQyjGF5Qu6mcPhJ/TmKGizC0a/relrX33q5nIaxUpDfd9j9IXQFVPfZ6hIkg==";

/// Gateway signature over `0|1` (resultCode 0, paymentStatus 1).
pub const RETURN_SIGNATURE: &str = "HJP4ZSElITxbo5e7zW7HEt7WK0uAnzXFonPqtKtFtVym+3uY9zcB3ha66LTnstKMfAoh7hCYAWP7MrVwte000tf0B46xfPFLbobWwxopML5Ic4X7XWKl2uBzdL+92LO9UYZBpET0yjaRNqhqyI0FwoMHSuzG4cmjizb5jxzgtGwuI3ae/cnYyoT45d0DmWhG1WzO1TjwuaduUiPfujy1FqrOz5o0Oc4yS8HWgyl9aVcn372G4N7CR46EveqrW0n8KiAFO0zd50ZJ64qTNaz0/Hky2PqdrseOuUH/cKCq2P6/VUecuQ6kHKz0cAkmZ2POcQROx7ULwumG58Abm3Yatg==";

pub fn merchant_key() -> PrivateKey {
    PrivateKey::from_pem(MERCHANT_PRIVATE_KEY_PEM).expect("merchant fixture key")
}

pub fn merchant_public_key() -> PublicKey {
    PublicKey::from_pem(MERCHANT_PUBLIC_KEY_PEM).expect("merchant fixture public key")
}

pub fn gateway_key() -> PrivateKey {
    PrivateKey::from_pem(GATEWAY_PRIVATE_KEY_PEM).expect("gateway fixture key")
}

pub fn gateway_public_key() -> PublicKey {
    PublicKey::from_pem(GATEWAY_PUBLIC_KEY_PEM).expect("gateway fixture public key")
}

/// Sign `pairs` the way the gateway signs its responses and render the JSON object.
pub fn signed_object<I, K, V>(key: &PrivateKey, pairs: I) -> serde_json::Value
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    let envelope = assemble(key, pairs).expect("fixture payload signs");
    serde_json::to_value(&envelope).expect("envelope serializes")
}
