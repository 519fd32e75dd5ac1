//! Client configuration loading and management.

use serde::{Deserialize, Serialize};
use std::path::Path;
use zeroize::Zeroizing;

use cardgate_crypto::{PrivateKey, PublicKey};

use crate::error::GatewayError;

/// Integration (sandbox) endpoint of API v1.9.
pub const SANDBOX_BASE_URL: &str = "https://iapi.iplatebnibrana.csob.cz/api/v1.9/";

/// Full configuration for a gateway client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    /// Merchant identity and key material.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Merchant identifier assigned by the gateway.
    #[serde(default)]
    pub merchant_id: String,
    /// API base URL; endpoint paths are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Merchant private key: a PEM file path or inline PEM text.
    #[serde(default = "default_private_key")]
    pub private_key: String,
    /// Gateway public key: a PEM file path or inline PEM text.
    #[serde(default = "default_gateway_public_key")]
    pub gateway_public_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_base_url() -> String {
    SANDBOX_BASE_URL.into()
}
fn default_private_key() -> String {
    "merchant.key".into()
}
fn default_gateway_public_key() -> String {
    "gateway.pub".into()
}
fn default_timeout_secs() -> u64 {
    20
}
fn default_user_agent() -> String {
    concat!("cardgate/", env!("CARGO_PKG_VERSION")).into()
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            merchant_id: String::new(),
            base_url: default_base_url(),
            private_key: default_private_key(),
            gateway_public_key: default_gateway_public_key(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ClientConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> Result<Self, GatewayError> {
        if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|e| {
                GatewayError::Configuration(format!("cannot read {}: {e}", path.display()))
            })?;
            toml::from_str(&contents).map_err(|e| {
                GatewayError::Configuration(format!("invalid config {}: {e}", path.display()))
            })
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), GatewayError> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| GatewayError::Configuration(e.to_string()))?;
        }
        std::fs::write(path, contents).map_err(|e| GatewayError::Configuration(e.to_string()))
    }

    /// Check the settings a client cannot work without.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.gateway.merchant_id.trim().is_empty() {
            return Err(GatewayError::Configuration("merchant_id is not set".into()));
        }
        crate::client::parse_base_url(&self.gateway.base_url)?;
        if self.http.timeout_secs == 0 {
            return Err(GatewayError::Configuration("timeout_secs must be positive".into()));
        }
        Ok(())
    }

    /// Parse the configured merchant private key.
    pub fn load_private_key(&self) -> Result<PrivateKey, GatewayError> {
        let pem = read_key_material(&self.gateway.private_key)?;
        Ok(PrivateKey::from_pem(&pem)?)
    }

    /// Parse the configured gateway public key.
    pub fn load_gateway_public_key(&self) -> Result<PublicKey, GatewayError> {
        let pem = read_key_material(&self.gateway.gateway_public_key)?;
        Ok(PublicKey::from_pem(&pem)?)
    }
}

/// Resolve a key setting: the contents of the file it names when such a
/// file exists, otherwise the setting itself taken as PEM text.
pub fn read_key_material(value: &str) -> Result<Zeroizing<String>, GatewayError> {
    let path = Path::new(value);
    if path.is_file() {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            GatewayError::Configuration(format!("cannot read key {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "loaded key file");
        Ok(Zeroizing::new(contents))
    } else {
        Ok(Zeroizing::new(value.to_owned()))
    }
}
