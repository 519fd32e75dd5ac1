pub mod customer;
pub mod echo;
pub mod init;
pub mod oneclick;
pub mod payment;
pub mod sign;
pub mod verify_return;

use cardgate_client::{ClientConfig, GatewayClient};
use cardgate_core::{Currency, Language, PaymentStatus};
use cardgate_crypto::VerifiedResponse;

pub fn client(config: &ClientConfig) -> anyhow::Result<GatewayClient> {
    Ok(GatewayClient::from_config(config)?)
}

/// Print a verified response as pretty JSON on stdout, with the payment
/// state on stderr when the response carries one.
pub fn print_response(response: &VerifiedResponse) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    if let Some(status) = response.payment_status() {
        tracing::info!(payment_status = %status, is_final = status.is_final(), "payment state");
        eprintln!("{}", status_line(status));
    }
    Ok(())
}

fn status_line(status: PaymentStatus) -> String {
    let state = if status.is_final() { "final" } else { "pending" };
    format!("payment status {status} ({state})")
}

pub fn parse_currency(code: &str) -> Result<Currency, String> {
    Currency::from_code(code).ok_or_else(|| format!("unsupported currency `{code}`"))
}

pub fn parse_language(code: &str) -> Result<Language, String> {
    Language::from_code(code).ok_or_else(|| format!("unsupported language `{code}`"))
}
