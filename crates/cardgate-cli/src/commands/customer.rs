//! `cardgate customer-info`: stored cards of a customer.

use clap::Args;

use cardgate_client::ClientConfig;

#[derive(Args, Debug)]
pub struct CustomerInfoArgs {
    /// Customer identifier the merchant sent with earlier payments.
    pub customer_id: String,
}

pub async fn run(config: &ClientConfig, args: &CustomerInfoArgs) -> anyhow::Result<()> {
    let response = super::client(config)?.customer_info(&args.customer_id).await?;
    if let Some(code) = response.result_code() {
        tracing::info!(result = %code, "customer lookup finished");
    }
    super::print_response(&response)
}
