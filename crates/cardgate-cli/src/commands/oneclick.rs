//! One-click commands: init, process.

use clap::Args;

use cardgate_client::{ClientConfig, OneclickInit};
use cardgate_core::Currency;

use super::payment::PayIdArgs;

#[derive(Args, Debug)]
pub struct OneclickInitArgs {
    /// Pay id of the original one-click template payment.
    pub orig_pay_id: String,

    #[arg(long)]
    pub order_no: String,

    /// Amount in hundredths of the currency unit.
    #[arg(short, long)]
    pub amount: i64,

    #[arg(short, long, default_value = "CZK", value_parser = super::parse_currency)]
    pub currency: Currency,

    #[arg(short, long)]
    pub description: Option<String>,

    /// Mark the payment as initiated by the customer.
    #[arg(long)]
    pub client_initiated: bool,
}

pub async fn init(config: &ClientConfig, args: &OneclickInitArgs) -> anyhow::Result<()> {
    let mut request = OneclickInit::new(args.orig_pay_id.as_str(), args.order_no.as_str(), args.amount)
        .currency(args.currency)
        .client_initiated(args.client_initiated);
    if let Some(description) = &args.description {
        request = request.description(description.as_str());
    }
    let response = super::client(config)?.oneclick_init(&request).await?;
    super::print_response(&response)
}

pub async fn process(config: &ClientConfig, args: &PayIdArgs) -> anyhow::Result<()> {
    let response = super::client(config)?.oneclick_process(&args.pay_id).await?;
    super::print_response(&response)
}
