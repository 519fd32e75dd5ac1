//! Payment lifecycle commands: init, process-url, status, reverse, close, refund.

use clap::Args;

use cardgate_client::{ClientConfig, PaymentInit};
use cardgate_core::{Currency, Customer, Language, PayOperation};

#[derive(Args, Debug)]
pub struct PaymentInitArgs {
    /// Merchant order number.
    #[arg(long)]
    pub order_no: String,

    /// Amount in hundredths of the currency unit.
    #[arg(short, long)]
    pub amount: i64,

    /// Where the gateway sends the customer back.
    #[arg(long)]
    pub return_url: String,

    /// Short order description (up to 20 characters).
    #[arg(short, long)]
    pub description: String,

    #[arg(long)]
    pub customer_name: Option<String>,

    #[arg(long, requires = "customer_name")]
    pub customer_email: Option<String>,

    #[arg(long, requires = "customer_name")]
    pub customer_phone: Option<String>,

    /// Initiate a template for later one-click payments.
    #[arg(long)]
    pub oneclick: bool,

    /// ISO 4217 currency code.
    #[arg(short, long, default_value = "CZK", value_parser = super::parse_currency)]
    pub currency: Currency,

    /// Payment page language.
    #[arg(short, long, default_value = "cs", value_parser = super::parse_language)]
    pub language: Language,
}

#[derive(Args, Debug)]
pub struct PayIdArgs {
    /// Payment identifier returned by payment-init.
    pub pay_id: String,
}

#[derive(Args, Debug)]
pub struct AmountArgs {
    /// Payment identifier returned by payment-init.
    pub pay_id: String,

    /// Partial amount; the full amount when omitted.
    #[arg(short, long)]
    pub amount: Option<i64>,
}

impl PaymentInitArgs {
    fn to_request(&self) -> PaymentInit {
        let mut request = PaymentInit::new(
            self.order_no.as_str(),
            self.amount,
            self.return_url.as_str(),
            self.description.as_str(),
        )
        .currency(self.currency)
        .language(self.language);

        if self.oneclick {
            request = request.pay_operation(PayOperation::OneclickPayment);
        }
        if let Some(name) = &self.customer_name {
            let mut customer = Customer::new(name.as_str());
            if let Some(email) = &self.customer_email {
                customer = customer.email(email.as_str());
            }
            if let Some(phone) = &self.customer_phone {
                customer = customer.mobile_phone(phone.as_str());
            }
            request = request.customer(customer);
        }
        request
    }
}

pub async fn init(config: &ClientConfig, args: &PaymentInitArgs) -> anyhow::Result<()> {
    let response = super::client(config)?.payment_init(&args.to_request()).await?;
    if let Some(pay_id) = response.pay_id() {
        tracing::info!(pay_id, order_no = %args.order_no, "payment initiated");
    }
    super::print_response(&response)
}

pub fn process_url(config: &ClientConfig, args: &PayIdArgs) -> anyhow::Result<()> {
    println!("{}", super::client(config)?.payment_process_url(&args.pay_id)?);
    Ok(())
}

pub async fn status(config: &ClientConfig, args: &PayIdArgs) -> anyhow::Result<()> {
    let response = super::client(config)?.payment_status(&args.pay_id).await?;
    super::print_response(&response)
}

pub async fn reverse(config: &ClientConfig, args: &PayIdArgs) -> anyhow::Result<()> {
    let response = super::client(config)?.payment_reverse(&args.pay_id).await?;
    super::print_response(&response)
}

pub async fn close(config: &ClientConfig, args: &AmountArgs) -> anyhow::Result<()> {
    let response = super::client(config)?
        .payment_close(&args.pay_id, args.amount)
        .await?;
    super::print_response(&response)
}

pub async fn refund(config: &ClientConfig, args: &AmountArgs) -> anyhow::Result<()> {
    let response = super::client(config)?
        .payment_refund(&args.pay_id, args.amount)
        .await?;
    super::print_response(&response)
}
