//! `cardgate echo`: connectivity and signature check.

use clap::Args;

use cardgate_client::{ClientConfig, HttpMethod};

#[derive(Args, Debug)]
pub struct EchoArgs {
    /// Send the request as GET path segments instead of a POST body.
    #[arg(long)]
    pub get: bool,
}

pub async fn run(config: &ClientConfig, args: &EchoArgs) -> anyhow::Result<()> {
    let method = if args.get { HttpMethod::Get } else { HttpMethod::Post };
    let response = super::client(config)?.echo(method).await?;
    super::print_response(&response)
}
