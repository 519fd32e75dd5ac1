//! Cardgate CLI: talk to the card payment gateway from the shell.
//!
//! Subcommands: init, echo, payment-init, process-url, status, reverse,
//! close, refund, customer-info, oneclick-init, oneclick-process, sign,
//! verify-return.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use cardgate_client::{ClientConfig, LoggingConfig};

/// Cardgate: signed calls against the card payment gateway.
#[derive(Parser, Debug)]
#[command(name = "cardgate", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, global = true, default_value = "cardgate.toml")]
    config: PathBuf,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Override the merchant id.
    #[arg(long, global = true)]
    merchant_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file.
    Init(commands::init::InitArgs),
    /// Check connectivity and signatures with an echo call.
    Echo(commands::echo::EchoArgs),
    /// Create a new payment.
    PaymentInit(commands::payment::PaymentInitArgs),
    /// Print the URL that sends the customer to the payment page.
    ProcessUrl(commands::payment::PayIdArgs),
    /// Query the state of a payment.
    Status(commands::payment::PayIdArgs),
    /// Cancel an authorized payment.
    Reverse(commands::payment::PayIdArgs),
    /// Settle an authorized payment.
    Close(commands::payment::AmountArgs),
    /// Refund a settled payment.
    Refund(commands::payment::AmountArgs),
    /// Look up stored cards of a customer.
    CustomerInfo(commands::customer::CustomerInfoArgs),
    /// Start a repeat payment from a one-click template.
    OneclickInit(commands::oneclick::OneclickInitArgs),
    /// Authorize an initiated one-click payment.
    OneclickProcess(commands::payment::PayIdArgs),
    /// Sign key=value pairs and print the message and signature.
    Sign(commands::sign::SignArgs),
    /// Verify the query string the gateway appended to the return URL.
    VerifyReturn(commands::verify_return::VerifyReturnArgs),
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ClientConfig::load(&cli.config)?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(merchant_id) = &cli.merchant_id {
        config.gateway.merchant_id = merchant_id.clone();
    }
    init_tracing(&config.logging);
    tracing::debug!(config = %cli.config.display(), "configuration loaded");

    match &cli.command {
        Commands::Init(args) => commands::init::run(&cli.config, &config, args),
        Commands::Echo(args) => commands::echo::run(&config, args).await,
        Commands::PaymentInit(args) => commands::payment::init(&config, args).await,
        Commands::ProcessUrl(args) => commands::payment::process_url(&config, args),
        Commands::Status(args) => commands::payment::status(&config, args).await,
        Commands::Reverse(args) => commands::payment::reverse(&config, args).await,
        Commands::Close(args) => commands::payment::close(&config, args).await,
        Commands::Refund(args) => commands::payment::refund(&config, args).await,
        Commands::CustomerInfo(args) => commands::customer::run(&config, args).await,
        Commands::OneclickInit(args) => commands::oneclick::init(&config, args).await,
        Commands::OneclickProcess(args) => commands::oneclick::process(&config, args).await,
        Commands::Sign(args) => commands::sign::run(&config, args),
        Commands::VerifyReturn(args) => commands::verify_return::run(&config, args),
    }
}
