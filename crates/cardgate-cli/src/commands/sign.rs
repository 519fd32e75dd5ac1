//! `cardgate sign`: sign ad-hoc fields, for debugging integrations.

use clap::Args;

use cardgate_core::canonical_string;
use cardgate_crypto::assemble;
use cardgate_client::ClientConfig;

#[derive(Args, Debug)]
pub struct SignArgs {
    /// Fields as `name=value`, in signing order.
    #[arg(required = true, value_parser = parse_pair)]
    pub pairs: Vec<(String, String)>,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected name=value, got `{raw}`"))
}

pub fn run(config: &ClientConfig, args: &SignArgs) -> anyhow::Result<()> {
    let key = config.load_private_key()?;
    let envelope = assemble(&key, args.pairs.iter().cloned())?;
    println!("message:   {}", canonical_string(envelope.payload()));
    println!("signature: {}", envelope.signature());
    Ok(())
}
