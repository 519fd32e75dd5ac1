//! `cardgate init`: write a default configuration file.

use clap::Args;
use std::path::Path;

use cardgate_client::ClientConfig;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file.
    #[arg(long)]
    pub force: bool,
}

pub fn run(path: &Path, loaded: &ClientConfig, args: &InitArgs) -> anyhow::Result<()> {
    if path.exists() && !args.force {
        anyhow::bail!("configuration file already exists at {}", path.display());
    }

    let mut config = ClientConfig::default();
    config.gateway.merchant_id = loaded.gateway.merchant_id.clone();
    config.save(path)?;
    tracing::info!(path = %path.display(), "wrote default config");

    println!("Wrote {}", path.display());
    println!("Set merchant_id and the key paths under [gateway], then run 'cardgate echo'.");
    Ok(())
}
