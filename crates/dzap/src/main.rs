mod config;
mod daily;
mod discord;
mod version;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::info;

use crate::{
    config::{open_config, write_default_config},
    version::{long_version, short_version},
};

#[derive(Parser)]
#[command(version = short_version(), long_version = long_version())]
struct Args {
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    if args.init {
        write_default_config(&args.config)?;
        info!(path = ?args.config, "Created default configuration");
        return Ok(());
    }

    tracing::info!(version = short_version(), "dzap version");

    let config = open_config(&args.config).context("Failed to load configuration")?;
    info!(
        dataset = %config.dataset.path.display(),
        channel = %config.discord.channel_name,
        "Configuration loaded"
    );

    discord::run(config).await
}
