use anyhow::Context;
use audiohub_app::config::{Cli, ClientConfig};
use audiohub_app::platform::{self, logging};
use audiohub_logging::hub_info;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ClientConfig::resolve(&cli).context("loading configuration")?;
    logging::initialize(config.log);
    hub_info!("audiohub starting against {}", config.server);

    platform::run_app(config).await.context("running session")?;
    Ok(())
}
