use anyhow::Result;
use clap::Parser;

use vm_gateway::config::catalog::EnvironmentCatalog;
use vm_gateway::config::settings::{Args, Settings};
use vm_gateway::server::server::{start, AppState};
use vm_gateway::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_level, args.log_format);

    let settings = Settings::load(&args)?;
    let state = AppState::new(&settings, EnvironmentCatalog::rackspace());

    start(&settings, state).await
}
