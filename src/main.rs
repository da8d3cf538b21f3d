use anyhow::{Error, Result};
use listmonk_template_provider::{api::run_api_server, config::Config, utils::init_tracing};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::load()?;

    init_tracing();
    info!(host = %config.listmonk_host, "Configuration validated");

    run_api_server(config).await
}
