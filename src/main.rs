use clap::Parser;
use tracing::{error, info};

use registrar::config::Config;
use registrar::{AppState, Server, router, store, telemetry};

#[tokio::main]
async fn main() {
    let config = Config::parse();
    telemetry::init(config.log_format);

    if let Err(e) = run(config).await {
        error!("registrar failed: {e}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), registrar::Error> {
    let url = config.store_url()?;
    let collection = store::connect(&url, &config.database, &config.collection).await?;
    let app = router(AppState::new(collection));

    info!(addr = %config.addr(), "starting registrar");
    Server::bind(config.addr()).await?.serve(app).await
}
