use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use marquee::config::Config;
use marquee::{MovieStore, Server, routes};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,marquee=debug")),
        )
        .init();

    let config = Config::parse();

    let store = MovieStore::seeded();
    info!(movies = store.len().await, public_dir = %config.public_dir.display(), "movie store ready");

    let app = routes(store, config.public_dir);

    match Server::bind(config.addr).serve(app).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
