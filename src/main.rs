mod config;
mod directory;
mod error;
mod schedule;
mod storage;
mod web;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    if config.admin_password == config::DEFAULT_ADMIN_PASSWORD {
        warn!("ADMIN_PASSWORD not set, falling back to the default password");
    }
    info!(
        "starting clinic-rooms on port {} (data dir {}, days: {})",
        config.port,
        config.data_dir.display(),
        config.days.join(", ")
    );

    web::start_server(config).await
}
