//! parlor-server binary entry point.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use parlor_server::config::Config;
use parlor_server::server;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    info!(
        "starting parlor server: chat on {}, liveness on {}, client limit {}",
        config.chat_addr(),
        config.http_addr(),
        config.max_clients
    );

    server::run(config).await
}
