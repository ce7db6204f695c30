//! Liveness HTTP surface, served next to the chat port.

use anyhow::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing::info;

pub fn router() -> Router {
    Router::new().route("/", get(index)).route("/ping", get(ping))
}

async fn index() -> &'static str {
    "parlor server is running\n"
}

async fn ping() -> &'static str {
    "pong"
}

/// Serve the liveness routes on an already bound listener.
pub async fn serve(listener: TcpListener) -> Result<()> {
    info!("liveness endpoints on {}", listener.local_addr()?);
    axum::serve(listener, router()).await?;
    Ok(())
}
