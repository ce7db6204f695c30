//! Listener setup and the accept loop.
//!
//! Wiring:
//! 1. One lobby task owns all state and consumes the request channel.
//! 2. Each accepted socket gets an id, a registry entry, and a task.
//! 3. Connection tasks deregister themselves and raise the disconnect
//!    event when their socket goes away.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, RwLock};
use tracing::{error, info, warn};

use parlor_core::ConnId;

use crate::client;
use crate::config::Config;
use crate::http;
use crate::lobby_task;
use crate::types::{ClientRegistry, LobbyRequest};

static NEXT_CONN_ID: AtomicU64 = AtomicU64::new(1);

fn next_conn_id() -> ConnId {
    ConnId(NEXT_CONN_ID.fetch_add(1, Ordering::Relaxed))
}

/// Bind both configured listeners and serve until the process exits.
pub async fn run(config: Config) -> Result<()> {
    let chat_listener = TcpListener::bind(config.chat_addr())
        .await
        .with_context(|| format!("cannot bind chat listener on {}", config.chat_addr()))?;
    let http_listener = TcpListener::bind(config.http_addr())
        .await
        .with_context(|| format!("cannot bind http listener on {}", config.http_addr()))?;

    tokio::spawn(async move {
        if let Err(err) = http::serve(http_listener).await {
            error!("liveness server failed: {}", err);
        }
    });

    serve(chat_listener, config).await
}

/// Accept chat clients on an already bound listener. Split out from
/// [`run`] so tests can bind an ephemeral port first.
pub async fn serve(listener: TcpListener, config: Config) -> Result<()> {
    info!("chat listener on {}", listener.local_addr()?);

    let clients: ClientRegistry = Arc::new(RwLock::new(HashMap::new()));
    let (lobby_tx, lobby_rx) = mpsc::unbounded_channel::<LobbyRequest>();

    tokio::spawn(lobby_task::run_lobby_loop(lobby_rx, Arc::clone(&clients)));

    loop {
        let (stream, peer) = listener.accept().await.context("accept failed")?;

        let connected = clients.read().await.len();
        if connected >= config.max_clients {
            warn!(
                "refusing {}: client limit {} reached",
                peer, config.max_clients
            );
            drop(stream);
            continue;
        }

        let conn_id = next_conn_id();
        info!("connection {} accepted from {}", conn_id.0, peer);

        let (out_tx, out_rx) = mpsc::unbounded_channel();
        clients.write().await.insert(conn_id, out_tx);

        let lobby_tx = lobby_tx.clone();
        let clients = Arc::clone(&clients);
        tokio::spawn(async move {
            if let Err(err) = client::run_client(conn_id, stream, lobby_tx, out_rx, clients).await
            {
                warn!("connection {} ended with error: {}", conn_id.0, err);
            }
        });
    }
}
