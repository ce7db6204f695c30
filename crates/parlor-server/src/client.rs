//! Per-connection tasks.
//!
//! Each accepted socket gets a reader (this task) and a spawned writer.
//! The reader turns lines into lobby requests; the writer drains the
//! connection's outbound queue. Unreadable lines are logged and
//! skipped, never answered, so a misbehaving client cannot probe the
//! server through error replies.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use parlor_core::{ConnId, InputEvent, OutputEvent};
use parlor_protocol::{decode_client_line, encode_server_frame, ServerFrame};

use crate::types::{ClientRegistry, LobbyRequest, LobbyTx, OutboundRx};

/// Drive one connection until its socket closes or errors.
pub async fn run_client(
    conn_id: ConnId,
    stream: TcpStream,
    lobby_tx: LobbyTx,
    out_rx: OutboundRx,
    clients: ClientRegistry,
) -> Result<()> {
    let (read_half, write_half) = stream.into_split();

    let writer = tokio::spawn(write_loop(conn_id, write_half, out_rx));

    let result = read_loop(conn_id, read_half, &lobby_tx).await;

    // Deregister before telling the lobby, so the disconnect cascade
    // reaches only survivors.
    clients.write().await.remove(&conn_id);
    let _ = lobby_tx.send(LobbyRequest {
        conn: conn_id,
        event: InputEvent::ConnectionClosed,
    });

    // Removing the registry entry dropped the last sender; the writer
    // drains whatever is queued and exits on its own.
    let _ = writer.await;

    info!("connection {} closed", conn_id.0);
    result
}

async fn read_loop(conn_id: ConnId, read_half: OwnedReadHalf, lobby_tx: &LobbyTx) -> Result<()> {
    let mut lines = BufReader::new(read_half).lines();

    while let Some(line) = lines.next_line().await? {
        let frame = match decode_client_line(&line) {
            Ok(frame) => frame,
            Err(err) => {
                debug!("connection {} sent an unusable line: {}", conn_id.0, err);
                continue;
            }
        };
        debug!("connection {} -> {:?}", conn_id.0, frame);

        if lobby_tx
            .send(LobbyRequest {
                conn: conn_id,
                event: frame.into(),
            })
            .is_err()
        {
            // Lobby gone; treat it like a closed connection.
            break;
        }
    }
    Ok(())
}

async fn write_loop(conn_id: ConnId, mut write_half: OwnedWriteHalf, mut out_rx: OutboundRx) {
    while let Some(event) = out_rx.recv().await {
        if let Err(err) = write_event(&mut write_half, event).await {
            warn!("connection {} write failed: {}", conn_id.0, err);
            break;
        }
    }
}

async fn write_event(write_half: &mut OwnedWriteHalf, event: OutputEvent) -> Result<()> {
    let frame = ServerFrame::from(event);
    let line = encode_server_frame(&frame)?;
    let data = format!("{}\n", line);
    write_half.write_all(data.as_bytes()).await?;
    write_half.flush().await?;
    Ok(())
}
