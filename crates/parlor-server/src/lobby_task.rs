//! The lobby task: sole owner of the mutable lobby state.
//!
//! Connection tasks never touch the `Lobby` directly; they enqueue
//! requests and this task applies them one at a time, then fans the
//! resulting events out to the per-connection writer queues. That
//! single consumer is what makes every handler in parlor-core safe to
//! write without locks.

use std::collections::HashMap;

use tracing::{debug, info};

use parlor_core::{ConnId, Lobby, Outbound, Recipients};

use crate::types::{ClientRegistry, LobbyRx, OutboundTx};

pub async fn run_lobby_loop(mut lobby_rx: LobbyRx, clients: ClientRegistry) {
    let mut lobby = Lobby::new();
    info!("lobby task started");

    while let Some(request) = lobby_rx.recv().await {
        let outputs = lobby.handle(request.conn, request.event);
        if outputs.is_empty() {
            continue;
        }
        // Snapshot the registry so no lock is held across the sends.
        let snapshot = clients.read().await.clone();
        for outbound in outputs {
            route(outbound, &snapshot);
        }
    }

    info!("lobby task stopped: request channel closed");
}

fn route(outbound: Outbound, clients: &HashMap<ConnId, OutboundTx>) {
    match outbound.to {
        Recipients::One(conn) => {
            if let Some(tx) = clients.get(&conn) {
                // A failed send means the connection is mid-teardown;
                // its ConnectionClosed event is already on the way.
                let _ = tx.send(outbound.event);
            } else {
                debug!("dropping event for unknown connection {}", conn.0);
            }
        }
        Recipients::All => {
            for tx in clients.values() {
                let _ = tx.send(outbound.event.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::{mpsc, RwLock};

    use parlor_core::{InputEvent, OutputEvent};

    use crate::types::LobbyRequest;

    async fn recv_event(rx: &mut mpsc::UnboundedReceiver<OutputEvent>) -> OutputEvent {
        tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("timed out waiting for an event")
            .expect("event channel closed")
    }

    #[tokio::test]
    async fn join_fans_out_to_the_right_connections() {
        let clients: ClientRegistry = Arc::new(RwLock::new(HashMap::new()));
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        {
            let mut guard = clients.write().await;
            guard.insert(ConnId(1), tx_a);
            guard.insert(ConnId(2), tx_b);
        }

        let (lobby_tx, lobby_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_lobby_loop(lobby_rx, Arc::clone(&clients)));

        lobby_tx
            .send(LobbyRequest {
                conn: ConnId(1),
                event: InputEvent::Join {
                    name: "alice".to_string(),
                },
            })
            .expect("lobby alive");

        // The joiner gets the full handshake, in order.
        assert!(matches!(
            recv_event(&mut rx_a).await,
            OutputEvent::JoinAccepted { .. }
        ));
        assert!(matches!(recv_event(&mut rx_a).await, OutputEvent::History(_)));
        assert!(matches!(recv_event(&mut rx_a).await, OutputEvent::Chat(_)));
        assert!(matches!(recv_event(&mut rx_a).await, OutputEvent::Roster(_)));
        assert!(matches!(
            recv_event(&mut rx_a).await,
            OutputEvent::Occupancy(_)
        ));

        // The bystander only sees the broadcasts.
        assert!(matches!(recv_event(&mut rx_b).await, OutputEvent::Chat(_)));
        assert!(matches!(recv_event(&mut rx_b).await, OutputEvent::Roster(_)));
    }

    #[tokio::test]
    async fn silent_requests_send_nothing() {
        let clients: ClientRegistry = Arc::new(RwLock::new(HashMap::new()));
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        clients.write().await.insert(ConnId(1), tx_a);

        let (lobby_tx, lobby_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_lobby_loop(lobby_rx, Arc::clone(&clients)));

        // Chatting before joining is absorbed.
        lobby_tx
            .send(LobbyRequest {
                conn: ConnId(1),
                event: InputEvent::SendMessage {
                    text: "hello".to_string(),
                },
            })
            .expect("lobby alive");

        // A refresh follows; it is the first thing to arrive.
        lobby_tx
            .send(LobbyRequest {
                conn: ConnId(1),
                event: InputEvent::RefreshOccupancy,
            })
            .expect("lobby alive");

        assert!(matches!(
            recv_event(&mut rx_a).await,
            OutputEvent::Occupancy(names) if names.is_empty()
        ));
    }
}
