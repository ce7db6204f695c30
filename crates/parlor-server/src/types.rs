//! Channel and registry aliases shared by the server tasks.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};

use parlor_core::{ConnId, InputEvent, OutputEvent};

/// One inbound request as the lobby task consumes it.
#[derive(Debug)]
pub struct LobbyRequest {
    pub conn: ConnId,
    pub event: InputEvent,
}

/// Sender half used by connection tasks to reach the lobby.
pub type LobbyTx = mpsc::UnboundedSender<LobbyRequest>;
/// Receiver half owned by the lobby task.
pub type LobbyRx = mpsc::UnboundedReceiver<LobbyRequest>;

/// Per-connection outbound queue, drained by that connection's writer.
pub type OutboundTx = mpsc::UnboundedSender<OutputEvent>;
pub type OutboundRx = mpsc::UnboundedReceiver<OutputEvent>;

/// Live connections and how to reach their writer tasks. The accept
/// loop inserts, the owning connection task removes.
pub type ClientRegistry = Arc<RwLock<HashMap<ConnId, OutboundTx>>>;
