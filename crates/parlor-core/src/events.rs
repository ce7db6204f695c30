//! Event types exchanged between the transport layer and the lobby.
//!
//! Inbound events arrive tagged with the connection they came from; the
//! lobby answers with a list of outbound events, each addressed to a
//! single connection or to everyone. The transport delivers them in the
//! order given, so per-connection ordering (history vs. individual
//! messages, roster vs. occupancy) is decided here and nowhere else.

use crate::board::Board;
use crate::message_log::ChatMessage;

/// Identifier assigned to one client connection for its whole lifetime.
///
/// Allocation is the transport's job; the lobby only compares and stores
/// these. A connection that drops and reconnects gets a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnId(pub u64);

/// Everything a client (or the transport on its behalf) can ask the lobby.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Claim a display name and enter the chat.
    Join { name: String },
    /// Publish a chat message under the sender's display name.
    SendMessage { text: String },
    /// Offer a tic-tac-toe match to another user.
    Invite { opponent: String },
    /// Take up a pending offer from `inviter`, starting a match.
    Accept { inviter: String },
    /// Claim a board cell. Positions outside 0..=8 are ignored.
    MakeMove { position: i64 },
    /// Client-side notice that its game view closed; clears stale
    /// occupancy when no live session still holds the sender.
    GameEnded,
    /// Ask for a fresh occupancy broadcast.
    RefreshOccupancy,
    /// Issued by the transport, never by a client: the connection is gone.
    ConnectionClosed,
}

/// State changes and replies the lobby pushes back out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    /// One newly appended chat message.
    Chat(ChatMessage),
    /// Full snapshot of the message log, oldest first.
    History(Vec<ChatMessage>),
    /// The join succeeded and `name` now belongs to this connection.
    JoinAccepted { name: String },
    /// The join was refused; the connection keeps its unjoined state.
    JoinRejected { reason: String },
    /// Current display names, in join order.
    Roster(Vec<String>),
    /// Names currently seated in a match, in seating order.
    Occupancy(Vec<String>),
    /// Someone offered the recipient a match.
    Invitation { from: String },
    /// A match the recipient is part of just started.
    GameStart {
        board: Board,
        current_player: String,
        opponent: String,
    },
    /// The board changed; `current_player` moves next.
    GameUpdate { board: Board, current_player: String },
    /// The recipient's match is over.
    GameOver(GameVerdict),
}

/// Per-recipient outcome of a finished match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameVerdict {
    Win,
    Lose,
    Draw,
    /// The opponent's connection dropped mid-match; the recipient wins
    /// by forfeit. `name` is the player who disconnected.
    OpponentLeft { name: String },
}

/// Who an outbound event is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipients {
    One(ConnId),
    All,
}

/// An outbound event plus its addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub to: Recipients,
    pub event: OutputEvent,
}

impl Outbound {
    /// Address `event` to a single connection.
    pub fn to(conn: ConnId, event: OutputEvent) -> Self {
        Outbound {
            to: Recipients::One(conn),
            event,
        }
    }

    /// Address `event` to every registered connection.
    pub fn all(event: OutputEvent) -> Self {
        Outbound {
            to: Recipients::All,
            event,
        }
    }
}

impl OutputEvent {
    pub fn game_start(
        board: Board,
        current_player: impl Into<String>,
        opponent: impl Into<String>,
    ) -> Self {
        OutputEvent::GameStart {
            board,
            current_player: current_player.into(),
            opponent: opponent.into(),
        }
    }

    pub fn game_update(board: Board, current_player: impl Into<String>) -> Self {
        OutputEvent::GameUpdate {
            board,
            current_player: current_player.into(),
        }
    }
}
