//! Wire frame definitions.
//!
//! Every frame is one JSON object per line, shaped as
//! `{"event": "<name>", "data": <payload>}`. Unit frames omit `data`.
//! Event names follow the kebab-case vocabulary browser clients already
//! speak, so a web front end can target this server unchanged.

use serde::{Deserialize, Serialize};

use parlor_core::{Board, ChatMessage, GameVerdict, InputEvent, Mark, OutputEvent};

/// Board as it crosses the wire: nine cells, `null` or `"X"`/`"O"`.
pub type WireBoard = [Option<char>; 9];

/// Frames a client may send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientFrame {
    /// Claim a display name: `{"event":"user-join","data":"alice"}`.
    UserJoin(String),
    /// Publish chat text under the joined name.
    SendMessage(String),
    /// Offer a match to the named user.
    InviteToGame(String),
    /// Take up an offer from the named user.
    AcceptGame(String),
    /// Claim board cell 0..=8.
    MakeMove(i64),
    /// The client's game view closed.
    GameEnded,
    /// Ask for a fresh occupancy broadcast.
    UpdatePlayersInGame,
}

/// Frames the server pushes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerFrame {
    /// One new chat message.
    Message(WireMessage),
    /// Full history replay, oldest first.
    ChatHistory(Vec<WireMessage>),
    /// The join went through; `data` echoes the accepted name.
    JoinSuccess(String),
    /// The join was refused; `data` is a human-readable reason.
    JoinError(String),
    /// Current roster, join order.
    UpdateUsers(Vec<String>),
    /// Names currently seated in a match.
    PlayersInGameUpdate(Vec<String>),
    /// The named user offered the recipient a match.
    GameInvitation(String),
    GameStart(GameStartPayload),
    GameUpdate(GameUpdatePayload),
    /// Terminal result: `"win"`, `"lose"`, `"draw"`, or a forfeit notice.
    GameOver(String),
}

/// Chat entry as serialized on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub user: String,
    pub text: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStartPayload {
    pub board: WireBoard,
    pub current_player: String,
    /// The recipient's opponent, from the recipient's point of view.
    pub opponent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameUpdatePayload {
    pub board: WireBoard,
    pub current_player: String,
}

// ----------------------------------------------------------------------
// Conversions between core events and wire frames
// ----------------------------------------------------------------------

impl From<ClientFrame> for InputEvent {
    fn from(frame: ClientFrame) -> Self {
        match frame {
            ClientFrame::UserJoin(name) => InputEvent::Join { name },
            ClientFrame::SendMessage(text) => InputEvent::SendMessage { text },
            ClientFrame::InviteToGame(opponent) => InputEvent::Invite { opponent },
            ClientFrame::AcceptGame(inviter) => InputEvent::Accept { inviter },
            ClientFrame::MakeMove(position) => InputEvent::MakeMove { position },
            ClientFrame::GameEnded => InputEvent::GameEnded,
            ClientFrame::UpdatePlayersInGame => InputEvent::RefreshOccupancy,
        }
    }
}

impl From<ChatMessage> for WireMessage {
    fn from(message: ChatMessage) -> Self {
        WireMessage {
            user: message.author,
            text: message.text,
            time: message.time,
        }
    }
}

/// Flatten a board into its wire form.
pub fn board_to_wire(board: &Board) -> WireBoard {
    board.cells().map(|cell| cell.map(Mark::as_char))
}

/// Text a client shows for a finished game.
pub fn verdict_text(verdict: &GameVerdict) -> String {
    match verdict {
        GameVerdict::Win => "win".to_string(),
        GameVerdict::Lose => "lose".to_string(),
        GameVerdict::Draw => "draw".to_string(),
        GameVerdict::OpponentLeft { name } => {
            format!("{} disconnected. You win!", name)
        }
    }
}

impl From<OutputEvent> for ServerFrame {
    fn from(event: OutputEvent) -> Self {
        match event {
            OutputEvent::Chat(message) => ServerFrame::Message(message.into()),
            OutputEvent::History(entries) => {
                ServerFrame::ChatHistory(entries.into_iter().map(WireMessage::from).collect())
            }
            OutputEvent::JoinAccepted { name } => ServerFrame::JoinSuccess(name),
            OutputEvent::JoinRejected { reason } => ServerFrame::JoinError(reason),
            OutputEvent::Roster(names) => ServerFrame::UpdateUsers(names),
            OutputEvent::Occupancy(names) => ServerFrame::PlayersInGameUpdate(names),
            OutputEvent::Invitation { from } => ServerFrame::GameInvitation(from),
            OutputEvent::GameStart {
                board,
                current_player,
                opponent,
            } => ServerFrame::GameStart(GameStartPayload {
                board: board_to_wire(&board),
                current_player,
                opponent,
            }),
            OutputEvent::GameUpdate {
                board,
                current_player,
            } => ServerFrame::GameUpdate(GameUpdatePayload {
                board: board_to_wire(&board),
                current_player,
            }),
            OutputEvent::GameOver(verdict) => ServerFrame::GameOver(verdict_text(&verdict)),
        }
    }
}
