//! parlor-core
//!
//! Pure logic for a group-chat lobby with an embedded tic-tac-toe
//! arena. This crate owns:
//!
//! - the inbound/outbound event vocabulary and routing envelopes
//! - the presence registry (connection ↔ display name)
//! - the append-only message log with author purge
//! - the occupancy set guarding matchmaking
//! - tic-tac-toe boards and sessions
//! - the single-writer [`Lobby`] that coordinates all of the above
//!
//! There is no I/O here. A transport feeds [`InputEvent`]s in, delivers
//! the returned [`Outbound`] events, and the lobby stays correct as
//! long as events from one connection arrive in order.

pub mod board;
pub mod error;
pub mod events;
pub mod game;
pub mod lobby;
pub mod message_log;
pub mod occupancy;
pub mod presence;

pub use board::{Board, Mark, WIN_LINES};
pub use error::JoinError;
pub use events::{ConnId, GameVerdict, InputEvent, Outbound, OutputEvent, Recipients};
pub use game::{GameSession, MoveOutcome};
pub use lobby::Lobby;
pub use message_log::{ChatMessage, MessageLog, SYSTEM_AUTHOR};
pub use occupancy::OccupancySet;
pub use presence::PresenceRegistry;
