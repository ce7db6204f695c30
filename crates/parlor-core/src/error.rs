//! Error types for lobby operations.
//!
//! Only name claims can fail in a way the requester is told about.
//! Every other invalid request (bad move, stale invite, unknown
//! opponent) is absorbed as a silent no-op, so there is no error
//! type for those paths.

use thiserror::Error;

/// Why a join request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum JoinError {
    /// The requested name is already bound to a live connection, or is
    /// the reserved system author.
    #[error("name already in use")]
    NameTaken,
    /// The connection already holds a name. Surfaced to the caller as a
    /// policy violation, never to the client.
    #[error("connection already joined")]
    AlreadyJoined,
}
