//! parlor-server
//!
//! Tokio front end for the parlor lobby. One task owns the lobby state;
//! every connection gets a reader task feeding it and a writer task
//! draining its outbound queue. Frames are newline-delimited JSON from
//! parlor-protocol. A small axum app on a second port answers liveness
//! probes.

pub mod config;
pub mod http;
pub mod server;
pub mod types;

mod client;
mod lobby_task;
