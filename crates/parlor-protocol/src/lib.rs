//! parlor-protocol
//!
//! Wire protocol between parlor clients and the server: one JSON object
//! per line, tagged with a kebab-case `event` name and an optional
//! `data` payload. [`frames`] defines the frame types and their mapping
//! onto core events; [`json_codec`] does the line-level encode/decode.

pub mod frames;
pub mod json_codec;

pub use frames::{
    board_to_wire, verdict_text, ClientFrame, GameStartPayload, GameUpdatePayload, ServerFrame,
    WireBoard, WireMessage,
};
pub use json_codec::{
    decode_client_line, decode_server_line, encode_client_frame, encode_server_frame,
    ProtocolError,
};
