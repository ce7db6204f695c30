//! Line-oriented JSON encoding and decoding.
//!
//! The transport hands whole lines in and writes whole lines out; this
//! module never sees the socket. Encoded frames contain no raw
//! newlines, so one frame per line holds by construction.

use thiserror::Error;

use crate::frames::{ClientFrame, ServerFrame};

#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The line held no frame at all (blank or whitespace).
    #[error("empty frame")]
    EmptyFrame,
    /// The line was not a well-formed frame.
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Decode one inbound line into a client frame.
pub fn decode_client_line(line: &str) -> Result<ClientFrame, ProtocolError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ProtocolError::EmptyFrame);
    }
    Ok(serde_json::from_str(trimmed)?)
}

/// Encode a server frame as a single JSON line, without the newline.
pub fn encode_server_frame(frame: &ServerFrame) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(frame)?)
}

/// Decode one line pushed by the server. Used by clients and tests.
pub fn decode_server_line(line: &str) -> Result<ServerFrame, ProtocolError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ProtocolError::EmptyFrame);
    }
    Ok(serde_json::from_str(trimmed)?)
}

/// Encode a client frame as a single JSON line, without the newline.
pub fn encode_client_frame(frame: &ClientFrame) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(frame)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::{GameUpdatePayload, WireMessage};

    #[test]
    fn decodes_payload_frames() {
        let frame = decode_client_line(r#"{"event":"user-join","data":"alice"}"#).unwrap();
        assert_eq!(frame, ClientFrame::UserJoin("alice".to_string()));

        let frame = decode_client_line(r#"{"event":"make-move","data":4}"#).unwrap();
        assert_eq!(frame, ClientFrame::MakeMove(4));
    }

    #[test]
    fn decodes_unit_frames_with_and_without_data() {
        let frame = decode_client_line(r#"{"event":"game-ended"}"#).unwrap();
        assert_eq!(frame, ClientFrame::GameEnded);

        let frame = decode_client_line(r#"{"event":"update-players-in-game","data":null}"#).unwrap();
        assert_eq!(frame, ClientFrame::UpdatePlayersInGame);
    }

    #[test]
    fn whitespace_padding_is_tolerated() {
        let frame = decode_client_line("  {\"event\":\"send-message\",\"data\":\"hi\"}\r").unwrap();
        assert_eq!(frame, ClientFrame::SendMessage("hi".to_string()));
    }

    #[test]
    fn blank_lines_are_their_own_error() {
        assert!(matches!(
            decode_client_line("   "),
            Err(ProtocolError::EmptyFrame)
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            decode_client_line("not json"),
            Err(ProtocolError::Malformed(_))
        ));
        assert!(matches!(
            decode_client_line(r#"{"event":"no-such-event","data":1}"#),
            Err(ProtocolError::Malformed(_))
        ));
        // Wrong payload type for a known event.
        assert!(matches!(
            decode_client_line(r#"{"event":"make-move","data":"four"}"#),
            Err(ProtocolError::Malformed(_))
        ));
    }

    #[test]
    fn server_frames_encode_one_object_per_line() {
        let frame = ServerFrame::Message(WireMessage {
            user: "alice".to_string(),
            text: "hi".to_string(),
            time: "01:02:03 PM".to_string(),
        });
        let line = encode_server_frame(&frame).unwrap();
        assert_eq!(
            line,
            r#"{"event":"message","data":{"user":"alice","text":"hi","time":"01:02:03 PM"}}"#
        );
        assert!(!line.contains('\n'));
    }

    #[test]
    fn server_frames_round_trip() {
        let frame = ServerFrame::GameUpdate(GameUpdatePayload {
            board: [
                Some('X'),
                None,
                None,
                None,
                Some('O'),
                None,
                None,
                None,
                None,
            ],
            current_player: "alice".to_string(),
        });
        let line = encode_server_frame(&frame).unwrap();
        assert_eq!(decode_server_line(&line).unwrap(), frame);
    }

    #[test]
    fn newlines_inside_text_stay_escaped() {
        let frame = ServerFrame::Message(WireMessage {
            user: "alice".to_string(),
            text: "line one\nline two".to_string(),
            time: "t".to_string(),
        });
        let line = encode_server_frame(&frame).unwrap();
        assert!(!line.contains('\n'));
        match decode_server_line(&line).unwrap() {
            ServerFrame::Message(msg) => assert_eq!(msg.text, "line one\nline two"),
            other => panic!("unexpected frame {:?}", other),
        }
    }
}
