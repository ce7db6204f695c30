//! Interactive line client for a running parlor server.
//!
//! Usage:
//!   cargo run --example chat_client [addr]      (default 127.0.0.1:4000)
//!
//! Commands:
//!   /join <name>     claim a display name
//!   /invite <name>   offer a match to <name>
//!   /accept <name>   accept an offer from <name>
//!   /move <0-8>      claim a board cell
//!   /end             report your game view closed
//!   /who             ask who is in a game
//!   /quit            exit
//!
//! Any other line is sent as chat.

use std::env;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use parlor_protocol::{
    decode_server_line, encode_client_frame, ClientFrame, ServerFrame, WireBoard,
};

enum Action {
    Send(ClientFrame),
    Quit,
    Unknown,
}

#[tokio::main]
async fn main() -> Result<()> {
    let addr = env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:4000".to_string());

    let stream = TcpStream::connect(&addr).await?;
    println!("connected to {} (start with /join <name>)", addr);

    let (read_half, mut write_half) = stream.into_split();

    tokio::spawn(async move {
        let mut lines = BufReader::new(read_half).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match decode_server_line(&line) {
                Ok(frame) => print_frame(frame),
                Err(err) => eprintln!("bad frame from server: {}", err),
            }
        }
        println!("server closed the connection");
        std::process::exit(0);
    });

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = input.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Action::Send(frame) => {
                let encoded = encode_client_frame(&frame)?;
                write_half
                    .write_all(format!("{}\n", encoded).as_bytes())
                    .await?;
                write_half.flush().await?;
            }
            Action::Quit => break,
            Action::Unknown => println!("unrecognized command: {}", line),
        }
    }
    Ok(())
}

fn parse_line(line: &str) -> Action {
    if !line.starts_with('/') {
        return Action::Send(ClientFrame::SendMessage(line.to_string()));
    }
    let mut parts = line.splitn(2, ' ');
    let command = parts.next().unwrap_or("");
    let rest = parts.next().unwrap_or("").trim();

    match command {
        "/join" if !rest.is_empty() => Action::Send(ClientFrame::UserJoin(rest.to_string())),
        "/invite" if !rest.is_empty() => Action::Send(ClientFrame::InviteToGame(rest.to_string())),
        "/accept" if !rest.is_empty() => Action::Send(ClientFrame::AcceptGame(rest.to_string())),
        "/move" => match rest.parse::<i64>() {
            Ok(position) => Action::Send(ClientFrame::MakeMove(position)),
            Err(_) => Action::Unknown,
        },
        "/end" => Action::Send(ClientFrame::GameEnded),
        "/who" => Action::Send(ClientFrame::UpdatePlayersInGame),
        "/quit" => Action::Quit,
        _ => Action::Unknown,
    }
}

fn print_frame(frame: ServerFrame) {
    match frame {
        ServerFrame::Message(msg) => println!("[{}] {}: {}", msg.time, msg.user, msg.text),
        ServerFrame::ChatHistory(entries) => {
            println!("--- history, {} message(s) ---", entries.len());
            for msg in entries {
                println!("[{}] {}: {}", msg.time, msg.user, msg.text);
            }
            println!("--- end of history ---");
        }
        ServerFrame::JoinSuccess(name) => println!("joined as {}", name),
        ServerFrame::JoinError(reason) => println!("join refused: {}", reason),
        ServerFrame::UpdateUsers(users) => println!("online: {}", users.join(", ")),
        ServerFrame::PlayersInGameUpdate(players) => {
            if players.is_empty() {
                println!("nobody is in a game right now");
            } else {
                println!("in a game: {}", players.join(", "));
            }
        }
        ServerFrame::GameInvitation(from) => {
            println!("{} wants to play! type /accept {} to start", from, from);
        }
        ServerFrame::GameStart(start) => {
            println!(
                "match against {} begins, {} moves first",
                start.opponent, start.current_player
            );
            print_board(&start.board);
        }
        ServerFrame::GameUpdate(update) => {
            print_board(&update.board);
            println!("{} to move", update.current_player);
        }
        ServerFrame::GameOver(result) => println!("game over: {}", result),
    }
}

fn print_board(board: &WireBoard) {
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let pos = row * 3 + col;
                match board[pos] {
                    Some(mark) => format!(" {} ", mark),
                    None => format!(" {} ", pos),
                }
            })
            .collect();
        println!("{}", cells.join("|"));
        if row < 2 {
            println!("---+---+---");
        }
    }
}
