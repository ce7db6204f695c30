//! The lobby: single owner of all chat and matchmaking state.
//!
//! One `Lobby` instance handles every inbound event in arrival order
//! and returns the outbound events it caused, already addressed. It is
//! intended to run on a single task; nothing in here locks or spawns.
//!
//! Requests that violate policy (moving out of turn, inviting a seated
//! player, chatting before joining) produce no output at all. The only
//! failure a client ever hears about is a rejected name claim.

use std::collections::HashMap;

use crate::board::Mark;
use crate::error::JoinError;
use crate::events::{ConnId, GameVerdict, InputEvent, Outbound, OutputEvent};
use crate::game::{GameSession, MoveOutcome};
use crate::message_log::{ChatMessage, MessageLog};
use crate::occupancy::OccupancySet;
use crate::presence::PresenceRegistry;

/// Chat lobby with an embedded tic-tac-toe arena.
#[derive(Debug, Default)]
pub struct Lobby {
    presence: PresenceRegistry,
    log: MessageLog,
    occupancy: OccupancySet,
    games: HashMap<String, GameSession>,
}

impl Lobby {
    pub fn new() -> Self {
        Lobby::default()
    }

    /// Handle one inbound event and return the outbound events it
    /// produced, in the order they must be delivered.
    pub fn handle(&mut self, conn: ConnId, event: InputEvent) -> Vec<Outbound> {
        match event {
            InputEvent::Join { name } => self.handle_join(conn, name),
            InputEvent::SendMessage { text } => self.handle_send_message(conn, text),
            InputEvent::Invite { opponent } => self.handle_invite(conn, opponent),
            InputEvent::Accept { inviter } => self.handle_accept(conn, inviter),
            InputEvent::MakeMove { position } => self.handle_make_move(conn, position),
            InputEvent::GameEnded => self.handle_game_ended(conn),
            InputEvent::RefreshOccupancy => self.handle_refresh_occupancy(),
            InputEvent::ConnectionClosed => self.handle_disconnect(conn),
        }
    }

    // ------------------------------------------------------------------
    // Join and chat
    // ------------------------------------------------------------------

    fn handle_join(&mut self, conn: ConnId, name: String) -> Vec<Outbound> {
        match self.presence.claim(conn, name.clone()) {
            Ok(()) => {}
            Err(err @ JoinError::NameTaken) => {
                return vec![Outbound::to(
                    conn,
                    OutputEvent::JoinRejected {
                        reason: err.to_string(),
                    },
                )];
            }
            Err(JoinError::AlreadyJoined) => return Vec::new(),
        }

        // The welcome lands in the log before the snapshot is taken, so
        // the joiner sees it via the history replay rather than as a
        // separate push.
        self.log
            .append(ChatMessage::system(format!("Welcome to the chat, {}!", name)));

        let mut out = vec![
            Outbound::to(conn, OutputEvent::JoinAccepted { name: name.clone() }),
            Outbound::to(conn, OutputEvent::History(self.log.snapshot())),
        ];

        let joined = ChatMessage::system(format!("{} joined the chat", name));
        self.log.append(joined.clone());
        out.push(Outbound::all(OutputEvent::Chat(joined)));

        out.push(Outbound::all(OutputEvent::Roster(self.presence.roster())));
        out.push(Outbound::to(
            conn,
            OutputEvent::Occupancy(self.occupancy.names()),
        ));
        out
    }

    fn handle_send_message(&mut self, conn: ConnId, text: String) -> Vec<Outbound> {
        let Some(author) = self.presence.name_of(conn) else {
            return Vec::new();
        };
        let message = ChatMessage::now(author, text);
        self.log.append(message.clone());
        vec![Outbound::all(OutputEvent::Chat(message))]
    }

    // ------------------------------------------------------------------
    // Matchmaking
    // ------------------------------------------------------------------

    fn handle_invite(&mut self, conn: ConnId, opponent: String) -> Vec<Outbound> {
        let Some(inviter) = self.presence.name_of(conn) else {
            return Vec::new();
        };
        if inviter == opponent {
            return Vec::new();
        }
        if self.occupancy.contains(inviter) || self.occupancy.contains(&opponent) {
            return Vec::new();
        }
        let Some(target) = self.presence.conn_of(&opponent) else {
            return Vec::new();
        };
        vec![Outbound::to(
            target,
            OutputEvent::Invitation {
                from: inviter.to_string(),
            },
        )]
    }

    fn handle_accept(&mut self, conn: ConnId, inviter: String) -> Vec<Outbound> {
        let Some(accepter) = self.presence.name_of(conn).map(str::to_string) else {
            return Vec::new();
        };
        if accepter == inviter {
            return Vec::new();
        }
        if self.occupancy.contains(&accepter) || self.occupancy.contains(&inviter) {
            return Vec::new();
        }
        let Some(inviter_conn) = self.presence.conn_of(&inviter) else {
            return Vec::new();
        };

        let game = GameSession::new(inviter.clone(), inviter_conn, accepter.clone(), conn);
        // Hyphenated names can collide on the derived id; never clobber
        // a live session over it.
        if self.games.contains_key(game.id()) {
            return Vec::new();
        }

        self.occupancy.insert(inviter.clone());
        self.occupancy.insert(accepter.clone());

        let mut out = vec![Outbound::all(OutputEvent::Occupancy(self.occupancy.names()))];

        let board = game.board();
        out.push(Outbound::to(
            inviter_conn,
            OutputEvent::game_start(board, inviter.clone(), accepter.clone()),
        ));
        out.push(Outbound::to(
            conn,
            OutputEvent::game_start(board, inviter.clone(), inviter.clone()),
        ));

        self.games.insert(game.id().to_string(), game);

        let started = ChatMessage::system(format!(
            "{} and {} started a game of tic-tac-toe!",
            inviter, accepter
        ));
        self.log.append(started.clone());
        out.push(Outbound::all(OutputEvent::Chat(started)));
        out
    }

    // ------------------------------------------------------------------
    // Gameplay
    // ------------------------------------------------------------------

    fn handle_make_move(&mut self, conn: ConnId, position: i64) -> Vec<Outbound> {
        let Some(name) = self.presence.name_of(conn).map(str::to_string) else {
            return Vec::new();
        };
        let Some(id) = self.game_id_of(&name) else {
            return Vec::new();
        };
        let outcome = match self.games.get_mut(&id) {
            Some(game) => game.apply_move(&name, position),
            None => return Vec::new(),
        };

        match outcome {
            MoveOutcome::Rejected => Vec::new(),
            MoveOutcome::Advanced => {
                let Some(game) = self.games.get(&id) else {
                    return Vec::new();
                };
                let board = game.board();
                let current = game.current_player().to_string();
                vec![
                    Outbound::to(
                        game.conn_of(Mark::X),
                        OutputEvent::game_update(board, current.clone()),
                    ),
                    Outbound::to(
                        game.conn_of(Mark::O),
                        OutputEvent::game_update(board, current),
                    ),
                ]
            }
            MoveOutcome::Won(winner) => match self.games.remove(&id) {
                Some(game) => self.finish_decided(game, winner),
                None => Vec::new(),
            },
            MoveOutcome::Drawn => match self.games.remove(&id) {
                Some(game) => self.finish_drawn(game),
                None => Vec::new(),
            },
        }
    }

    /// Tear down a decided match: free the seats, tell each player how
    /// it went for them, announce the result in chat.
    fn finish_decided(&mut self, game: GameSession, winner: Mark) -> Vec<Outbound> {
        let winner_name = game.name_of(winner).to_string();
        let loser_name = game.name_of(winner.other()).to_string();

        self.occupancy.remove(&winner_name);
        self.occupancy.remove(&loser_name);

        let mut out = vec![Outbound::all(OutputEvent::Occupancy(self.occupancy.names()))];
        out.push(Outbound::to(
            game.conn_of(winner),
            OutputEvent::GameOver(GameVerdict::Win),
        ));
        out.push(Outbound::to(
            game.conn_of(winner.other()),
            OutputEvent::GameOver(GameVerdict::Lose),
        ));

        let announce = ChatMessage::system(format!(
            "{} won the tic-tac-toe match against {}!",
            winner_name, loser_name
        ));
        self.log.append(announce.clone());
        out.push(Outbound::all(OutputEvent::Chat(announce)));
        out
    }

    fn finish_drawn(&mut self, game: GameSession) -> Vec<Outbound> {
        let x_name = game.name_of(Mark::X).to_string();
        let o_name = game.name_of(Mark::O).to_string();

        self.occupancy.remove(&x_name);
        self.occupancy.remove(&o_name);

        let mut out = vec![Outbound::all(OutputEvent::Occupancy(self.occupancy.names()))];
        out.push(Outbound::to(
            game.conn_of(Mark::X),
            OutputEvent::GameOver(GameVerdict::Draw),
        ));
        out.push(Outbound::to(
            game.conn_of(Mark::O),
            OutputEvent::GameOver(GameVerdict::Draw),
        ));

        let announce = ChatMessage::system(format!(
            "The tic-tac-toe match between {} and {} ended in a draw!",
            x_name, o_name
        ));
        self.log.append(announce.clone());
        out.push(Outbound::all(OutputEvent::Chat(announce)));
        out
    }

    // ------------------------------------------------------------------
    // Occupancy maintenance
    // ------------------------------------------------------------------

    fn handle_game_ended(&mut self, conn: ConnId) -> Vec<Outbound> {
        let Some(name) = self.presence.name_of(conn) else {
            return Vec::new();
        };
        // A live session still holding the sender keeps its seat; this
        // only clears seats whose session is already gone.
        if self.game_id_of(name).is_some() {
            return Vec::new();
        }
        let name = name.to_string();
        if !self.occupancy.remove(&name) {
            return Vec::new();
        }
        vec![Outbound::all(OutputEvent::Occupancy(self.occupancy.names()))]
    }

    fn handle_refresh_occupancy(&mut self) -> Vec<Outbound> {
        vec![Outbound::all(OutputEvent::Occupancy(self.occupancy.names()))]
    }

    // ------------------------------------------------------------------
    // Disconnect
    // ------------------------------------------------------------------

    fn handle_disconnect(&mut self, conn: ConnId) -> Vec<Outbound> {
        let Some(name) = self.presence.name_of(conn).map(str::to_string) else {
            return Vec::new();
        };

        let mut out = Vec::new();

        // Forfeit first, while the name is still resolvable.
        if let Some(id) = self.game_id_of(&name) {
            if let Some(game) = self.games.remove(&id) {
                if let Some((opponent_name, opponent_conn)) = game.opponent_of(&name) {
                    let opponent_name = opponent_name.to_string();

                    self.occupancy.remove(&name);
                    self.occupancy.remove(&opponent_name);
                    out.push(Outbound::all(OutputEvent::Occupancy(self.occupancy.names())));

                    out.push(Outbound::to(
                        opponent_conn,
                        OutputEvent::GameOver(GameVerdict::OpponentLeft { name: name.clone() }),
                    ));

                    let forfeit = ChatMessage::system(format!(
                        "The tic-tac-toe match ended because {} disconnected. {} wins!",
                        name, opponent_name
                    ));
                    self.log.append(forfeit.clone());
                    out.push(Outbound::all(OutputEvent::Chat(forfeit)));
                }
            }
        }

        self.presence.release(conn);

        // The author's messages leave with them; survivors get the
        // rebuilt history below.
        self.log.purge_author(&name);

        let left = ChatMessage::system(format!("{} left the chat", name));
        self.log.append(left.clone());
        out.push(Outbound::all(OutputEvent::Chat(left)));

        out.push(Outbound::all(OutputEvent::Roster(self.presence.roster())));
        out.push(Outbound::all(OutputEvent::History(self.log.snapshot())));

        // Seat cleanup for a session that was already torn down.
        if self.occupancy.remove(&name) {
            out.push(Outbound::all(OutputEvent::Occupancy(self.occupancy.names())));
        }
        out
    }

    // ------------------------------------------------------------------
    // Lookups, mainly for tests and admin surfaces
    // ------------------------------------------------------------------

    fn game_id_of(&self, name: &str) -> Option<String> {
        self.games
            .iter()
            .find(|(_, game)| game.has_player(name))
            .map(|(id, _)| id.clone())
    }

    pub fn presence(&self) -> &PresenceRegistry {
        &self.presence
    }

    pub fn messages(&self) -> &MessageLog {
        &self.log
    }

    pub fn occupancy(&self) -> &OccupancySet {
        &self.occupancy
    }

    pub fn game_of(&self, name: &str) -> Option<&GameSession> {
        self.games.values().find(|game| game.has_player(name))
    }

    pub fn active_games(&self) -> usize {
        self.games.len()
    }
}
