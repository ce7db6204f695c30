//! One live tic-tac-toe match between two seated players.
//!
//! The session owns the board, the seat assignments and whose turn it
//! is. It knows nothing about chat or transport; the lobby feeds it
//! moves by display name and reacts to the outcome.

use crate::board::{Board, Mark};
use crate::events::ConnId;

/// What a move request did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Out of turn, out of range, cell taken, or mover not seated here.
    /// The session is unchanged.
    Rejected,
    /// The mark was placed and the turn passed to the opponent.
    Advanced,
    /// The mark was placed and completed a line. The session is over.
    Won(Mark),
    /// The mark was placed, filling the board with no winner.
    Drawn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Seat {
    name: String,
    conn: ConnId,
}

/// A match from acceptance to a terminal outcome. The inviter is seated
/// as `X` and moves first; the accepter is seated as `O`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    id: String,
    board: Board,
    x: Seat,
    o: Seat,
    to_move: Mark,
}

impl GameSession {
    pub fn new(
        inviter_name: impl Into<String>,
        inviter_conn: ConnId,
        accepter_name: impl Into<String>,
        accepter_conn: ConnId,
    ) -> Self {
        let x = Seat {
            name: inviter_name.into(),
            conn: inviter_conn,
        };
        let o = Seat {
            name: accepter_name.into(),
            conn: accepter_conn,
        };
        GameSession {
            id: format!("{}-{}", x.name, o.name),
            board: Board::new(),
            x,
            o,
            to_move: Mark::X,
        }
    }

    /// Stable identifier derived from the two seat names.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn current_mark(&self) -> Mark {
        self.to_move
    }

    /// Display name of the player who moves next.
    pub fn current_player(&self) -> &str {
        self.name_of(self.to_move)
    }

    pub fn name_of(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => &self.x.name,
            Mark::O => &self.o.name,
        }
    }

    pub fn conn_of(&self, mark: Mark) -> ConnId {
        match mark {
            Mark::X => self.x.conn,
            Mark::O => self.o.conn,
        }
    }

    /// Which mark `name` plays, if seated here.
    pub fn mark_of(&self, name: &str) -> Option<Mark> {
        if self.x.name == name {
            Some(Mark::X)
        } else if self.o.name == name {
            Some(Mark::O)
        } else {
            None
        }
    }

    pub fn has_player(&self, name: &str) -> bool {
        self.mark_of(name).is_some()
    }

    /// The other seat's name and connection, given one seated player.
    pub fn opponent_of(&self, name: &str) -> Option<(&str, ConnId)> {
        let mark = self.mark_of(name)?;
        let seat = match mark.other() {
            Mark::X => &self.x,
            Mark::O => &self.o,
        };
        Some((seat.name.as_str(), seat.conn))
    }

    /// Try to place `player`'s mark at `position`. Anything invalid
    /// leaves the session untouched and reports [`MoveOutcome::Rejected`].
    pub fn apply_move(&mut self, player: &str, position: i64) -> MoveOutcome {
        let Some(mark) = self.mark_of(player) else {
            return MoveOutcome::Rejected;
        };
        if mark != self.to_move {
            return MoveOutcome::Rejected;
        }
        let Ok(pos) = usize::try_from(position) else {
            return MoveOutcome::Rejected;
        };
        if !self.board.place(pos, mark) {
            return MoveOutcome::Rejected;
        }

        if self.board.winner() == Some(mark) {
            return MoveOutcome::Won(mark);
        }
        if self.board.is_full() {
            return MoveOutcome::Drawn;
        }
        self.to_move = mark.other();
        MoveOutcome::Advanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new("alice", ConnId(1), "bob", ConnId(2))
    }

    #[test]
    fn inviter_is_x_and_moves_first() {
        let game = session();
        assert_eq!(game.id(), "alice-bob");
        assert_eq!(game.current_mark(), Mark::X);
        assert_eq!(game.current_player(), "alice");
        assert_eq!(game.mark_of("alice"), Some(Mark::X));
        assert_eq!(game.mark_of("bob"), Some(Mark::O));
        assert_eq!(game.mark_of("carol"), None);
        assert_eq!(game.conn_of(Mark::O), ConnId(2));
    }

    #[test]
    fn turns_alternate_after_each_placed_mark() {
        let mut game = session();
        assert_eq!(game.apply_move("alice", 0), MoveOutcome::Advanced);
        assert_eq!(game.current_player(), "bob");
        assert_eq!(game.apply_move("bob", 4), MoveOutcome::Advanced);
        assert_eq!(game.current_player(), "alice");
    }

    #[test]
    fn out_of_turn_move_is_rejected_without_state_change() {
        let mut game = session();
        assert_eq!(game.apply_move("bob", 0), MoveOutcome::Rejected);
        assert_eq!(game.board().cell(0), None);
        assert_eq!(game.current_player(), "alice");
    }

    #[test]
    fn occupied_cell_and_bad_positions_are_rejected() {
        let mut game = session();
        game.apply_move("alice", 4);
        assert_eq!(game.apply_move("bob", 4), MoveOutcome::Rejected);
        assert_eq!(game.apply_move("bob", 9), MoveOutcome::Rejected);
        assert_eq!(game.apply_move("bob", -1), MoveOutcome::Rejected);
        // Bob is still to move after the rejections.
        assert_eq!(game.current_player(), "bob");
    }

    #[test]
    fn outsider_moves_are_rejected() {
        let mut game = session();
        assert_eq!(game.apply_move("carol", 0), MoveOutcome::Rejected);
        assert_eq!(game.board().cell(0), None);
    }

    #[test]
    fn completing_a_line_wins() {
        let mut game = session();
        game.apply_move("alice", 0);
        game.apply_move("bob", 3);
        game.apply_move("alice", 1);
        game.apply_move("bob", 4);
        assert_eq!(game.apply_move("alice", 2), MoveOutcome::Won(Mark::X));
    }

    #[test]
    fn filling_the_board_without_a_line_draws() {
        let mut game = session();
        // X: 0 2 3 7 8, O: 1 4 5 6, no completed line at any point.
        let script = [
            ("alice", 0),
            ("bob", 1),
            ("alice", 2),
            ("bob", 4),
            ("alice", 3),
            ("bob", 5),
            ("alice", 7),
            ("bob", 6),
        ];
        for (player, pos) in script {
            assert_eq!(game.apply_move(player, pos), MoveOutcome::Advanced);
        }
        assert_eq!(game.apply_move("alice", 8), MoveOutcome::Drawn);
        assert!(game.board().is_full());
        assert_eq!(game.board().winner(), None);
    }

    #[test]
    fn win_on_the_ninth_move_beats_draw() {
        let mut game = session();
        // Leaves cell 2 open; X holds 0 and 1, so the last move wins.
        let script = [
            ("alice", 0),
            ("bob", 3),
            ("alice", 1),
            ("bob", 4),
            ("alice", 5),
            ("bob", 6),
            ("alice", 7),
            ("bob", 8),
        ];
        for (player, pos) in script {
            assert_eq!(game.apply_move(player, pos), MoveOutcome::Advanced);
        }
        assert_eq!(game.apply_move("alice", 2), MoveOutcome::Won(Mark::X));
    }

    #[test]
    fn opponent_lookup_pairs_the_seats() {
        let game = session();
        assert_eq!(game.opponent_of("alice"), Some(("bob", ConnId(2))));
        assert_eq!(game.opponent_of("bob"), Some(("alice", ConnId(1))));
        assert_eq!(game.opponent_of("carol"), None);
    }
}
