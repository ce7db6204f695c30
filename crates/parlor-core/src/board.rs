//! Tic-tac-toe board and marks.
//!
//! Cells are indexed 0..=8, row-major:
//!
//! ```text
//!  0 | 1 | 2
//! ---+---+---
//!  3 | 4 | 5
//! ---+---+---
//!  6 | 7 | 8
//! ```

/// A player's mark. The inviter always plays `X`, the accepter `O`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn as_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Mark> {
        match c {
            'X' | 'x' => Some(Mark::X),
            'O' | 'o' => Some(Mark::O),
            _ => None,
        }
    }

    /// The opposing mark.
    pub fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The eight winning cell triples: three rows, three columns, two diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A 3x3 board. Cells start empty and are written at most once; the
/// session enforces turn order, the board enforces single-write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Option<Mark>; 9],
}

impl Board {
    /// Number of cells on the board.
    pub const CELLS: usize = 9;

    pub fn new() -> Self {
        Board::default()
    }

    /// The mark at `pos`, or `None` if empty or out of range.
    pub fn cell(&self, pos: usize) -> Option<Mark> {
        self.cells.get(pos).copied().flatten()
    }

    /// Write `mark` into `pos`. Returns `false` without touching the
    /// board if `pos` is out of range or the cell is already taken.
    pub fn place(&mut self, pos: usize, mark: Mark) -> bool {
        match self.cells.get_mut(pos) {
            Some(cell) if cell.is_none() => {
                *cell = Some(mark);
                true
            }
            _ => false,
        }
    }

    /// The mark holding a completed line, if any.
    pub fn winner(&self) -> Option<Mark> {
        for [a, b, c] in WIN_LINES {
            if let Some(mark) = self.cells[a] {
                if self.cells[b] == Some(mark) && self.cells[c] == Some(mark) {
                    return Some(mark);
                }
            }
        }
        None
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Copy of the raw cells, for rendering or encoding.
    pub fn cells(&self) -> [Option<Mark>; 9] {
        self.cells
    }
}
