use std::fmt;

use crate::error::BoardError;

use super::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// Display symbol for one cell
    pub fn symbol(self) -> &'static str {
        match self {
            Cell::Empty => ".",
            Cell::X => "X",
            Cell::O => "O",
        }
    }

    /// The player occupying this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }
}

/// A board position. The engine's search attaches scores internally; outside
/// the search a move is just its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Move { row, col }
    }
}

/// Derived from board contents on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    Draw,
    Win(Player),
}

impl GameResult {
    pub fn is_terminal(self) -> bool {
        self != GameResult::InProgress
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::InProgress => write!(f, "in progress"),
            GameResult::Draw => write!(f, "draw"),
            GameResult::Win(p) => write!(f, "{} wins", p.name()),
        }
    }
}

/// An N x N tic-tac-toe board with the turn and starting-player bookkeeping
/// shared by the UI and the move scheduler.
///
/// The grid is the only state the board mutates on its own; `turn` and
/// `starting_player` are set explicitly by whoever applied a move. Cloning
/// produces a fully independent deep copy, which is what the search relies on
/// for speculative moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    dim: usize,
    cells: Vec<Cell>,
    turn: Player,
    starting_player: Player,
}

impl Board {
    /// Create a new empty board of the given dimension. X opens by default.
    ///
    /// Panics if `dim` is zero.
    pub fn new(dim: usize) -> Self {
        assert!(dim >= 1, "board dimension must be at least 1, got {dim}");
        Board {
            dim,
            cells: vec![Cell::Empty; dim * dim],
            turn: Player::X,
            starting_player: Player::X,
        }
    }

    pub fn dimension(&self) -> usize {
        self.dim
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn set_turn(&mut self, turn: Player) {
        self.turn = turn;
    }

    pub fn starting_player(&self) -> Player {
        self.starting_player
    }

    pub fn set_starting_player(&mut self, player: Player) {
        self.starting_player = player;
    }

    /// Get the cell at a specific position.
    ///
    /// Panics on out-of-bounds coordinates: a read outside the grid is a
    /// caller bug, not a recoverable condition.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        assert!(
            row < self.dim && col < self.dim,
            "cell ({row}, {col}) is outside the {dim}x{dim} board",
            dim = self.dim
        );
        self.cells[row * self.dim + col]
    }

    /// Place `player` at (row, col) if that cell is empty.
    ///
    /// Returns `Ok(true)` when the move was applied, `Ok(false)` when the cell
    /// was already occupied (a defined no-op, not an error). Does not touch
    /// `turn` — advancing the turn is the caller's responsibility.
    pub fn apply_move(&mut self, row: usize, col: usize, player: Player) -> Result<bool, BoardError> {
        if row >= self.dim || col >= self.dim {
            return Err(BoardError::OutOfBounds {
                row,
                col,
                dim: self.dim,
            });
        }
        let idx = row * self.dim + col;
        if self.cells[idx] != Cell::Empty {
            return Ok(false);
        }
        self.cells[idx] = player.to_cell();
        Ok(true)
    }

    /// All empty cells in row-major order. A fresh list every call.
    pub fn potential_moves(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, &cell)| {
                (cell == Cell::Empty).then(|| Move::new(i / self.dim, i % self.dim))
            })
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Empty).count()
    }

    /// Evaluate the board: rows, then columns, then the two main diagonals.
    ///
    /// The first fully-owned line found decides the result. A board holding
    /// two simultaneous winning lines for different players is unreachable by
    /// alternating play; if one is constructed anyway, whichever line the scan
    /// order reaches first wins. That is documented behavior, not a tie-break
    /// guarantee.
    pub fn result(&self) -> GameResult {
        for row in 0..self.dim {
            if let Some(p) = self.line_owner((0..self.dim).map(|col| (row, col))) {
                return GameResult::Win(p);
            }
        }
        for col in 0..self.dim {
            if let Some(p) = self.line_owner((0..self.dim).map(|row| (row, col))) {
                return GameResult::Win(p);
            }
        }
        if let Some(p) = self.line_owner((0..self.dim).map(|i| (i, i))) {
            return GameResult::Win(p);
        }
        if let Some(p) = self.line_owner((0..self.dim).map(|i| (i, self.dim - 1 - i))) {
            return GameResult::Win(p);
        }

        if self.empty_count() == 0 {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }

    /// The player owning every cell of the line, if there is one.
    fn line_owner(&self, mut line: impl Iterator<Item = (usize, usize)>) -> Option<Player> {
        let (row, col) = line.next()?;
        let first = self.cell(row, col);
        let owner = first.player()?;
        line.all(|(r, c)| self.cell(r, c) == first).then_some(owner)
    }

    /// Clear the grid for a new round. Dimension, turn, and starting player
    /// are left alone.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board ({dim}x{dim}):", dim = self.dim)?;
        for row in 0..self.dim {
            for col in 0..self.dim {
                write!(f, "{} ", self.cell(row, col).symbol())?;
            }
            writeln!(f)?;
        }
        write!(f, "result: {}", self.result())
    }
}
