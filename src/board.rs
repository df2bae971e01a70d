//! Ninuki board representation and move execution.
//!
//! The board is a 1D array with padding, as in a classic Go program:
//! - Row 0 and row `size + 1` are padding
//! - Column 0 of every row is padding and doubles as the right-hand border
//!   of the previous row, so the row stride is `size + 1`
//!
//! Any empty point is a legal move. Placing a stone removes every pair of
//! opponent stones it brackets against another friendly stone (`X O O X`)
//! along the 8 directions.

use std::fmt;

use thiserror::Error;

use crate::constants::{COLUMN_LETTERS, DEFAULT_SIZE, MAXSIZE, MINSIZE, PASS};
use crate::coord::{Coord, Point, point_to_coord};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Empty,
    Black,
    White,
    Border,
}

impl Color {
    /// The other player. `Empty` and `Border` map to themselves.
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
            other => other,
        }
    }

    pub fn is_stone(self) -> bool {
        matches!(self, Color::Black | Color::White)
    }

    /// Lowercase player name as used in GTP responses.
    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
            Color::Empty => "empty",
            Color::Border => "border",
        }
    }
}

/// Errors raised by the board when asked to do something impossible.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("unacceptable size {0}")]
    Size(usize),
    #[error("point {0} is not on the board")]
    OffBoard(Point),
    #[error("point {0} is not empty")]
    Occupied(Point),
    #[error("{0:?} cannot move")]
    NotAPlayer(Color),
}

/// A point-in-time copy of the board contents, row 0 being board row 1.
///
/// Never contains [`Color::Border`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    size: usize,
    cells: Vec<Color>,
}

impl Snapshot {
    /// Build an empty snapshot.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Color::Empty; size * size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Stone at 0-based `(row, col)`, or `None` when off the grid.
    #[inline]
    pub fn get(&self, row: isize, col: isize) -> Option<Color> {
        let n = self.size as isize;
        if row < 0 || col < 0 || row >= n || col >= n {
            return None;
        }
        Some(self.cells[row as usize * self.size + col as usize])
    }

    /// Overwrite 0-based `(row, col)`. Used to set up positions directly.
    pub fn set(&mut self, row: usize, col: usize, color: Color) {
        debug_assert!(color != Color::Border);
        self.cells[row * self.size + col] = color;
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Color::Empty)
    }
}

/// A Ninuki position (board state plus side to move).
#[derive(Clone)]
pub struct Board {
    size: usize,
    /// Board state including padding cells (`Color::Border`)
    cells: Vec<Color>,
    current_player: Color,
    /// Stones and passes played since the last reset
    moves_played: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

impl Board {
    /// Create an empty board. Sizes outside the supported range are clamped.
    pub fn new(size: usize) -> Self {
        let mut board = Board {
            size: 0,
            cells: Vec::new(),
            current_player: Color::Black,
            moves_played: 0,
        };
        let size = size.clamp(MINSIZE, MAXSIZE);
        board.layout(size);
        board
    }

    /// Reset to an empty board of the given size with Black to move.
    pub fn reset(&mut self, size: usize) -> Result<(), BoardError> {
        if !(MINSIZE..=MAXSIZE).contains(&size) {
            return Err(BoardError::Size(size));
        }
        self.layout(size);
        Ok(())
    }

    fn layout(&mut self, size: usize) {
        let stride = size + 1;
        self.size = size;
        self.cells = vec![Color::Border; stride * (size + 2)];
        for row in 1..=size {
            let start = row * stride;
            self.cells[start + 1..=start + size].fill(Color::Empty);
        }
        self.current_player = Color::Black;
        self.moves_played = 0;
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    #[inline]
    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// Color at a board point; anything outside the array is `Border`.
    #[inline]
    pub fn get(&self, point: Point) -> Color {
        self.cells.get(point).copied().unwrap_or(Color::Border)
    }

    #[inline]
    fn offset(point: Point, delta: isize) -> Option<Point> {
        point.checked_add_signed(delta)
    }

    /// Offsets to the 8 neighbouring points in the 1D array.
    fn deltas(&self) -> [isize; 8] {
        let ns = (self.size + 1) as isize;
        [-ns, 1, ns, -1, -ns + 1, ns + 1, ns - 1, -ns - 1]
    }

    /// Copy the board into a 2D snapshot without padding.
    pub fn snapshot(&self) -> Snapshot {
        let mut snap = Snapshot::new(self.size);
        let stride = self.size + 1;
        for row in 0..self.size {
            let start = (row + 1) * stride + 1;
            snap.cells[row * self.size..(row + 1) * self.size]
                .copy_from_slice(&self.cells[start..start + self.size]);
        }
        snap
    }

    /// All legal moves for `color`: every empty point, in board order.
    pub fn legal_moves(&self, color: Color) -> Vec<Point> {
        if !color.is_stone() {
            return Vec::new();
        }
        (0..self.cells.len())
            .filter(|&pt| self.cells[pt] == Color::Empty)
            .collect()
    }

    fn check_placement(&self, point: Point, color: Color) -> Result<(), BoardError> {
        if !color.is_stone() {
            return Err(BoardError::NotAPlayer(color));
        }
        match self.get(point) {
            Color::Empty => Ok(()),
            Color::Border => Err(BoardError::OffBoard(point)),
            _ => Err(BoardError::Occupied(point)),
        }
    }

    /// Play a move for `color` without resolving captures.
    ///
    /// `PASS` only hands the turn to the opponent.
    pub fn play_move(&mut self, point: Point, color: Color) -> Result<(), BoardError> {
        if point != PASS {
            self.check_placement(point, color)?;
            self.cells[point] = color;
        } else if !color.is_stone() {
            return Err(BoardError::NotAPlayer(color));
        }
        self.current_player = color.opponent();
        self.moves_played += 1;
        Ok(())
    }

    /// Play a stone for `color` and remove every pair it brackets.
    ///
    /// Returns the number of stones removed and their color.
    pub fn capture_by_a1(&mut self, point: Point, color: Color) -> Result<(usize, Color), BoardError> {
        self.check_placement(point, color)?;
        self.cells[point] = color;

        let opp = color.opponent();
        let mut captured = 0;
        for delta in self.deltas() {
            let line = Self::offset(point, delta)
                .and_then(|p1| Self::offset(p1, delta).map(|p2| (p1, p2)))
                .and_then(|(p1, p2)| Self::offset(p2, delta).map(|p3| (p1, p2, p3)));
            let Some((p1, p2, p3)) = line else {
                continue;
            };
            if self.get(p1) == opp && self.get(p2) == opp && self.get(p3) == color {
                self.cells[p1] = Color::Empty;
                self.cells[p2] = Color::Empty;
                captured += 2;
            }
        }

        self.current_player = opp;
        self.moves_played += 1;
        Ok((captured, opp))
    }

    /// Coordinate of a point on this board.
    pub fn coord(&self, point: Point) -> Coord {
        point_to_coord(point, self.size)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snap = self.snapshot();
        let letters = &COLUMN_LETTERS[..self.size];
        for row in (0..self.size).rev() {
            write!(f, "{:>2} ", row + 1)?;
            for col in 0..self.size {
                let ch = match snap.get(row as isize, col as isize) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    _ => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for &letter in letters {
            write!(f, "{} ", letter as char)?;
        }
        Ok(())
    }
}
